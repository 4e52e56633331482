//! In-process T5 text-to-text generation using Candle.
//!
//! Weights, config and tokenizer are fetched from the Hugging Face hub by
//! model id (e.g. `google/flan-t5-small`) and run on CPU, CUDA or Metal.
//!
//! # Note
//!
//! The actual implementation is gated behind the `local-inference` feature.
//! Without it, loading always fails and the server starts degraded.

use anyhow::Result;
use async_trait::async_trait;

use stepify_core::api::{GenerationParams, ModelConfig, TextGenerator};

pub struct LocalT5Generator {
    model_id: String,
    #[cfg(feature = "local-inference-cpu")]
    session: std::sync::Arc<std::sync::Mutex<local_impl::T5Session>>,
}

impl LocalT5Generator {
    /// Download (or reuse cached) weights and build the model.
    pub async fn load(cfg: &ModelConfig) -> Result<Self> {
        #[cfg(feature = "local-inference-cpu")]
        {
            let model_id = cfg.name.clone();
            let device = cfg.device.clone();
            let session = tokio::task::spawn_blocking(move || {
                local_impl::T5Session::load(&model_id, &device)
            })
            .await
            .map_err(|e| anyhow::anyhow!("model load task failed: {e}"))??;

            Ok(Self {
                model_id: cfg.name.clone(),
                session: std::sync::Arc::new(std::sync::Mutex::new(session)),
            })
        }

        #[cfg(not(feature = "local-inference-cpu"))]
        {
            Err(anyhow::anyhow!(
                "local inference for '{}' is not enabled. \
                 Please rebuild with: cargo build --features local-inference",
                cfg.name
            ))
        }
    }
}

#[async_trait]
impl TextGenerator for LocalT5Generator {
    fn name(&self) -> &str {
        "local"
    }

    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        #[cfg(feature = "local-inference-cpu")]
        {
            tracing::debug!(
                target: "stepify.backend",
                stage = "local.generate.in",
                model = %self.model_id,
                prompt_len = prompt.len()
            );
            let session = self.session.clone();
            let prompt = prompt.to_string();
            let params = *params;
            tokio::task::spawn_blocking(move || {
                let mut guard = session
                    .lock()
                    .map_err(|_| anyhow::anyhow!("model lock poisoned"))?;
                guard.generate(&prompt, &params)
            })
            .await
            .map_err(|e| anyhow::anyhow!("inference task failed: {e}"))?
        }

        #[cfg(not(feature = "local-inference-cpu"))]
        {
            let _ = (prompt, params);
            Err(anyhow::anyhow!(
                "local inference is not enabled for {}",
                self.model_id
            ))
        }
    }
}

#[cfg(feature = "local-inference-cpu")]
mod local_impl {
    use anyhow::{anyhow, Result};
    use candle_core::{DType, Device, Tensor};
    use candle_nn::VarBuilder;
    use candle_transformers::generation::LogitsProcessor;
    use candle_transformers::models::t5;
    use hf_hub::api::sync::Api;
    use tokenizers::Tokenizer;

    use stepify_core::api::GenerationParams;

    const SAMPLING_SEED: u64 = 299_792_458;
    const SAMPLING_TEMPERATURE: f64 = 0.8;

    pub(super) struct T5Session {
        model: t5::T5ForConditionalGeneration,
        tokenizer: Tokenizer,
        config: t5::Config,
        device: Device,
    }

    impl T5Session {
        pub(super) fn load(model_id: &str, device: &str) -> Result<Self> {
            let device = parse_device(device)?;

            let api = Api::new()?;
            let repo = api.model(model_id.to_string());
            let config_path = repo.get("config.json")?;
            let tokenizer_path = repo.get("tokenizer.json")?;
            let weights_path = repo.get("model.safetensors")?;

            let config: t5::Config = serde_json::from_slice(&std::fs::read(config_path)?)?;
            let tokenizer = Tokenizer::from_file(tokenizer_path)
                .map_err(|e| anyhow!("Failed to load tokenizer: {}", e))?;

            let vb =
                unsafe { VarBuilder::from_mmaped_safetensors(&[weights_path], DType::F32, &device)? };
            let model = t5::T5ForConditionalGeneration::load(vb, &config)?;

            Ok(Self {
                model,
                tokenizer,
                config,
                device,
            })
        }

        pub(super) fn generate(&mut self, prompt: &str, params: &GenerationParams) -> Result<String> {
            let tokens = self
                .tokenizer
                .encode(prompt, true)
                .map_err(|e| anyhow!("Tokenization failed: {}", e))?
                .get_ids()
                .to_vec();
            let input = Tensor::new(&tokens[..], &self.device)?.unsqueeze(0)?;

            let temperature = params.do_sample.then_some(SAMPLING_TEMPERATURE);
            let mut logits_processor = LogitsProcessor::new(SAMPLING_SEED, temperature, None);

            let result = self.decode_loop(&input, params.max_length, &mut logits_processor);
            self.model.clear_kv_cache();
            let output_ids = result?;

            self.tokenizer
                .decode(&output_ids, true)
                .map_err(|e| anyhow!("Detokenization failed: {}", e))
        }

        fn decode_loop(
            &mut self,
            input: &Tensor,
            max_length: usize,
            logits_processor: &mut LogitsProcessor,
        ) -> Result<Vec<u32>> {
            let encoder_output = self.model.encode(input)?;
            let start = self
                .config
                .decoder_start_token_id
                .unwrap_or(self.config.pad_token_id) as u32;
            let mut output_ids = vec![start];

            for index in 0..max_length {
                let decoder_ids = if index == 0 || !self.config.use_cache {
                    Tensor::new(output_ids.as_slice(), &self.device)?.unsqueeze(0)?
                } else {
                    let last = output_ids[output_ids.len() - 1];
                    Tensor::new(&[last], &self.device)?.unsqueeze(0)?
                };
                let logits = self
                    .model
                    .decode(&decoder_ids, &encoder_output)?
                    .squeeze(0)?;
                let next = logits_processor.sample(&logits)?;
                if next as usize == self.config.eos_token_id {
                    break;
                }
                output_ids.push(next);
            }

            // Drop the decoder start token.
            Ok(output_ids.split_off(1))
        }
    }

    fn parse_device(device: &str) -> Result<Device> {
        match device.to_lowercase().as_str() {
            "cpu" => Ok(Device::Cpu),
            "cuda" => Ok(Device::new_cuda(0)?),
            "metal" => Ok(Device::new_metal(0)?),
            d => Err(anyhow!("Unsupported device: {}", d)),
        }
    }
}
