//! Hugging Face text-generation-inference server backend.

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use stepify_core::api::{GenerationParams, ModelConfig, TextGenerator};

use super::http_client::{text_field, JsonHttpClient};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    inputs: &'a str,
    parameters: GenerateParameters,
}

#[derive(Debug, Serialize)]
struct GenerateParameters {
    max_new_tokens: usize,
    do_sample: bool,
}

pub struct TgiGenerator {
    client: JsonHttpClient,
    model: String,
    url_generate: String,
}

impl TgiGenerator {
    /// Probe `GET /info` and bind to the server. The configured model name is
    /// compared against the served `model_id` and only logged on mismatch.
    pub async fn connect(cfg: &ModelConfig) -> Result<Self> {
        let client = JsonHttpClient::new(&cfg.base_url, cfg.timeout_ms)?;
        let info = client.get_json(&client.url("/info")).await?;
        let served = info.get("model_id").and_then(Value::as_str).unwrap_or("");

        if served != cfg.name {
            tracing::warn!(
                configured = %cfg.name,
                served = %served,
                "text-generation-inference serves a different model than configured"
            );
        }

        let url_generate = client.url("/generate");
        Ok(Self {
            client,
            model: if served.is_empty() {
                cfg.name.clone()
            } else {
                served.to_string()
            },
            url_generate,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl TextGenerator for TgiGenerator {
    fn name(&self) -> &str {
        "tgi"
    }

    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        tracing::debug!(
            target: "stepify.backend",
            stage = "tgi.generate.in",
            url = %self.url_generate,
            prompt_len = prompt.len(),
            max_new_tokens = params.max_length
        );
        let payload = GenerateRequest {
            inputs: prompt,
            parameters: GenerateParameters {
                max_new_tokens: params.max_length,
                do_sample: params.do_sample,
            },
        };
        let v = self.client.post_json(&self.url_generate, &payload).await?;
        let text = text_field(&v, "generated_text")?;
        tracing::debug!(
            target: "stepify.backend",
            stage = "tgi.generate.out",
            output_len = text.len()
        );
        Ok(text)
    }
}
