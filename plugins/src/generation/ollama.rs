//! Ollama backend.

use anyhow::Result;
use async_trait::async_trait;
use serde::Serialize;

use stepify_core::api::{GenerationParams, ModelConfig, TextGenerator};

use super::http_client::{text_field, JsonHttpClient};

#[derive(Debug, Serialize)]
struct ShowRequest<'a> {
    model: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    num_predict: usize,
    temperature: f32,
}

pub struct OllamaGenerator {
    client: JsonHttpClient,
    model: String,
    url_generate: String,
}

impl OllamaGenerator {
    /// Fails when the model is not pulled on the Ollama host.
    pub async fn connect(cfg: &ModelConfig) -> Result<Self> {
        let client = JsonHttpClient::new(&cfg.base_url, cfg.timeout_ms)?;
        client
            .post_json(&client.url("/api/show"), &ShowRequest { model: &cfg.name })
            .await?;

        let url_generate = client.url("/api/generate");
        Ok(Self {
            client,
            model: cfg.name.clone(),
            url_generate,
        })
    }
}

#[async_trait]
impl TextGenerator for OllamaGenerator {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn generate(&self, prompt: &str, params: &GenerationParams) -> Result<String> {
        tracing::debug!(
            target: "stepify.backend",
            stage = "ollama.generate.in",
            url = %self.url_generate,
            model = %self.model,
            prompt_len = prompt.len()
        );
        let payload = GenerateRequest {
            model: &self.model,
            prompt,
            stream: false,
            options: GenerateOptions {
                num_predict: params.max_length,
                // Ollama has no do_sample switch; zero temperature is greedy.
                temperature: if params.do_sample { 0.8 } else { 0.0 },
            },
        };
        let v = self.client.post_json(&self.url_generate, &payload).await?;
        let text = text_field(&v, "response")?;
        tracing::debug!(
            target: "stepify.backend",
            stage = "ollama.generate.out",
            output_len = text.len()
        );
        Ok(text)
    }
}
