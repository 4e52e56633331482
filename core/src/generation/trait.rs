use async_trait::async_trait;

/// Decoding settings passed with every prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationParams {
    pub max_length: usize,
    /// `false` means greedy decoding.
    pub do_sample: bool,
}

impl GenerationParams {
    pub fn deterministic(max_length: usize) -> Self {
        Self {
            max_length,
            do_sample: false,
        }
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::deterministic(512)
    }
}

/// A pretrained text-generation model: prompt in, generated text out.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    fn name(&self) -> &str;
    async fn generate(&self, prompt: &str, params: &GenerationParams) -> anyhow::Result<String>;
}
