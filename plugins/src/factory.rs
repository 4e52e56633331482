use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;

use stepify_core::api::{GeneratorFactory, ModelConfig, TextGenerator};

use crate::generation::{LocalT5Generator, OllamaGenerator, TgiGenerator};

pub async fn build_generator(cfg: &ModelConfig) -> Result<Arc<dyn TextGenerator>> {
    match cfg.backend.trim().to_lowercase().as_str() {
        "local" => Ok(Arc::new(LocalT5Generator::load(cfg).await?)),
        "tgi" => Ok(Arc::new(TgiGenerator::connect(cfg).await?)),
        "ollama" => Ok(Arc::new(OllamaGenerator::connect(cfg).await?)),
        other => Err(anyhow!(
            "unknown generation backend '{}' (expected local, tgi or ollama)",
            other
        )),
    }
}

/// [`GeneratorFactory`] backed by the generators in this crate.
pub struct PluginGeneratorFactory;

#[async_trait]
impl GeneratorFactory for PluginGeneratorFactory {
    async fn build_generator(&self, cfg: &ModelConfig) -> Result<Arc<dyn TextGenerator>> {
        build_generator(cfg).await
    }
}
