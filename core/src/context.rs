use crate::config::AppConfig;
use crate::generation::{load_model, GenerationParams, GeneratorFactory, ModelLoad};

/// Everything a request needs, built once at startup and never mutated.
#[derive(Clone, Debug)]
pub struct AppContext {
    cfg: AppConfig,
    model: ModelLoad,
}

impl AppContext {
    /// Run the startup model load. Load failures do not fail construction.
    pub async fn new(cfg: AppConfig, factory: &dyn GeneratorFactory) -> Self {
        let model = load_model(&cfg.model, factory).await;
        Self { cfg, model }
    }

    pub fn with_model(cfg: AppConfig, model: ModelLoad) -> Self {
        Self { cfg, model }
    }

    pub fn cfg(&self) -> &AppConfig {
        &self.cfg
    }

    pub fn model(&self) -> &ModelLoad {
        &self.model
    }

    pub fn generation_params(&self) -> GenerationParams {
        GenerationParams::deterministic(self.cfg.model.max_length)
    }
}
