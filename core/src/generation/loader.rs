use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde::Serialize;

use super::r#trait::TextGenerator;
use crate::config::ModelConfig;

/// Builds a generator for a model config. Implemented by the plugins crate.
#[async_trait]
pub trait GeneratorFactory: Send + Sync {
    async fn build_generator(&self, cfg: &ModelConfig) -> anyhow::Result<Arc<dyn TextGenerator>>;
}

/// Why the model could not be loaded at startup.
#[derive(Debug, Clone, Serialize)]
pub struct LoadFailure {
    pub model: String,
    pub backend: String,
    pub reason: String,
    pub failed_at: DateTime<Local>,
}

/// Outcome of the one-shot startup load.
#[derive(Clone)]
pub enum ModelLoad {
    Ready(Arc<dyn TextGenerator>),
    Unavailable(LoadFailure),
}

impl ModelLoad {
    pub fn generator(&self) -> Option<&Arc<dyn TextGenerator>> {
        match self {
            Self::Ready(g) => Some(g),
            Self::Unavailable(_) => None,
        }
    }

    pub fn failure(&self) -> Option<&LoadFailure> {
        match self {
            Self::Ready(_) => None,
            Self::Unavailable(f) => Some(f),
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    pub fn unavailable(cfg: &ModelConfig, reason: impl Into<String>) -> Self {
        Self::Unavailable(LoadFailure {
            model: cfg.name.clone(),
            backend: cfg.backend.clone(),
            reason: reason.into(),
            failed_at: Local::now(),
        })
    }
}

impl std::fmt::Debug for ModelLoad {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Ready(g) => f.debug_tuple("Ready").field(&g.name()).finish(),
            Self::Unavailable(failure) => f.debug_tuple("Unavailable").field(failure).finish(),
        }
    }
}

/// Try once to load the configured model. Never fails: errors become
/// `ModelLoad::Unavailable` and the server runs degraded.
pub async fn load_model(cfg: &ModelConfig, factory: &dyn GeneratorFactory) -> ModelLoad {
    tracing::info!(
        model = %cfg.name,
        backend = %cfg.backend,
        "loading AI model"
    );

    match factory.build_generator(cfg).await {
        Ok(generator) => {
            tracing::info!(model = %cfg.name, generator = generator.name(), "AI model loaded");
            ModelLoad::Ready(generator)
        }
        Err(e) => {
            let reason = format!("{e:#}");
            tracing::error!(
                model = %cfg.name,
                backend = %cfg.backend,
                error = %reason,
                "failed to load AI model at startup"
            );
            ModelLoad::unavailable(cfg, reason)
        }
    }
}
