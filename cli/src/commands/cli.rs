use std::path::PathBuf;

use clap::Parser;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "stepify", version, about = "Turn free-form text into microtasks")]
pub struct Args {
    /// Path to a config.toml. Defaults to ~/.stepify/config.toml, then ./config.toml.
    #[arg(long)]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub host: Option<String>,

    #[arg(long)]
    pub port: Option<u16>,

    /// Pretrained model identifier (overrides MCP_AI_MODEL).
    #[arg(long)]
    pub model: Option<String>,

    /// Generation backend: local, tgi or ollama (overrides MCP_AI_BACKEND).
    ///
    /// `local` (the default) needs a build with `--features local-inference`;
    /// without it the model never loads and /ai_stepify answers 503.
    #[arg(long)]
    pub backend: Option<String>,

    /// Base URL for the tgi/ollama backends (overrides MCP_AI_BASE_URL).
    #[arg(long)]
    pub base_url: Option<String>,
}

impl Args {
    /// CLI flags take precedence over env and file values.
    pub fn apply_to(&self, cfg: &mut stepify_core::api::AppConfig) {
        if let Some(host) = &self.host {
            cfg.server.host = host.clone();
        }
        if let Some(port) = self.port {
            cfg.server.port = port;
        }
        if let Some(model) = &self.model {
            cfg.model.name = model.clone();
        }
        if let Some(backend) = &self.backend {
            cfg.model.backend = backend.to_lowercase();
        }
        if let Some(base_url) = &self.base_url {
            cfg.model.base_url = base_url.clone();
        }
    }
}
