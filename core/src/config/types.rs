use serde::{Deserialize, Serialize};

pub const DEFAULT_MODEL_NAME: &str = "google/flan-t5-small";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_server_host")]
    pub host: String,

    #[serde(default = "default_server_port")]
    pub port: u16,
}

fn default_server_host() -> String {
    "0.0.0.0".to_string()
}

fn default_server_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_server_host(),
            port: default_server_port(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Pretrained model identifier, e.g. a Hugging Face hub repo id.
    #[serde(default = "default_model_name")]
    pub name: String,

    /// Generation backend: "local", "tgi" or "ollama".
    #[serde(default = "default_model_backend")]
    pub backend: String,

    /// Base URL for the HTTP backends. Ignored by "local".
    #[serde(default = "default_model_base_url")]
    pub base_url: String,

    /// "cpu", "cuda" or "metal". Only used by "local".
    #[serde(default = "default_model_device")]
    pub device: String,

    /// Upper bound on generated tokens.
    #[serde(default = "default_model_max_length")]
    pub max_length: usize,

    #[serde(default = "default_model_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_model_name() -> String {
    DEFAULT_MODEL_NAME.to_string()
}

fn default_model_backend() -> String {
    "local".to_string()
}

fn default_model_base_url() -> String {
    "http://127.0.0.1:8080".to_string()
}

fn default_model_device() -> String {
    "cpu".to_string()
}

fn default_model_max_length() -> usize {
    512
}

fn default_model_timeout_ms() -> u64 {
    120_000
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            name: default_model_name(),
            backend: default_model_backend(),
            base_url: default_model_base_url(),
            device: default_model_device(),
            max_length: default_model_max_length(),
            timeout_ms: default_model_timeout_ms(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_logging_enabled")]
    pub enabled: bool,

    /// If true, log to stderr.
    #[serde(default = "default_logging_console")]
    pub console: bool,

    /// If true, log to a file under `directory` (or OS temp dir if unset).
    #[serde(default = "default_logging_file")]
    pub file: bool,

    /// EnvFilter string, e.g. "info" or "stepify_core=debug".
    #[serde(default = "default_logging_level")]
    pub level: String,

    /// Optional directory for log files. If empty or unset, uses OS temp dir.
    #[serde(default)]
    pub directory: Option<String>,
}

fn default_logging_enabled() -> bool {
    true
}

fn default_logging_console() -> bool {
    true
}

fn default_logging_file() -> bool {
    false
}

fn default_logging_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: default_logging_enabled(),
            console: default_logging_console(),
            file: default_logging_file(),
            level: default_logging_level(),
            directory: None,
        }
    }
}
