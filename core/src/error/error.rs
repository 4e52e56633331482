use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("server failed: {0}")]
    Server(String),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot determine home directory")]
    HomeDir,
    #[error("config file not found: {0}")]
    NotFound(String),
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: toml::de::Error,
    },
}

/// Failures of a single stepify request.
#[derive(Error, Debug)]
pub enum StepifyError {
    #[error("no input text")]
    EmptyInput,
    #[error("AI model not available")]
    ModelUnavailable,
    #[error("generation error: {0}")]
    Generation(String),
}
