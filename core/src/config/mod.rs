mod load;
mod types;

pub use load::{
    apply_env_overrides, get_stepify_data_dir, load_default, load_with_path, ENV_BACKEND,
    ENV_BASE_URL, ENV_DEVICE, ENV_MODEL,
};
pub use types::{AppConfig, LoggingConfig, ModelConfig, ServerConfig, DEFAULT_MODEL_NAME};
