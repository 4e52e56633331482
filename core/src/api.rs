//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `stepify_core::api` instead of reaching into internal modules.

pub use crate::config::{
    load_default, load_with_path, AppConfig, LoggingConfig, ModelConfig, ServerConfig,
};
pub use crate::context::AppContext;
pub use crate::error::{CliError, ConfigError, StepifyError};
pub use crate::extract::{extract_json, extract_json_with_path, ExtractPath};
pub use crate::generation::{
    load_model, GenerationParams, GeneratorFactory, LoadFailure, ModelLoad, TextGenerator,
};
pub use crate::prompt::{build_stepify_prompt, MAX_TASKS};
pub use crate::stepify::{ai_stepify, rule_stepify, StepifyOutcome};
pub use crate::task::{Microtask, Priority, RuleTask, TaskType};
