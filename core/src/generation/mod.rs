mod loader;
mod r#trait;

pub use loader::{load_model, GeneratorFactory, LoadFailure, ModelLoad};
pub use r#trait::{GenerationParams, TextGenerator};
