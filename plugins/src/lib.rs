pub mod factory;
pub mod generation;

pub use factory::{build_generator, PluginGeneratorFactory};
