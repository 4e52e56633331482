pub mod api;
pub mod config;
pub mod context;
pub mod error;
pub mod extract;
pub mod generation;
pub mod prompt;
pub mod stepify;
pub mod task;
