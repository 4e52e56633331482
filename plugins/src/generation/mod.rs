pub mod http_client;
pub mod local;
pub mod ollama;
pub mod tgi;

pub use http_client::BackendError;
pub use local::LocalT5Generator;
pub use ollama::OllamaGenerator;
pub use tgi::TgiGenerator;
