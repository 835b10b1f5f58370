//! rxlens-common — Shared errors, configuration, and the allow-listed HTTP
//! client used across all RxLens crates.

pub mod error;
pub mod config;
pub mod sandbox;

// Re-export commonly used types
pub use config::{AppConfig, DatasetConfig, KnowledgeConfig, KnowledgeProvider, LoggingConfig, ServerConfig};
pub use error::{ApiError, Result, RxLensError};
pub use sandbox::SandboxClient;
