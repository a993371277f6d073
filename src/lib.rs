// LatexWP - LaTeX word processing helpers
//
// This is the library crate containing texcount integration, error reporting,
// settings and logging setup. The binary crate (main.rs) is the process entry point.

pub mod config;
pub mod logging;
pub mod models;
pub mod services;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use models::{ParsedCount, Settings};
pub use services::{ErrorReporter, SinkSelection, WordCountError, WordCountRunner};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
