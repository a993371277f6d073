//! Data models for LatexWP.
//!
//! - [`Settings`]: Process-wide settings loaded from `LatexWP Settings.yaml`
//! - [`ParsedCount`]: The `label: value` pairs produced by one word count run

pub mod config;
pub mod word_count;

pub use config::{Settings, SettingsFile};
pub use word_count::{ParsedCount, WORDS_IN_TEXT};
