//! Services module - word counting through texcount and error reporting.
//!
//! # Components
//!
//! - [`WordCountRunner`]: Runs the external word count tool for one document and parses its
//!   `label: value` output into a [`ParsedCount`](crate::models::ParsedCount). Every failure
//!   (non-zero exit, timeout, missing binary, undecodable output) is passed to the
//!   [`ErrorReporter`] and turned into `None`.
//!
//! - [`ErrorReporter`]: Sends a message to exactly one [`ErrorSink`]: the error log when a
//!   terminal is attached and terminal logging is enabled, a modal dialog otherwise. The choice
//!   is made once, through [`SinkSelection`].
//!
//! # Usage Example
//!
//! ```ignore
//! use latexwp::services::{ErrorReporter, SinkSelection, WordCountRunner};
//!
//! let reporter = ErrorReporter::new(SinkSelection::detect(&settings));
//! let runner = WordCountRunner::new(&settings, reporter)?;
//!
//! if let Some(count) = runner.count("main.tex") {
//!     println!("{}", count);
//! }
//! ```
//!
//! # texcount Integration
//!
//! The tool is invoked as `texcount -sum=1 -total <file>`. Lines that do not hold exactly one
//! `": "` separator (headings, subcount breakdowns, blank lines) are ignored.

pub mod error_reporter;
pub mod word_count;

pub use error_reporter::{DialogSink, ErrorReporter, ErrorSink, LogSink, SinkSelection};
pub use word_count::{
    FailureKind, WordCountError, WordCountRunner, build_args, failure_message, parse_output,
};
