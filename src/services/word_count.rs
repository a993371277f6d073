use crate::models::{ParsedCount, Settings};
use crate::services::ErrorReporter;
use camino::Utf8Path;
use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};
use thiserror::Error;
use tokio::process::Command;
use tokio::runtime::Runtime;
use tokio::time::timeout;

/// Separator between a label and its value in texcount output
const SEPARATOR: &str = ": ";

/// Broad failure categories, all handled the same way by [`WordCountRunner::count`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    CommandFailed,
    TimedOut,
    SystemInvocation,
    OutputParse,
    Lookup,
    Unclassified,
}

/// Errors that can occur while counting words
#[derive(Error, Debug)]
pub enum WordCountError {
    #[error("Command failed. Return code: {code}")]
    CommandFailed { code: i32 },

    #[error("Command timed out after {0:?}")]
    TimedOut(Duration),

    #[error("{}", describe_io(.0))]
    Io(#[from] io::Error),

    #[error("Invalid value: {0}")]
    OutputParse(String),

    #[error("Index or Key error occurred: {0}")]
    Lookup(String),

    #[error("Caught Exception: {0}")]
    Unclassified(String),
}

impl WordCountError {
    pub fn kind(&self) -> FailureKind {
        match self {
            WordCountError::CommandFailed { .. } => FailureKind::CommandFailed,
            WordCountError::TimedOut(_) => FailureKind::TimedOut,
            WordCountError::Io(_) => FailureKind::SystemInvocation,
            WordCountError::OutputParse(_) => FailureKind::OutputParse,
            WordCountError::Lookup(_) => FailureKind::Lookup,
            WordCountError::Unclassified(_) => FailureKind::Unclassified,
        }
    }
}

fn describe_io(error: &io::Error) -> String {
    match error.kind() {
        io::ErrorKind::PermissionDenied => format!("Permission denied: {}", error),
        _ => format!("OS error occurred: {}", error),
    }
}

/// Exit code of a finished process; a fatal signal counts as its negated number
fn return_code(status: &ExitStatus) -> Option<i32> {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        status.code().or_else(|| status.signal().map(|signal| -signal))
    }
    #[cfg(not(unix))]
    {
        status.code()
    }
}

/// Message handed to the error reporter for a failed count
pub fn failure_message(file: &Utf8Path, error: &WordCountError) -> String {
    format!("Error while performing a word count on {}: {}", file, error)
}

/// Arguments asking texcount for a single summary total of `file`
pub fn build_args(file: &Utf8Path) -> Vec<String> {
    vec!["-sum=1".to_string(), "-total".to_string(), file.to_string()]
}

/// Collect the `label: value` lines of the tool's output
///
/// A line counts only if it holds exactly one `": "`; everything else is
/// ignored. A repeated label keeps the last value seen.
pub fn parse_output(output: &str) -> ParsedCount {
    output
        .lines()
        .filter_map(|line| {
            let mut parts = line.split(SEPARATOR);
            match (parts.next(), parts.next(), parts.next()) {
                (Some(label), Some(value), None) => Some((label, value)),
                _ => None,
            }
        })
        .collect()
}

/// Runs the external word count tool and turns its output into a [`ParsedCount`]
///
/// Calls block the current thread. The runner drives the subprocess on its
/// own single-threaded tokio runtime, so [`count`](Self::count) must not be
/// called from inside another async runtime; use
/// [`try_count`](Self::try_count) there instead.
pub struct WordCountRunner {
    program: String,
    timeout: Option<Duration>,
    reporter: ErrorReporter,
    runtime: Runtime,
}

impl WordCountRunner {
    pub fn new(settings: &Settings, reporter: ErrorReporter) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        Ok(Self {
            program: settings.word_count_exe.clone(),
            timeout: settings.timeout(),
            reporter,
            runtime,
        })
    }

    /// Count the words in `file`
    ///
    /// Returns `None` when no usable result could be produced; the reason has
    /// already been passed to the error reporter by then.
    pub fn count(&self, file: impl AsRef<Utf8Path>) -> Option<ParsedCount> {
        let file = file.as_ref();

        match self.runtime.block_on(self.try_count(file)) {
            Ok(count) => Some(count),
            Err(e) => {
                self.reporter.report(&failure_message(file, &e));
                None
            }
        }
    }

    /// Run the tool once and parse its output, without reporting failures
    pub async fn try_count(&self, file: impl AsRef<Utf8Path>) -> Result<ParsedCount, WordCountError> {
        let args = build_args(file.as_ref());
        tracing::debug!("Executing: {} {}", self.program, args.join(" "));

        let start = Instant::now();

        let mut cmd = Command::new(&self.program);
        cmd.args(&args).stdin(Stdio::null()).kill_on_drop(true);

        let output = match self.timeout {
            Some(limit) => timeout(limit, cmd.output()).await.map_err(|_| {
                tracing::warn!("{} timed out after {:?}", self.program, limit);
                WordCountError::TimedOut(limit)
            })??,
            None => cmd.output().await?,
        };

        tracing::debug!(
            "{} completed in {:.2}s with status {}",
            self.program,
            start.elapsed().as_secs_f32(),
            output.status
        );

        if !output.status.success() {
            return Err(match return_code(&output.status) {
                Some(code) => WordCountError::CommandFailed { code },
                None => WordCountError::Unclassified(format!(
                    "{} exited without a return code ({})",
                    self.program, output.status
                )),
            });
        }

        let mut combined = output.stdout;
        combined.extend_from_slice(&output.stderr);

        let text = String::from_utf8(combined)
            .map_err(|e| WordCountError::OutputParse(format!("output is not UTF-8: {}", e)))?;

        let count = parse_output(&text);
        tracing::debug!("Parsed {} entries from {}", count.len(), self.program);

        Ok(count)
    }
}

impl std::fmt::Debug for WordCountRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WordCountRunner")
            .field("program", &self.program)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
