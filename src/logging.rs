use crate::models::Settings;
use crate::services::SinkSelection;
use anyhow::{Context, Result};
use camino::Utf8PathBuf;
use std::fmt;
use std::fs::{self, OpenOptions};
use tracing::{Event, Subscriber};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling;
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::time::{FormatTime, SystemTime};
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Formats every event as `<timestamp> - <LEVEL> - <message>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogLineFormat;

impl<S, N> FormatEvent<S, N> for LogLineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        SystemTime.format_time(&mut writer)?;
        write!(writer, " - {} - ", event.metadata().level())?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Keeps the file writer alive; hold it for the lifetime of the program.
#[derive(Debug)]
pub struct LoggingGuard {
    _guard: Option<WorkerGuard>,
    log_path: Option<Utf8PathBuf>,
}

impl LoggingGuard {
    /// The log file events are written to, if the file sink was installed
    pub fn log_path(&self) -> Option<&Utf8PathBuf> {
        self.log_path.as_ref()
    }
}

/// Create the log directory and an empty log file if they are missing.
///
/// Existing log content is left untouched.
pub fn prepare_log_file(settings: &Settings) -> Result<Utf8PathBuf> {
    if !settings.log_dir.exists() {
        fs::create_dir_all(&settings.log_dir)
            .with_context(|| format!("Failed to create log directory: {}", settings.log_dir))?;
    }

    let log_path = settings.log_path();
    if !log_path.exists() {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&log_path)
            .with_context(|| format!("Failed to create log file: {}", log_path))?;
    }

    Ok(log_path)
}

fn build_filter(debug_mode: bool) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if debug_mode {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new("error")
        }
    })
}

/// Setup logging for the process.
///
/// With [`SinkSelection::Log`] events go to the configured log file; otherwise
/// they go to stderr. Failures are logged and swallowed, never returned.
///
/// # Returns
/// A guard that must be held for the duration of the program to keep logging active
pub fn initialize_logging(settings: &Settings, selection: SinkSelection) -> LoggingGuard {
    match try_initialize_logging(settings, selection) {
        Ok(guard) => guard,
        Err(e) => {
            let _ = tracing_subscriber::registry()
                .with(build_filter(settings.debug_mode))
                .with(
                    tracing_subscriber::fmt::layer()
                        .event_format(LogLineFormat)
                        .with_writer(std::io::stderr),
                )
                .try_init();

            tracing::error!("Error occurred while initializing logging: {:#}", e);

            LoggingGuard {
                _guard: None,
                log_path: None,
            }
        }
    }
}

fn try_initialize_logging(settings: &Settings, selection: SinkSelection) -> Result<LoggingGuard> {
    let log_path = prepare_log_file(settings)?;
    let env_filter = build_filter(settings.debug_mode);

    let guard = match selection {
        SinkSelection::Log => {
            let file_appender = rolling::never(&settings.log_dir, &settings.log_file);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .event_format(LogLineFormat)
                        .with_writer(non_blocking)
                        .with_ansi(false),
                )
                .try_init()
                .context("Failed to install logging subscriber")?;

            LoggingGuard {
                _guard: Some(guard),
                log_path: Some(log_path),
            }
        }
        SinkSelection::Dialog => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    tracing_subscriber::fmt::layer()
                        .event_format(LogLineFormat)
                        .with_writer(std::io::stderr),
                )
                .try_init()
                .context("Failed to install logging subscriber")?;

            LoggingGuard {
                _guard: None,
                log_path: None,
            }
        }
    };

    tracing::debug!(
        "Logging initialized: file={}, selection={:?}, debug={}",
        settings.log_path(),
        selection,
        settings.debug_mode
    );

    Ok(guard)
}
