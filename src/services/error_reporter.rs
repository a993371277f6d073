use crate::models::Settings;

/// Where reported errors end up
///
/// Resolved once at start-up from the settings and the environment, so the
/// rest of the program never probes the terminal itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinkSelection {
    /// Error-level entry in the log
    Log,
    /// Blocking native message box
    Dialog,
}

impl SinkSelection {
    /// Pick the sink for this process by checking whether stdout is a terminal
    pub fn detect(settings: &Settings) -> Self {
        Self::resolve(settings.terminal_logging, atty::is(atty::Stream::Stdout))
    }

    pub fn resolve(terminal_logging: bool, stdout_is_terminal: bool) -> Self {
        if terminal_logging && stdout_is_terminal {
            SinkSelection::Log
        } else {
            SinkSelection::Dialog
        }
    }
}

/// Destination for a single error message
///
/// Implementations must not panic or fail back to the caller.
#[cfg_attr(test, mockall::automock)]
pub trait ErrorSink {
    fn deliver(&self, message: &str);
}

/// Writes the message as an error-level tracing event
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl ErrorSink for LogSink {
    fn deliver(&self, message: &str) {
        tracing::error!("{}", message);
    }
}

/// Shows the message in a modal error dialog and waits for it to be dismissed
#[derive(Debug, Default, Clone, Copy)]
pub struct DialogSink;

impl ErrorSink for DialogSink {
    fn deliver(&self, message: &str) {
        let result = rfd::MessageDialog::new()
            .set_level(rfd::MessageLevel::Error)
            .set_title("Error")
            .set_description(message)
            .set_buttons(rfd::MessageButtons::Ok)
            .show();

        if needs_log_fallback(&result) {
            tracing::error!("{}", message);
        }
    }
}

/// Whether a dialog outcome means the message never reached the user
///
/// With a single OK button the only acknowledged outcome is `Ok`; backends
/// report a dialog they could not open (no display, no zenity) as `Cancel`.
pub fn needs_log_fallback(result: &rfd::MessageDialogResult) -> bool {
    !matches!(result, rfd::MessageDialogResult::Ok)
}

/// Routes human-readable error messages to the selected sink
pub struct ErrorReporter {
    sink: Box<dyn ErrorSink>,
}

impl ErrorReporter {
    pub fn new(selection: SinkSelection) -> Self {
        match selection {
            SinkSelection::Log => Self::with_sink(LogSink),
            SinkSelection::Dialog => Self::with_sink(DialogSink),
        }
    }

    /// Use a custom sink (tests, embedding applications)
    pub fn with_sink(sink: impl ErrorSink + 'static) -> Self {
        Self {
            sink: Box::new(sink),
        }
    }

    /// Deliver `message` to exactly one sink
    pub fn report(&self, message: &str) {
        self.sink.deliver(message);
    }
}

impl std::fmt::Debug for ErrorReporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ErrorReporter").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_logs_only_with_flag_and_terminal() {
        assert_eq!(SinkSelection::resolve(true, true), SinkSelection::Log);
        assert_eq!(SinkSelection::resolve(true, false), SinkSelection::Dialog);
        assert_eq!(SinkSelection::resolve(false, true), SinkSelection::Dialog);
        assert_eq!(SinkSelection::resolve(false, false), SinkSelection::Dialog);
    }

    #[test]
    fn test_report_delivers_once() {
        let mut sink = MockErrorSink::new();
        sink.expect_deliver()
            .withf(|message| message == "something broke")
            .times(1)
            .return_const(());

        let reporter = ErrorReporter::with_sink(sink);
        reporter.report("something broke");
    }

    #[test]
    fn test_unacknowledged_dialog_falls_back_to_log() {
        assert!(!needs_log_fallback(&rfd::MessageDialogResult::Ok));
        assert!(needs_log_fallback(&rfd::MessageDialogResult::Cancel));
        assert!(needs_log_fallback(&rfd::MessageDialogResult::No));
        assert!(needs_log_fallback(&rfd::MessageDialogResult::Custom(
            "Close".to_string()
        )));
    }

    #[test]
    fn test_log_sink_does_not_panic_without_subscriber() {
        LogSink.deliver("no subscriber installed");
    }
}
