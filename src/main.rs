//! LatexWP - process entry point.
//!
//! Start-up only:
//! 1. Load `LatexWP Settings.yaml` from the working directory (defaults if absent or invalid)
//! 2. Decide once where reported errors go (log when stdout is a terminal, dialog otherwise)
//! 3. Create the log directory and file and install the tracing subscriber
//!
//! No command-line arguments are processed and no document work happens here.
//! Start-up problems are logged, never returned.

use latexwp::config::{SETTINGS_FILE_NAME, load_settings_or_default};
use latexwp::{APP_NAME, SinkSelection, VERSION};
use std::path::Path;

fn main() {
    let (settings, load_error) = load_settings_or_default(".");

    let selection = SinkSelection::detect(&settings);
    let _logging = latexwp::logging::initialize_logging(&settings, selection);

    if let Some(e) = load_error {
        tracing::error!("Error occurred while loading settings: {:#}", e);
    } else if !Path::new(SETTINGS_FILE_NAME).exists() {
        tracing::warn!("Settings file {} not found, using defaults", SETTINGS_FILE_NAME);
    }

    tracing::debug!("{} v{} started with {:?} error sink", APP_NAME, VERSION, selection);
}
