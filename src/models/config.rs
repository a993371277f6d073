use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Settings file layout for `LatexWP Settings.yaml`
///
/// Loaded once at start-up and handed around by reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsFile {
    #[serde(rename = "LatexWP_Settings", default)]
    pub settings: Settings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Route reported errors to the log when stdout is a terminal
    #[serde(rename = "Terminal Logging", default = "default_terminal_logging")]
    pub terminal_logging: bool,

    #[serde(rename = "Log Directory", default = "default_log_dir")]
    pub log_dir: Utf8PathBuf,

    #[serde(rename = "Log File", default = "default_log_file")]
    pub log_file: String,

    #[serde(rename = "Word Count EXE", default = "default_word_count_exe")]
    pub word_count_exe: String,

    /// Seconds; 0 disables the limit
    #[serde(rename = "Word Count Timeout", default)]
    pub word_count_timeout: u64,

    #[serde(rename = "Debug Mode", default)]
    pub debug_mode: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            terminal_logging: default_terminal_logging(),
            log_dir: default_log_dir(),
            log_file: default_log_file(),
            word_count_exe: default_word_count_exe(),
            word_count_timeout: 0,
            debug_mode: false,
        }
    }
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self {
            settings: Settings::default(),
        }
    }
}

impl Settings {
    /// Full path of the error log
    pub fn log_path(&self) -> Utf8PathBuf {
        self.log_dir.join(&self.log_file)
    }

    /// Word count timeout, if one is configured
    pub fn timeout(&self) -> Option<std::time::Duration> {
        (self.word_count_timeout > 0)
            .then(|| std::time::Duration::from_secs(self.word_count_timeout))
    }
}

fn default_terminal_logging() -> bool {
    true
}

fn default_log_dir() -> Utf8PathBuf {
    Utf8PathBuf::from("log")
}

fn default_log_file() -> String {
    "error.log".to_string()
}

fn default_word_count_exe() -> String {
    "texcount".to_string()
}
