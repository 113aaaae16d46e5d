//! Logging configuration from environment variables

use std::path::PathBuf;

const DEFAULT_LOG_LEVEL: &str = "frontend=info,concall_frontend=info,warn";
const LOG_FILE_PREFIX: &str = "concall-frontend.log";

/// Logging system configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugConfig {
    /// Log level filter (e.g., "frontend=debug,info")
    pub log_level: String,
    /// Directory for the daily-rotated log file
    pub log_dir: PathBuf,
    /// File name prefix; the appender adds the date
    pub log_file_prefix: String,
    /// Mirror log output to stderr
    pub log_to_stderr: bool,
    /// JSON lines instead of plain text in the log file
    pub json: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: DEFAULT_LOG_LEVEL.to_string(),
            log_dir: PathBuf::from("logs"),
            log_file_prefix: LOG_FILE_PREFIX.to_string(),
            log_to_stderr: false,
            json: false,
        }
    }
}

impl DebugConfig {
    /// Load configuration from environment variables
    ///
    /// - `RUST_LOG`: filter directives
    /// - `CONCALL_LOG_DIR`: log directory (default `logs`)
    /// - `CONCALL_LOG_STDERR=1`: also log to stderr
    /// - `CONCALL_LOG_JSON=1`: JSON log file
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        Self {
            log_level: lookup("RUST_LOG")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.log_level),
            log_dir: lookup("CONCALL_LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_file_prefix: defaults.log_file_prefix,
            log_to_stderr: lookup("CONCALL_LOG_STDERR").is_some_and(|v| v == "1"),
            json: lookup("CONCALL_LOG_JSON").is_some_and(|v| v == "1"),
        }
    }

    /// Check if debug logging is enabled
    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug") || self.log_level.contains("trace")
    }
}
