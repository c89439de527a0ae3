//! Logging configuration from environment variables

use std::path::PathBuf;

use lib_utils::{get_env_bool, get_env_or};

/// File name prefix of the daily-rotated log.
pub const LOG_FILE_NAME: &str = "gbaka.log";

pub const DEFAULT_FILTER: &str = "gbaka_client=info,gbaka=info,warn";

#[derive(Debug, Clone, PartialEq)]
pub struct LogConfig {
    /// Directory of the rotated log files
    pub log_dir: PathBuf,
    /// Filter directive (e.g. "gbaka_client=debug,info")
    pub log_level: String,
    /// Mirror events to stderr
    pub stderr: bool,
    /// Write the file log as JSON lines
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            log_level: DEFAULT_FILTER.to_string(),
            stderr: false,
            json: false,
        }
    }
}

impl LogConfig {
    /// `GBAKA_LOG_DIR`, `RUST_LOG`, `GBAKA_LOG_STDERR`, `GBAKA_LOG_JSON`.
    pub fn from_env() -> Self {
        Self {
            log_dir: PathBuf::from(get_env_or("GBAKA_LOG_DIR", "logs")),
            log_level: get_env_or("RUST_LOG", DEFAULT_FILTER),
            stderr: get_env_bool("GBAKA_LOG_STDERR", false),
            json: get_env_bool("GBAKA_LOG_JSON", false),
        }
    }

    /// Keep the environment's level settings but write to `log_dir`.
    pub fn with_log_dir(mut self, log_dir: impl Into<PathBuf>) -> Self {
        self.log_dir = log_dir.into();
        self
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.log_level.contains("debug") || self.log_level.contains("trace")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_and_debug_detection() {
        let config = LogConfig::default();
        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert!(!config.is_debug_enabled());

        let verbose = LogConfig {
            log_level: "gbaka_client=debug".to_string(),
            ..Default::default()
        };
        assert!(verbose.is_debug_enabled());
        assert_eq!(verbose.with_log_dir("/tmp/gbaka").log_dir, PathBuf::from("/tmp/gbaka"));
    }
}
