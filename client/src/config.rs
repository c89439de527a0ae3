//! # Client Configuration
//!
//! Settings are read once from the environment (and a `.env` file when
//! present), validated, then stored in a global [`OnceLock`].
//!
//! | Variable | Default |
//! |----------|---------|
//! | `GBAKA_API_URL` | `https://gbaka-maps.vercel.app` |
//! | `GBAKA_API_TIMEOUT_SECS` | `30` |
//! | `GBAKA_DEV_TOKEN` | unset |
//! | `GBAKA_FIREBASE_API_KEY` | unset |
//! | `GBAKA_IDENTITY_URL` | `https://identitytoolkit.googleapis.com` |
//! | `GBAKA_SECURE_TOKEN_URL` | `https://securetoken.googleapis.com` |
//! | `GBAKA_SESSION_FILE` | `$HOME/.gbaka/session.json` |
//! | `GBAKA_LOG_DIR` | `logs` |

use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::Duration;

use lib_utils::{get_env_or, get_env_parse_or};

use crate::core::error::{AppError, Result};
use crate::services::api::client::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use crate::services::auth::identity::{DEFAULT_IDENTITY_URL, DEFAULT_SECURE_TOKEN_URL};

/// Upper bound accepted for `GBAKA_API_TIMEOUT_SECS`.
pub const MAX_TIMEOUT_SECS: u64 = 300;

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_url: String,
    pub api_timeout: Duration,
    /// Bearer token used when no user is signed in.
    pub dev_token: Option<String>,
    pub firebase_api_key: Option<String>,
    pub identity_url: String,
    pub secure_token_url: String,
    pub session_file: PathBuf,
    pub log_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            dev_token: None,
            firebase_api_key: None,
            identity_url: DEFAULT_IDENTITY_URL.to_string(),
            secure_token_url: DEFAULT_SECURE_TOKEN_URL.to_string(),
            session_file: default_session_file(),
            log_dir: PathBuf::from("logs"),
        }
    }
}

fn default_session_file() -> PathBuf {
    PathBuf::from(get_env_or("HOME", "."))
        .join(".gbaka")
        .join("session.json")
}

fn optional(name: &'static str) -> Option<String> {
    let value = get_env_or(name, "");
    (!value.is_empty()).then(|| value.trim().to_string())
}

impl ClientConfig {
    /// Load from environment variables. Unset variables take their defaults;
    /// a malformed timeout is an error.
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        let timeout_secs = get_env_parse_or("GBAKA_API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let session_file = match optional("GBAKA_SESSION_FILE") {
            Some(path) => PathBuf::from(path),
            None => default_session_file(),
        };

        Ok(Self {
            api_url: get_env_or("GBAKA_API_URL", DEFAULT_API_URL).trim().to_string(),
            api_timeout: Duration::from_secs(timeout_secs),
            dev_token: optional("GBAKA_DEV_TOKEN"),
            firebase_api_key: optional("GBAKA_FIREBASE_API_KEY"),
            identity_url: get_env_or("GBAKA_IDENTITY_URL", DEFAULT_IDENTITY_URL).trim().to_string(),
            secure_token_url: get_env_or("GBAKA_SECURE_TOKEN_URL", DEFAULT_SECURE_TOKEN_URL)
                .trim()
                .to_string(),
            session_file,
            log_dir: PathBuf::from(get_env_or("GBAKA_LOG_DIR", "logs")),
        })
    }

    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("GBAKA_API_URL", &self.api_url),
            ("GBAKA_IDENTITY_URL", &self.identity_url),
            ("GBAKA_SECURE_TOKEN_URL", &self.secure_token_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(AppError::Config(format!("{} must start with http:// or https://", name)));
            }
        }

        let secs = self.api_timeout.as_secs();
        if secs == 0 || secs > MAX_TIMEOUT_SECS {
            return Err(AppError::Config(format!(
                "GBAKA_API_TIMEOUT_SECS must be between 1 and {}",
                MAX_TIMEOUT_SECS
            )));
        }

        Ok(())
    }

    pub fn has_identity_provider(&self) -> bool {
        self.firebase_api_key.is_some()
    }
}

static CONFIG: OnceLock<ClientConfig> = OnceLock::new();

/// Load, validate and install the global configuration.
///
/// Calling it again after a successful load returns the installed config.
pub fn init_config() -> Result<&'static ClientConfig> {
    if let Some(config) = CONFIG.get() {
        return Ok(config);
    }

    let config = ClientConfig::from_env()?;
    config.validate()?;
    tracing::debug!(api_url = %config.api_url, timeout_secs = config.api_timeout.as_secs(), "Configuration loaded");

    Ok(CONFIG.get_or_init(|| config))
}

/// The global configuration, if [`init_config`] has run.
pub fn client_config() -> Option<&'static ClientConfig> {
    CONFIG.get()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = ClientConfig::default();
        assert_eq!(config.api_url, "https://gbaka-maps.vercel.app");
        assert_eq!(config.api_timeout, Duration::from_secs(30));
        assert!(config.session_file.ends_with(".gbaka/session.json"));
        assert!(!config.has_identity_provider());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_url() {
        let config = ClientConfig {
            api_url: "gbaka-maps.vercel.app".to_string(),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("GBAKA_API_URL"));
    }

    #[test]
    fn test_validate_rejects_timeout_out_of_range() {
        let zero = ClientConfig {
            api_timeout: Duration::ZERO,
            ..Default::default()
        };
        assert!(zero.validate().is_err());

        let long = ClientConfig {
            api_timeout: Duration::from_secs(MAX_TIMEOUT_SECS + 1),
            ..Default::default()
        };
        assert!(long.validate().is_err());
    }
}
