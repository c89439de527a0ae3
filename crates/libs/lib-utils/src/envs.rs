//! # Environment Variables
//!
//! Utilities for reading and parsing environment variables.

use std::env;
use std::str::FromStr;

/// Get an environment variable by name.
pub fn get_env(name: &'static str) -> Result<String, Error> {
    env::var(name).map_err(|_| Error::MissingEnv(name))
}

/// Get and parse an environment variable.
pub fn get_env_parse<T: FromStr>(name: &'static str) -> Result<T, Error> {
    let val = get_env(name)?;
    val.trim().parse::<T>().map_err(|_| Error::WrongFormat(name))
}

/// Get an environment variable, or `default` when it is unset or blank.
pub fn get_env_or(name: &'static str, default: &str) -> String {
    match env::var(name) {
        Ok(val) if !val.trim().is_empty() => val,
        _ => default.to_string(),
    }
}

/// Parse an environment variable, or return `default` when it is unset.
///
/// A variable that is set but malformed is still an error.
pub fn get_env_parse_or<T: FromStr>(name: &'static str, default: T) -> Result<T, Error> {
    match get_env_parse(name) {
        Err(Error::MissingEnv(_)) => Ok(default),
        other => other,
    }
}

/// Read a boolean flag. `1`, `true`, `yes` and `on` are true (case-insensitive).
pub fn get_env_bool(name: &'static str, default: bool) -> bool {
    match env::var(name) {
        Ok(val) => matches!(
            val.trim().to_ascii_lowercase().as_str(),
            "1" | "true" | "yes" | "on"
        ),
        Err(_) => default,
    }
}

// region:    --- Error
#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    MissingEnv(&'static str),
    WrongFormat(&'static str),
}

impl std::fmt::Display for Error {
    fn fmt(&self, fmt: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Error::MissingEnv(name) => write!(fmt, "{name} must be set in environment"),
            Error::WrongFormat(name) => write!(fmt, "{name} has an invalid format"),
        }
    }
}

impl std::error::Error for Error {}
// endregion: --- Error

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable name so parallel tests don't collide.

    #[test]
    fn test_missing_env() {
        assert_eq!(
            get_env("LIB_UTILS_TEST_DEFINITELY_UNSET"),
            Err(Error::MissingEnv("LIB_UTILS_TEST_DEFINITELY_UNSET"))
        );
        assert_eq!(get_env_or("LIB_UTILS_TEST_DEFINITELY_UNSET", "fallback"), "fallback");
        assert_eq!(get_env_parse_or("LIB_UTILS_TEST_DEFINITELY_UNSET", 30u64), Ok(30));
        assert!(get_env_bool("LIB_UTILS_TEST_DEFINITELY_UNSET", true));
    }

    #[test]
    fn test_parse_env() {
        env::set_var("LIB_UTILS_TEST_TIMEOUT", " 45 ");
        assert_eq!(get_env_parse::<u64>("LIB_UTILS_TEST_TIMEOUT"), Ok(45));

        env::set_var("LIB_UTILS_TEST_BAD_TIMEOUT", "soon");
        assert_eq!(
            get_env_parse_or("LIB_UTILS_TEST_BAD_TIMEOUT", 30u64),
            Err(Error::WrongFormat("LIB_UTILS_TEST_BAD_TIMEOUT"))
        );
    }

    #[test]
    fn test_bool_env() {
        env::set_var("LIB_UTILS_TEST_FLAG_ON", "Yes");
        env::set_var("LIB_UTILS_TEST_FLAG_OFF", "0");
        assert!(get_env_bool("LIB_UTILS_TEST_FLAG_ON", false));
        assert!(!get_env_bool("LIB_UTILS_TEST_FLAG_OFF", true));
    }
}
