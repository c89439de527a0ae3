//! # Utilities Library
//!
//! Shared utility functions for environment variables, time, and field validation.

pub mod envs;
pub mod time;
pub mod validation;

// Re-export commonly used functions
pub use envs::{get_env, get_env_bool, get_env_or, get_env_parse, get_env_parse_or};
pub use time::{format_date, parse_utc};
pub use validation::{looks_like_email, validate_min_length, validate_not_empty};
