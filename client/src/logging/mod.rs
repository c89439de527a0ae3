//! # Logging and Tracing
//!
//! - **File log**: `<GBAKA_LOG_DIR>/gbaka.log`, rotated daily, written off-thread
//! - **stderr mirror**: `GBAKA_LOG_STDERR=1`
//! - **Trace IDs**: every CLI command runs in a span with a fresh UUID
//! - **Panics**: logged with location, message and trace ID before the default hook runs
//!
//! ```rust,no_run
//! use gbaka_client::logging::{self, LogConfig};
//!
//! let _guard = logging::init_logger(&LogConfig::from_env());
//! tracing::info!(endpoint = "/api/stops", duration_ms = 234, "API call completed");
//! ```

pub mod config;
pub mod logger;
pub mod trace_context;

pub use config::LogConfig;
pub use logger::{init as init_logger, LoggingGuard};
pub use trace_context::{command_span, get_trace_id, new_trace_id, with_trace_id_async};
