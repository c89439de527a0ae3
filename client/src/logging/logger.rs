//! File-based logging initialization

use std::fs;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer, Registry};

use super::config::{LogConfig, DEFAULT_FILTER, LOG_FILE_NAME};

/// Keeps the non-blocking writer flushing. Drop it last, right before exit.
#[must_use = "dropping the guard stops the log writer"]
pub struct LoggingGuard {
    _workers: Vec<WorkerGuard>,
}

/// Initialize the logging system
///
/// Sets up:
/// - Daily rotation of `<log_dir>/gbaka.log`
/// - Non-blocking writes so a slow disk never stalls a request
/// - An optional stderr layer (`GBAKA_LOG_STDERR=1`)
/// - A panic hook that logs location, message and trace ID
///
/// A second call (or a subscriber installed elsewhere, as in tests) leaves the
/// existing subscriber in place.
pub fn init(config: &LogConfig) -> LoggingGuard {
    let mut workers = Vec::new();
    let mut layers: Vec<Box<dyn Layer<Registry> + Send + Sync>> = Vec::new();

    match fs::create_dir_all(&config.log_dir) {
        Ok(()) => {
            let file_appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_NAME);
            let (writer, guard) = tracing_appender::non_blocking(file_appender);
            workers.push(guard);

            let file_layer = fmt::layer()
                .with_writer(writer)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true)
                .with_ansi(false);

            if config.json {
                layers.push(file_layer.json().boxed());
            } else {
                layers.push(file_layer.boxed());
            }
        }
        Err(e) => {
            eprintln!("Warning: Failed to create log directory {}: {}", config.log_dir.display(), e);
        }
    }

    if config.stderr {
        layers.push(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact()
                .boxed(),
        );
    }

    let env_filter = EnvFilter::try_new(&config.log_level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    if tracing_subscriber::registry()
        .with(layers)
        .with(env_filter)
        .try_init()
        .is_err()
    {
        return LoggingGuard { _workers: workers };
    }

    tracing::info!(
        log_dir = %config.log_dir.display(),
        log_level = %config.log_level,
        stderr = config.stderr,
        json = config.json,
        "Logging initialized"
    );

    setup_panic_hook();

    LoggingGuard { _workers: workers }
}

/// Set up panic hook to log panics with full context
fn setup_panic_hook() {
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let location = panic_info
            .location()
            .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()))
            .unwrap_or_else(|| "unknown location".to_string());

        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "unknown panic message".to_string()
        };

        let trace_id = super::trace_context::get_trace_id().unwrap_or_default();
        tracing::error!(
            trace_id = %trace_id,
            location = %location,
            message = %message,
            "Application panic"
        );

        let backtrace = std::backtrace::Backtrace::force_capture();
        tracing::error!(backtrace = %backtrace, "Panic backtrace");

        default_panic(panic_info);
    }));
}
