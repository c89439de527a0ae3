//! Trace IDs for correlating the log lines of one command.
//!
//! Each command runs inside a `command` span carrying a fresh UUID, so every
//! request it makes (and any panic) can be tied back to it in the log file.

use std::future::Future;
use std::time::Instant;

use parking_lot::Mutex;
use tracing::Instrument;
use uuid::Uuid;

static CURRENT: Mutex<Option<String>> = Mutex::new(None);

pub fn new_trace_id() -> String {
    Uuid::new_v4().to_string()
}

/// Trace ID of the command in progress, if any.
pub fn get_trace_id() -> Option<String> {
    CURRENT.lock().clone()
}

fn set_trace_id(id: Option<String>) {
    *CURRENT.lock() = id;
}

/// Span for one command, with a fresh trace ID.
pub fn command_span(command: &str) -> (String, tracing::Span) {
    let trace_id = new_trace_id();
    let span = tracing::info_span!("command", name = %command, trace_id = %trace_id);
    (trace_id, span)
}

/// Run `f` inside a command span. The trace ID is passed to `f` and stays
/// readable through [`get_trace_id`] until `f` completes.
pub async fn with_trace_id_async<F, Fut, R>(command: &str, f: F) -> R
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = R>,
{
    let (trace_id, span) = command_span(command);
    set_trace_id(Some(trace_id.clone()));

    let start = Instant::now();
    let result = f(trace_id.clone()).instrument(span).await;

    set_trace_id(None);
    tracing::debug!(
        trace_id = %trace_id,
        command,
        duration_ms = start.elapsed().as_millis(),
        "Command completed"
    );
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_ids_are_unique_uuids() {
        let a = new_trace_id();
        let b = new_trace_id();
        assert_ne!(a, b);
        assert!(Uuid::parse_str(&a).is_ok());
    }

    #[tokio::test]
    async fn test_trace_id_visible_during_command() {
        let seen = with_trace_id_async("test", |id| async move {
            assert_eq!(get_trace_id().as_deref(), Some(id.as_str()));
            id
        })
        .await;
        assert!(Uuid::parse_str(&seen).is_ok());
        assert!(get_trace_id().is_none());
    }
}
