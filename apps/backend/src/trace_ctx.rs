//! Task-local trace context for web requests.
//!
//! Provides a minimal API for accessing the current request's trace_id from
//! anywhere in the request processing pipeline, using Tokio's task-local
//! storage. Background tasks spawned off a request re-establish their own
//! scope with the originating trace_id so log lines stay correlated.

use std::cell::RefCell;

use tokio::task_local;

task_local! {
    static TRACE_ID: RefCell<Option<String>>;
}

/// Get the trace_id for the current task.
/// Returns "unknown" if no trace_id is set (e.g., outside of a request context).
pub fn trace_id() -> String {
    TRACE_ID
        .try_with(|cell| {
            cell.borrow()
                .as_ref()
                .cloned()
                .unwrap_or_else(|| "unknown".to_string())
        })
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Run a future within a trace context.
/// Used by middleware and by background-task spawns to establish the scope.
pub async fn with_trace_id<F, R>(trace_id: String, future: F) -> R
where
    F: std::future::Future<Output = R>,
{
    TRACE_ID.scope(RefCell::new(Some(trace_id)), future).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn trace_id_outside_context_is_unknown() {
        assert_eq!(trace_id(), "unknown");
    }

    #[tokio::test]
    async fn trace_id_within_context() {
        let result = with_trace_id("trace-123".to_string(), async {
            assert_eq!(trace_id(), "trace-123");
            "done"
        })
        .await;

        assert_eq!(result, "done");
        assert_eq!(trace_id(), "unknown");
    }
}
