//! Execution result types for operations

use std::time::Instant;

use serde_json::Value;

use crate::LogEntry;

/// Result of executing an operation
///
/// Distinguishes between:
/// - Logged: Operations that mutate state and should be audited
/// - Unlogged: Read-only operations with no side effects
/// - Failed: Errors (optionally logged)
pub enum ExecutionResult<T, E> {
    /// Operation succeeded and should be logged
    Logged { value: T, log_entry: LogEntry },
    /// Operation succeeded but no logging needed (read-only)
    Unlogged { value: T },
    /// Operation failed
    Failed {
        error: E,
        log_entry: Option<LogEntry>,
    },
}

impl<T, E> ExecutionResult<T, E> {
    /// Extract the result (Ok or Err)
    pub fn into_result(self) -> Result<T, E> {
        match self {
            Self::Logged { value, .. } => Ok(value),
            Self::Unlogged { value } => Ok(value),
            Self::Failed { error, .. } => Err(error),
        }
    }

    /// Get the value and log entry separately
    pub fn split(self) -> (Result<T, E>, Option<LogEntry>) {
        match self {
            Self::Logged { value, log_entry } => (Ok(value), Some(log_entry)),
            Self::Unlogged { value } => (Ok(value), None),
            Self::Failed { error, log_entry } => (Err(error), log_entry),
        }
    }

    /// Check if this should be logged
    pub fn should_log(&self) -> bool {
        matches!(
            self,
            Self::Logged { .. }
                | Self::Failed {
                    log_entry: Some(_),
                    ..
                }
        )
    }
}

impl<E: std::fmt::Display> ExecutionResult<Value, E> {
    /// Wrap a mutation outcome, capturing a log entry for success and failure
    pub fn logged(
        op: impl Into<String>,
        input: Value,
        result: Result<Value, E>,
        started: Instant,
    ) -> Self {
        let duration_ms = started.elapsed().as_millis() as u64;
        match result {
            Ok(value) => Self::Logged {
                log_entry: LogEntry::success(op, input, value.clone(), duration_ms),
                value,
            },
            Err(error) => {
                let message = error.to_string();
                Self::Failed {
                    error,
                    log_entry: Some(LogEntry::failure(op, input, &message, duration_ms)),
                }
            }
        }
    }

    /// Wrap a read-only outcome; nothing is logged either way
    pub fn unlogged(result: Result<Value, E>) -> Self {
        match result {
            Ok(value) => Self::Unlogged { value },
            Err(error) => Self::Failed {
                error,
                log_entry: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logged_success_captures_entry() {
        let started = Instant::now();
        let result: ExecutionResult<Value, String> = ExecutionResult::logged(
            "add task",
            serde_json::json!({"title": "Test"}),
            Ok(serde_json::json!({"id": "abc"})),
            started,
        );

        assert!(result.should_log());
        let (value, entry) = result.split();
        assert_eq!(value.unwrap()["id"], "abc");
        assert_eq!(entry.unwrap().op, "add task");
    }

    #[test]
    fn test_logged_failure_captures_entry() {
        let started = Instant::now();
        let result: ExecutionResult<Value, String> = ExecutionResult::logged(
            "move task",
            Value::Null,
            Err("task not found: xyz".to_string()),
            started,
        );

        assert!(result.should_log());
        let (value, entry) = result.split();
        assert!(value.is_err());
        assert_eq!(entry.unwrap().output["error"], "task not found: xyz");
    }

    #[test]
    fn test_unlogged_never_logs() {
        let ok: ExecutionResult<Value, String> =
            ExecutionResult::unlogged(Ok(serde_json::json!({"id": "abc"})));
        assert!(!ok.should_log());

        let err: ExecutionResult<Value, String> =
            ExecutionResult::unlogged(Err("missing".to_string()));
        assert!(!err.should_log());
        assert!(err.into_result().is_err());
    }
}
