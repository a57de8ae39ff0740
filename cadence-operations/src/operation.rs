//! Operation metadata and execution traits

use async_trait::async_trait;
use serde_json::Value;

use crate::ExecutionResult;

/// Metadata for an operation: a verb applied to a noun.
///
/// Implemented by command structs. The canonical op string ("add task",
/// "move task") is what shows up in activity log entries.
pub trait Operation {
    /// The verb (e.g. "add", "move", "delete")
    fn verb(&self) -> &'static str;

    /// The noun the verb acts on (e.g. "task", "section")
    fn noun(&self) -> &'static str;

    /// One-line description of what the operation does
    fn description(&self) -> &'static str;

    /// Canonical op string (e.g. "add task")
    fn op_string(&self) -> String {
        format!("{} {}", self.verb(), self.noun())
    }

    /// IDs of resources touched by this operation, extracted from its result
    fn affected_resource_ids(&self, result: &Value) -> Vec<String> {
        result
            .get("id")
            .and_then(|v| v.as_str())
            .map(|id| vec![id.to_string()])
            .unwrap_or_default()
    }
}

/// Execute an operation against a context
#[async_trait]
pub trait Execute<C, E> {
    /// Run the operation and report the payload plus its logging disposition
    async fn execute(&self, ctx: &C) -> ExecutionResult<Value, E>;
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Probe;

    impl Operation for Probe {
        fn verb(&self) -> &'static str {
            "probe"
        }
        fn noun(&self) -> &'static str {
            "thing"
        }
        fn description(&self) -> &'static str {
            "Probe a thing"
        }
    }

    #[test]
    fn test_op_string() {
        assert_eq!(Probe.op_string(), "probe thing");
    }

    #[test]
    fn test_affected_resource_ids_default() {
        let result = serde_json::json!({"id": "abc123", "title": "Test"});
        assert_eq!(Probe.affected_resource_ids(&result), vec!["abc123"]);

        let no_id = serde_json::json!({"title": "Test"});
        assert!(Probe.affected_resource_ids(&no_id).is_empty());
    }
}
