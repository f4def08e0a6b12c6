//! Workflow and execution context types.
//!
//! The host hands these to the node explicitly on every invocation; nothing
//! here is read from global state.

use crate::defaults::context::UNKNOWN;
use serde::{Deserialize, Serialize};

/// Facts about the workflow instance that is currently running.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowContext {
    /// Workflow identifier, if the host knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Workflow display name, if the host knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl WorkflowContext {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            name: Some(name.into()),
        }
    }

    /// A context for a workflow the host could not identify.
    pub fn unnamed() -> Self {
        Self::default()
    }

    /// Workflow id, or `"unknown"` when absent.
    pub fn id(&self) -> &str {
        self.id.as_deref().unwrap_or(UNKNOWN)
    }

    /// Workflow name, or `"unknown"` when absent.
    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or(UNKNOWN)
    }
}

/// Everything the executor needs from the host besides the items and the
/// HTTP capability.
#[derive(Debug, Clone, Default)]
pub struct ExecutionContext {
    pub workflow: WorkflowContext,
    /// Emit a failure record and keep going instead of failing the batch
    pub continue_on_fail: bool,
}

impl ExecutionContext {
    pub fn new(workflow: WorkflowContext) -> Self {
        Self {
            workflow,
            continue_on_fail: false,
        }
    }

    pub fn with_continue_on_fail(mut self, continue_on_fail: bool) -> Self {
        self.continue_on_fail = continue_on_fail;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_fields_fall_back_to_unknown() {
        let ctx = WorkflowContext::unnamed();
        assert_eq!(ctx.id(), "unknown");
        assert_eq!(ctx.name(), "unknown");
    }

    #[test]
    fn empty_strings_are_kept() {
        let ctx = WorkflowContext {
            id: Some(String::new()),
            name: Some("demo".into()),
        };
        assert_eq!(ctx.id(), "");
        assert_eq!(ctx.name(), "demo");
    }

    #[test]
    fn deserializes_partial_context() {
        let ctx: WorkflowContext = serde_json::from_str(r#"{"id":"42"}"#).unwrap();
        assert_eq!(ctx.id(), "42");
        assert_eq!(ctx.name(), "unknown");
    }
}
