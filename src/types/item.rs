//! Input and output records exchanged with the host.

use crate::defaults::context::{WORKFLOW_ID_HEADER, WORKFLOW_NAME_HEADER};
use crate::types::WorkflowContext;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Back-reference from an output record to the input record that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedItem {
    pub item: usize,
}

/// One record flowing through the workflow
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeExecutionData {
    #[serde(default)]
    pub json: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub paired_item: Option<PairedItem>,
}

/// Node result: one inner list per output channel. This node has one.
pub type NodeOutput = Vec<Vec<NodeExecutionData>>;

impl NodeExecutionData {
    pub fn new(json: Map<String, Value>) -> Self {
        Self {
            json,
            paired_item: None,
        }
    }

    pub fn with_paired_item(mut self, item: usize) -> Self {
        self.paired_item = Some(PairedItem { item });
        self
    }

    /// Shape a response into a success record.
    ///
    /// Object-like responses are spread into the record: an object as is,
    /// an array keyed by position (`"0"`, `"1"`, ...) and `null` as nothing.
    /// Strings, numbers and booleans are put under `data`.
    /// `_metadata.injectedHeaders` always reports the workflow context values,
    /// even if a custom header replaced them on the wire.
    pub fn success(response: Value, workflow: &WorkflowContext, item: usize) -> Self {
        let mut json = match response {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            Value::Array(values) => values
                .into_iter()
                .enumerate()
                .map(|(i, v)| (i.to_string(), v))
                .collect(),
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        json.insert(
            "_metadata".to_string(),
            json!({
                "injectedHeaders": {
                    WORKFLOW_ID_HEADER: workflow.id(),
                    WORKFLOW_NAME_HEADER: workflow.name(),
                }
            }),
        );
        Self::new(json).with_paired_item(item)
    }

    /// Shape an error message into a failure record.
    pub fn failure(message: impl Into<String>, item: usize) -> Self {
        let mut json = Map::new();
        json.insert("error".to_string(), Value::String(message.into()));
        Self::new(json).with_paired_item(item)
    }

    pub fn is_failure(&self) -> bool {
        self.json.len() == 1 && self.json.get("error").is_some_and(Value::is_string)
    }
}

impl From<Value> for NodeExecutionData {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::new(map),
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                Self::new(map)
            }
        }
    }
}
