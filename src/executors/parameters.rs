//! Per-item parameter resolution
//!
//! The host resolves node parameters (expressions included) per input item.
//! A [`ParameterSource`] hands the executor the typed result for one item.

use crate::error::{NodeError, Result};
use crate::types::{NodeExecutionData, RequestParameters};
use serde_json::Value;

pub trait ParameterSource: Send + Sync {
    fn parameters(&self, index: usize, item: &NodeExecutionData) -> Result<RequestParameters>;
}

/// The same parameters for every item.
impl ParameterSource for RequestParameters {
    fn parameters(&self, _index: usize, _item: &NodeExecutionData) -> Result<RequestParameters> {
        Ok(self.clone())
    }
}

/// One entry per item, by position.
impl ParameterSource for Vec<RequestParameters> {
    fn parameters(&self, index: usize, _item: &NodeExecutionData) -> Result<RequestParameters> {
        self.get(index).cloned().ok_or_else(|| {
            NodeError::configuration(format!("No parameters resolved for item {index}"))
        })
    }
}

/// A host parameter object, deserialized for every item.
impl ParameterSource for Value {
    fn parameters(&self, _index: usize, _item: &NodeExecutionData) -> Result<RequestParameters> {
        RequestParameters::from_value(self)
    }
}

/// Closure-backed source, see [`parameters_fn`].
pub struct ParameterFn<F>(F);

impl<F> ParameterSource for ParameterFn<F>
where
    F: Fn(usize, &NodeExecutionData) -> Result<RequestParameters> + Send + Sync,
{
    fn parameters(&self, index: usize, item: &NodeExecutionData) -> Result<RequestParameters> {
        (self.0)(index, item)
    }
}

/// Resolve parameters with a closure, e.g. to read the URL from the item.
pub fn parameters_fn<F>(f: F) -> ParameterFn<F>
where
    F: Fn(usize, &NodeExecutionData) -> Result<RequestParameters> + Send + Sync,
{
    ParameterFn(f)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::HttpMethod;
    use serde_json::json;

    #[test]
    fn indexed_source_reports_missing_entries() {
        let source = vec![RequestParameters::new(HttpMethod::Get, "http://a")];
        let item = NodeExecutionData::default();
        assert_eq!(source.parameters(0, &item).unwrap().url, "http://a");
        assert!(matches!(
            source.parameters(1, &item),
            Err(NodeError::ConfigurationError(_))
        ));
    }

    #[test]
    fn closure_source_reads_item_fields() {
        let source = parameters_fn(|_, item: &NodeExecutionData| {
            let url = item.json.get("url").and_then(Value::as_str).unwrap_or_default();
            Ok(RequestParameters::new(HttpMethod::Post, url))
        });
        let item = NodeExecutionData::from(json!({ "url": "http://b" }));
        let params = source.parameters(0, &item).unwrap();
        assert_eq!(params.method, HttpMethod::Post);
        assert_eq!(params.url, "http://b");
    }

    #[test]
    fn value_source_applies_defaults() {
        let source = json!({ "url": "http://c", "sendBody": true });
        let params = source.parameters(5, &NodeExecutionData::default()).unwrap();
        assert!(params.send_body);
        assert_eq!(params.json_body, json!("{}"));
    }
}
