//! HTTP Headers Utility
//!
//! Builds the outgoing header set: the two workflow context headers first,
//! then the user's custom headers on top. Header names are case-insensitive,
//! so a custom `x-workflow-id` replaces the seeded `X-Workflow-Id`.

use crate::defaults::context::{WORKFLOW_ID_HEADER, WORKFLOW_NAME_HEADER};
use crate::error::{NodeError, Result};
use crate::types::{HeaderParameter, WorkflowContext};
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;

/// Insert (or replace) a header, validating name and value.
///
/// Values are taken as raw bytes so non-ASCII workflow names survive; control
/// characters are still rejected.
pub fn insert_header(headers: &mut HeaderMap, name: &str, value: &str) -> Result<()> {
    let header_name = HeaderName::from_bytes(name.as_bytes())
        .map_err(|e| NodeError::invalid_header(name, e))?;
    let header_value = HeaderValue::from_bytes(value.as_bytes())
        .map_err(|e| NodeError::invalid_header(name, e))?;
    headers.insert(header_name, header_value);
    Ok(())
}

/// Seed a header map with the workflow id and name.
pub fn context_headers(workflow: &WorkflowContext) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();
    insert_header(&mut headers, WORKFLOW_ID_HEADER, workflow.id())?;
    insert_header(&mut headers, WORKFLOW_NAME_HEADER, workflow.name())?;
    Ok(headers)
}

/// Apply custom headers in declared order; later entries win.
pub fn apply_custom_headers(headers: &mut HeaderMap, custom: &[HeaderParameter]) -> Result<()> {
    for header in custom {
        insert_header(headers, &header.name, &header.value)?;
    }
    Ok(())
}

/// Force `Content-Type: application/json`.
pub fn set_json_content_type(headers: &mut HeaderMap) {
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
}

/// Convert reqwest HeaderMap to HashMap<String, String>
///
/// Names come out lowercased. Non UTF-8 values are decoded lossily.
pub fn headermap_to_hashmap(headers: &HeaderMap) -> HashMap<String, String> {
    headers
        .iter()
        .map(|(k, v)| {
            (
                k.as_str().to_string(),
                String::from_utf8_lossy(v.as_bytes()).into_owned(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_context_headers() {
        let headers = context_headers(&WorkflowContext::new("42", "demo")).unwrap();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("x-workflow-id").unwrap(), "42");
        assert_eq!(headers.get("X-Workflow-Name").unwrap(), "demo");
    }

    #[test]
    fn custom_headers_override_in_order() {
        let mut headers = context_headers(&WorkflowContext::unnamed()).unwrap();
        apply_custom_headers(
            &mut headers,
            &[
                HeaderParameter::new("X-Workflow-Id", "override"),
                HeaderParameter::new("X-Custom", "first"),
                HeaderParameter::new("x-custom", "second"),
            ],
        )
        .unwrap();

        assert_eq!(headers.get("X-Workflow-Id").unwrap(), "override");
        assert_eq!(headers.get("X-Workflow-Name").unwrap(), "unknown");
        assert_eq!(headers.get_all("X-Custom").iter().count(), 1);
        assert_eq!(headers.get("X-Custom").unwrap(), "second");
    }

    #[test]
    fn rejects_invalid_names_and_values() {
        let mut headers = HeaderMap::new();
        let err = insert_header(&mut headers, "", "v").unwrap_err();
        assert!(matches!(err, NodeError::InvalidHeader { .. }));

        let err = insert_header(&mut headers, "bad name", "v").unwrap_err();
        assert!(matches!(err, NodeError::InvalidHeader { ref name, .. } if name == "bad name"));

        let err = insert_header(&mut headers, "X-Line", "a\r\nb").unwrap_err();
        assert!(matches!(err, NodeError::InvalidHeader { .. }));
    }

    #[test]
    fn keeps_non_ascii_workflow_names() {
        let headers = context_headers(&WorkflowContext::new("7", "Überweisung")).unwrap();
        let map = headermap_to_hashmap(&headers);
        assert_eq!(map["x-workflow-name"], "Überweisung");
    }

    #[test]
    fn json_content_type_replaces_existing_value() {
        let mut headers = HeaderMap::new();
        insert_header(&mut headers, "content-type", "text/plain").unwrap();
        set_json_content_type(&mut headers);
        assert_eq!(headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }
}
