//! HTTP request executor with workflow context injection
//!
//! For every input item the executor resolves the node parameters, seeds the
//! headers with `X-Workflow-Id` / `X-Workflow-Name`, layers the custom headers
//! and body on top and hands the request to the injected transport. Items are
//! processed strictly in order, one request at a time.

use crate::description::NodeDescription;
use crate::error::Result;
use crate::execution::http::{
    HttpInterceptor, HttpRequestContext, HttpTransport, HttpTransportRequest, ReqwestTransport,
    RequestBody, apply_custom_headers, context_headers, set_json_content_type,
};
use crate::executors::NodeExecutor;
use crate::executors::parameters::ParameterSource;
use crate::types::{
    BodyContentType, ExecutionContext, HttpConfig, NodeExecutionData, NodeOutput,
    RequestParameters, WorkflowContext,
};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tracing::Instrument;

/// Node type name registered with the host
pub const NODE_TYPE: &str = "httpRequestContext";

/// Assemble the outgoing request for one item.
///
/// `Content-Type: application/json` is set after the custom headers, so it
/// wins over a user-supplied `Content-Type` when a JSON body is sent.
pub fn build_request(
    params: &RequestParameters,
    workflow: &WorkflowContext,
) -> Result<HttpTransportRequest> {
    params.validate()?;

    let mut headers = context_headers(workflow)?;
    apply_custom_headers(&mut headers, params.custom_headers())?;

    let mut request = HttpTransportRequest {
        method: params.method,
        url: params.url.clone(),
        headers,
        body: None,
    };

    if params.send_body {
        match params.body_content_type {
            BodyContentType::Json => {
                let body = match &params.json_body {
                    Value::String(text) => serde_json::from_str(text)?,
                    other => other.clone(),
                };
                request.body = Some(RequestBody::Json(body));
                set_json_content_type(&mut request.headers);
            }
            BodyContentType::Raw => {
                request.body = Some(RequestBody::Raw(params.raw_body.clone()));
            }
            BodyContentType::FormUrlencoded => {
                // No form fields are collected, so nothing is encoded or sent.
                tracing::warn!(
                    target: "http_context_node::executor",
                    url = %params.url,
                    "form-urlencoded body is not supported; sending request without a body"
                );
            }
        }
    }

    Ok(request)
}

/// Executor for the `httpRequestContext` node.
pub struct HttpRequestContextExecutor {
    transport: Arc<dyn HttpTransport>,
    parameters: Arc<dyn ParameterSource>,
    interceptors: Vec<Arc<dyn HttpInterceptor>>,
}

impl HttpRequestContextExecutor {
    pub fn new(transport: Arc<dyn HttpTransport>, parameters: Arc<dyn ParameterSource>) -> Self {
        Self {
            transport,
            parameters,
            interceptors: Vec::new(),
        }
    }

    /// Use the default reqwest transport configured from `config`.
    pub fn with_http_config(
        config: &HttpConfig,
        parameters: Arc<dyn ParameterSource>,
    ) -> Result<Self> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::new(Arc::new(transport), parameters))
    }

    pub fn with_interceptor(mut self, interceptor: Arc<dyn HttpInterceptor>) -> Self {
        self.interceptors.push(interceptor);
        self
    }

    /// Configuration schema shown by the host.
    pub fn description(&self) -> NodeDescription {
        NodeDescription::http_request_context()
    }

    async fn execute_item(
        &self,
        index: usize,
        item: &NodeExecutionData,
        workflow: &WorkflowContext,
    ) -> Result<NodeExecutionData> {
        let params = self.parameters.parameters(index, item)?;
        let request = build_request(&params, workflow)?;
        let ctx = HttpRequestContext::from_request(index, &request);

        for interceptor in &self.interceptors {
            if let Err(e) = interceptor.on_before_send(&ctx, &request) {
                self.notify_error(&ctx, &e);
                return Err(e);
            }
        }

        match self.transport.send(request).await {
            Ok(response) => {
                for interceptor in &self.interceptors {
                    interceptor.on_response(&ctx, &response);
                }
                Ok(NodeExecutionData::success(response, workflow, index))
            }
            Err(e) => {
                self.notify_error(&ctx, &e);
                Err(e)
            }
        }
    }

    fn notify_error(&self, ctx: &HttpRequestContext, error: &crate::error::NodeError) {
        for interceptor in &self.interceptors {
            interceptor.on_error(ctx, error);
        }
    }
}

#[async_trait]
impl NodeExecutor for HttpRequestContextExecutor {
    fn node_type(&self) -> &str {
        NODE_TYPE
    }

    async fn execute(
        &self,
        items: &[NodeExecutionData],
        ctx: &ExecutionContext,
    ) -> Result<NodeOutput> {
        let mut records = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            let span = tracing::debug_span!(target: "http_context_node::executor", "item", index);
            match self
                .execute_item(index, item, &ctx.workflow)
                .instrument(span)
                .await
            {
                Ok(record) => records.push(record),
                Err(error) if ctx.continue_on_fail => {
                    tracing::warn!(target: "http_context_node::executor", index, err = %error, "item failed, continuing");
                    records.push(NodeExecutionData::failure(error.to_string(), index));
                }
                Err(error) => {
                    tracing::error!(target: "http_context_node::executor", index, err = %error, "item failed, aborting batch");
                    return Err(error);
                }
            }
        }

        Ok(vec![records])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::NodeError;
    use crate::types::{HttpMethod, WorkflowContext};
    use reqwest::header::CONTENT_TYPE;
    use serde_json::json;

    fn workflow() -> WorkflowContext {
        WorkflowContext::new("42", "demo")
    }

    #[test]
    fn get_without_body_has_only_context_headers() {
        let params = RequestParameters::new(HttpMethod::Get, "https://example.com");
        let request = build_request(&params, &workflow()).unwrap();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(request.headers.len(), 2);
        assert!(request.body.is_none());
    }

    #[test]
    fn custom_headers_are_added_after_context_headers() {
        let params = RequestParameters::new(HttpMethod::Get, "https://example.com")
            .with_header("X-Custom", "abc");
        let request = build_request(&params, &workflow()).unwrap();
        assert_eq!(request.headers.len(), 3);
        assert_eq!(request.headers.get("X-Workflow-Id").unwrap(), "42");
        assert_eq!(request.headers.get("X-Workflow-Name").unwrap(), "demo");
        assert_eq!(request.headers.get("X-Custom").unwrap(), "abc");
    }

    #[test]
    fn json_body_string_is_parsed_and_content_type_forced() {
        let params = RequestParameters::new(HttpMethod::Post, "https://example.com")
            .with_header("Content-Type", "text/plain")
            .with_json_body(r#"{"a":1}"#);
        let request = build_request(&params, &workflow()).unwrap();
        assert_eq!(request.body, Some(RequestBody::Json(json!({ "a": 1 }))));
        assert_eq!(request.headers.get(CONTENT_TYPE).unwrap(), "application/json");
    }

    #[test]
    fn structured_json_body_passes_through() {
        let params = RequestParameters::new(HttpMethod::Put, "https://example.com")
            .with_json_body(json!({ "nested": [1, 2] }));
        let request = build_request(&params, &workflow()).unwrap();
        assert_eq!(request.body, Some(RequestBody::Json(json!({ "nested": [1, 2] }))));
    }

    #[test]
    fn malformed_json_body_is_an_error() {
        let params = RequestParameters::new(HttpMethod::Post, "https://example.com")
            .with_json_body("{not json");
        let err = build_request(&params, &workflow()).unwrap_err();
        assert!(matches!(err, NodeError::JsonError(_)));
    }

    #[test]
    fn raw_body_is_sent_verbatim_without_content_type() {
        let params = RequestParameters::new(HttpMethod::Post, "https://example.com")
            .with_raw_body("  line one\nline two  ");
        let request = build_request(&params, &workflow()).unwrap();
        assert_eq!(
            request.body,
            Some(RequestBody::Raw("  line one\nline two  ".to_string()))
        );
        assert!(request.headers.get(CONTENT_TYPE).is_none());
    }

    #[test]
    #[tracing_test::traced_test]
    fn form_urlencoded_sends_no_body() {
        let params = RequestParameters::new(HttpMethod::Post, "https://example.com")
            .with_body_content_type(BodyContentType::FormUrlencoded);
        let request = build_request(&params, &workflow()).unwrap();
        assert!(request.body.is_none());
        assert!(request.headers.get(CONTENT_TYPE).is_none());
        assert!(logs_contain("form-urlencoded body is not supported"));
    }

    #[test]
    fn body_fields_are_ignored_unless_send_body() {
        let mut params = RequestParameters::new(HttpMethod::Post, "https://example.com")
            .with_json_body("{not json");
        params.send_body = false;
        let request = build_request(&params, &workflow()).unwrap();
        assert!(request.body.is_none());
        assert!(request.headers.get(CONTENT_TYPE).is_none());
    }

    struct Unreachable;

    #[async_trait]
    impl HttpTransport for Unreachable {
        async fn send(&self, _request: HttpTransportRequest) -> Result<Value> {
            Err(NodeError::HttpError("unreachable".into()))
        }
    }

    #[test]
    fn every_failed_item_keeps_its_index() {
        let node = HttpRequestContextExecutor::new(
            Arc::new(Unreachable),
            Arc::new(RequestParameters::new(HttpMethod::Get, "https://example.com")),
        );
        let items = vec![NodeExecutionData::default(); 3];
        let ctx = ExecutionContext::new(workflow()).with_continue_on_fail(true);

        let output = tokio_test::block_on(node.execute(&items, &ctx)).unwrap();

        let indexes: Vec<usize> = output[0]
            .iter()
            .filter(|r| r.is_failure())
            .filter_map(|r| r.paired_item.map(|p| p.item))
            .collect();
        assert_eq!(indexes, vec![0, 1, 2]);
    }

    #[test]
    fn empty_url_is_a_configuration_error() {
        let params = RequestParameters::new(HttpMethod::Get, "");
        let err = build_request(&params, &workflow()).unwrap_err();
        assert!(matches!(err, NodeError::ConfigurationError(_)));
    }
}
