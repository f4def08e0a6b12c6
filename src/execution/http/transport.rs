//! HTTP transport abstraction.
//!
//! The node never talks to the network itself. It assembles a
//! [`HttpTransportRequest`] and hands it to an injected [`HttpTransport`].
//! [`ReqwestTransport`] is the default implementation; tests and hosts with
//! their own HTTP stack provide another.

use crate::error::{NodeError, Result};
use crate::types::{HttpConfig, HttpMethod};
use async_trait::async_trait;
use reqwest::header::HeaderMap;
use serde_json::Value;

/// Outgoing request body
#[derive(Debug, Clone, PartialEq)]
pub enum RequestBody {
    /// Structured value, serialized as JSON
    Json(Value),
    /// Sent byte-for-byte
    Raw(String),
}

/// Transport-level request data.
#[derive(Debug, Clone)]
pub struct HttpTransportRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Option<RequestBody>,
}

/// The HTTP capability the node delegates to.
///
/// Implementations return the response body as a JSON value (objects,
/// arrays, scalars or a plain string) and report transport failures and
/// non-success statuses as errors.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn send(&self, request: HttpTransportRequest) -> Result<Value>;
}

/// Default transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with a client configured from `config`.
    pub fn new(config: &HttpConfig) -> Result<Self> {
        Ok(Self {
            client: build_http_client(config)?,
        })
    }

    /// Use an existing client as-is.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::with_client(reqwest::Client::new())
    }
}

/// Build a `reqwest::Client` from the HTTP configuration.
pub fn build_http_client(config: &HttpConfig) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = config.timeout {
        builder = builder.timeout(timeout);
    }
    if let Some(connect_timeout) = config.connect_timeout {
        builder = builder.connect_timeout(connect_timeout);
    }
    if let Some(user_agent) = &config.user_agent {
        builder = builder.user_agent(user_agent.clone());
    }
    if let Some(proxy) = &config.proxy {
        let proxy = reqwest::Proxy::all(proxy)
            .map_err(|e| NodeError::configuration(format!("Invalid proxy URL: {e}")))?;
        builder = builder.proxy(proxy);
    }
    builder
        .build()
        .map_err(|e| NodeError::configuration(format!("Failed to create HTTP client: {e}")))
}

/// Interpret a response body the way the host's helper does: JSON when it
/// parses, the text otherwise.
pub fn parse_response_body(text: String) -> Value {
    if text.is_empty() {
        return Value::String(text);
    }
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpTransportRequest) -> Result<Value> {
        let mut rb = self
            .client
            .request(request.method.into(), &request.url)
            .headers(request.headers);
        rb = match request.body {
            Some(RequestBody::Json(body)) => rb.json(&body),
            Some(RequestBody::Raw(body)) => rb.body(body),
            None => rb,
        };

        let resp = rb.send().await?;
        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            return Err(NodeError::api_error(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown status"),
                (!text.is_empty()).then_some(text),
            ));
        }

        Ok(parse_response_body(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_json_and_falls_back_to_text() {
        assert_eq!(parse_response_body(r#"{"ok":true}"#.into()), json!({ "ok": true }));
        assert_eq!(parse_response_body("[1,2]".into()), json!([1, 2]));
        assert_eq!(parse_response_body("plain text".into()), json!("plain text"));
        assert_eq!(parse_response_body(String::new()), json!(""));
    }

    #[test]
    fn builds_client_from_config() {
        let config = HttpConfig::builder()
            .timeout(Some(std::time::Duration::from_secs(3)))
            .connect_timeout(Some(std::time::Duration::from_secs(1)))
            .user_agent(Some("test-agent"))
            .proxy(Some("http://127.0.0.1:3128"))
            .build();
        assert!(ReqwestTransport::new(&config).is_ok());
    }
}
