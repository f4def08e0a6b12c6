//! HTTP Interceptor interfaces
//!
//! Interceptors observe each outgoing request, its response and any error.
//! `on_before_send` may refuse a request; the refusal is handled like any
//! other per-item failure. The hooks are best-effort and should avoid
//! expensive work.

use crate::error::{NodeError, Result};
use crate::execution::http::transport::HttpTransportRequest;
use crate::types::HttpMethod;
use serde_json::Value;

/// Context passed to interceptors describing the request.
#[derive(Clone, Debug)]
pub struct HttpRequestContext {
    pub item_index: usize,
    pub method: HttpMethod,
    pub url: String,
}

impl HttpRequestContext {
    pub fn from_request(item_index: usize, request: &HttpTransportRequest) -> Self {
        Self {
            item_index,
            method: request.method,
            url: request.url.clone(),
        }
    }
}

/// HTTP interceptor trait
pub trait HttpInterceptor: Send + Sync {
    /// Called before the request is handed to the transport.
    fn on_before_send(
        &self,
        _ctx: &HttpRequestContext,
        _request: &HttpTransportRequest,
    ) -> Result<()> {
        Ok(())
    }

    /// Called after a successful response.
    fn on_response(&self, _ctx: &HttpRequestContext, _response: &Value) {}

    /// Called when the request fails.
    fn on_error(&self, _ctx: &HttpRequestContext, _error: &NodeError) {}
}

/// A simple logging interceptor backed by `tracing` (no header values or bodies).
#[derive(Clone, Default)]
pub struct LoggingInterceptor;

impl HttpInterceptor for LoggingInterceptor {
    fn on_before_send(
        &self,
        ctx: &HttpRequestContext,
        request: &HttpTransportRequest,
    ) -> Result<()> {
        tracing::debug!(
            target: "http_context_node::http",
            item = ctx.item_index,
            method = %ctx.method,
            url = %ctx.url,
            headers = request.headers.len(),
            has_body = request.body.is_some(),
            "sending request"
        );
        Ok(())
    }

    fn on_response(&self, ctx: &HttpRequestContext, _response: &Value) {
        tracing::debug!(target: "http_context_node::http", item = ctx.item_index, url = %ctx.url, "response received");
    }

    fn on_error(&self, ctx: &HttpRequestContext, error: &NodeError) {
        tracing::debug!(target: "http_context_node::http", item = ctx.item_index, url = %ctx.url, err = %error, "request error");
    }
}
