//! # http-context-node
//!
//! A workflow automation node that performs an outbound HTTP request and
//! injects the running workflow's identity into it: every request carries
//! `X-Workflow-Id` and `X-Workflow-Name`, so the receiving service knows which
//! workflow called it.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use http_context_node::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let params = RequestParameters::new(HttpMethod::Get, "https://httpbin.org/headers")
//!         .with_header("X-Custom", "abc");
//!     let node = HttpRequestContextExecutor::with_http_config(
//!         &HttpConfig::default(),
//!         Arc::new(params),
//!     )?;
//!
//!     let ctx = ExecutionContext::new(WorkflowContext::new("42", "demo"))
//!         .with_continue_on_fail(true);
//!     let output = node.execute(&[NodeExecutionData::default()], &ctx).await?;
//!     println!("{}", serde_json::to_string_pretty(&output)?);
//!     Ok(())
//! }
//! ```
//!
//! The HTTP call itself is delegated to an [`execution::http::HttpTransport`];
//! the bundled [`execution::http::ReqwestTransport`] is used unless the host
//! injects its own.

#![deny(unsafe_code)]

pub mod defaults;
pub mod description;
pub mod error;
pub mod execution;
pub mod executors;
pub mod telemetry;
pub mod types;

pub use error::{NodeError, Result};

/// Commonly used types
pub mod prelude {
    pub use crate::description::NodeDescription;
    pub use crate::error::{NodeError, Result};
    pub use crate::execution::http::{
        HttpInterceptor, HttpTransport, HttpTransportRequest, LoggingInterceptor,
        ReqwestTransport, RequestBody,
    };
    pub use crate::executors::{
        HttpRequestContextExecutor, NodeExecutor, ParameterSource, parameters_fn,
    };
    pub use crate::types::*;
}
