//! Core Data Type Definitions
//!
//! ## Module Organization
//!
//! - **`context`** - Workflow and execution context handed in by the host
//! - **`params`** - Typed node parameters (method, URL, headers, body)
//! - **`item`** - Input/output records and the node output shape
//! - **`http`** - HTTP configuration (`HttpConfig` and builder)

pub mod context;
pub mod http;
pub mod item;
pub mod params;

pub use context::{ExecutionContext, WorkflowContext};
pub use http::{HttpConfig, HttpConfigBuilder};
pub use item::{NodeExecutionData, NodeOutput, PairedItem};
pub use params::{BodyContentType, HeaderParameter, HeaderParameters, HttpMethod, RequestParameters};
