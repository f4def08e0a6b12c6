//! HTTP Utilities
//!
//! - Header assembly
//! - HTTP interceptors
//! - The transport the node delegates requests to

pub mod headers;
pub mod interceptor;
pub mod transport;

pub use headers::*;
pub use interceptor::*;
pub use transport::*;
