//! Default Configuration Values
//!
//! Centralizes the constants the node relies on.

use std::time::Duration;

/// Workflow context header defaults
pub mod context {
    /// Header carrying the running workflow's identifier
    pub const WORKFLOW_ID_HEADER: &str = "X-Workflow-Id";

    /// Header carrying the running workflow's display name
    pub const WORKFLOW_NAME_HEADER: &str = "X-Workflow-Name";

    /// Reported when the host does not know the workflow id or name
    pub const UNKNOWN: &str = "unknown";
}

/// HTTP client default configurations
pub mod http {
    use super::*;

    /// Default request timeout for HTTP requests
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Default connection timeout for establishing HTTP connections
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Default User-Agent string for HTTP requests
    pub const USER_AGENT: &str = concat!("http-context-node/", env!("CARGO_PKG_VERSION"));

    /// Environment variable overriding [`REQUEST_TIMEOUT`], in whole seconds
    pub const TIMEOUT_ENV: &str = "HTTP_CONTEXT_NODE_TIMEOUT_SECS";
}

/// Node parameter defaults
pub mod params {
    /// Default JSON body when none is configured
    pub const JSON_BODY: &str = "{}";
}
