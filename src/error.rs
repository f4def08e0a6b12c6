//! Error Handling Module
//!
//! A single error type covers everything that can go wrong while turning one
//! input item into one outbound request. The node never distinguishes error
//! kinds in its output: a failed item only carries the `Display` string of the
//! error. The kinds exist for callers that drive the executor directly.
//!
//! # Example
//!
//! ```rust,ignore
//! use http_context_node::error::{ErrorCategory, NodeError};
//!
//! let error = NodeError::api_error(404, "Not Found", None);
//! assert_eq!(error.category(), ErrorCategory::Http);
//! assert_eq!(error.status_code(), Some(404));
//! ```

use thiserror::Error;

/// Result type used throughout the crate
pub type Result<T, E = NodeError> = std::result::Result<T, E>;

/// Coarse error classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Node parameters could not be resolved or are invalid
    Configuration,
    /// The request body could not be parsed
    Parsing,
    /// The transport failed before a response arrived
    Network,
    /// A response arrived with a non-success status
    Http,
    /// A request hook refused the request
    Interceptor,
}

/// Errors raised while executing the node
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NodeError {
    /// Missing or invalid node parameter
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// A header name or value that cannot be put on the wire
    #[error("Invalid header '{name}': {reason}")]
    InvalidHeader { name: String, reason: String },

    /// JSON parse or serialization failure
    #[error("JSON error: {0}")]
    JsonError(String),

    /// Transport-level failure (DNS, connect, TLS, timeout, ...)
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Non-success response status
    #[error("Request failed with status code {code}: {message}")]
    ApiError {
        code: u16,
        message: String,
        body: Option<String>,
    },

    /// Raised by an interceptor to veto a request
    #[error("Interceptor error: {0}")]
    InterceptorError(String),
}

impl NodeError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError(message.into())
    }

    pub fn invalid_header(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::InvalidHeader {
            name: name.into(),
            reason: reason.to_string(),
        }
    }

    pub fn api_error(code: u16, message: impl Into<String>, body: Option<String>) -> Self {
        Self::ApiError {
            code,
            message: message.into(),
            body,
        }
    }

    /// Classify the error
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigurationError(_) | Self::InvalidHeader { .. } => {
                ErrorCategory::Configuration
            }
            Self::JsonError(_) => ErrorCategory::Parsing,
            Self::HttpError(_) => ErrorCategory::Network,
            Self::ApiError { .. } => ErrorCategory::Http,
            Self::InterceptorError(_) => ErrorCategory::Interceptor,
        }
    }

    /// HTTP status code, when the error came from a response
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::ApiError { code, .. } => Some(*code),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for NodeError {
    fn from(err: reqwest::Error) -> Self {
        Self::HttpError(err.to_string())
    }
}

impl From<serde_json::Error> for NodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: NodeError = json_err.into();
        assert_eq!(err.category(), ErrorCategory::Parsing);
        assert!(err.to_string().starts_with("JSON error:"));
    }

    #[test]
    fn api_error_reports_status() {
        let err = NodeError::api_error(503, "Service Unavailable", Some("down".into()));
        assert_eq!(err.status_code(), Some(503));
        assert_eq!(err.category(), ErrorCategory::Http);
        assert_eq!(
            err.to_string(),
            "Request failed with status code 503: Service Unavailable"
        );
    }

    #[test]
    fn invalid_header_is_a_configuration_error() {
        let err = NodeError::invalid_header("bad name", "invalid HTTP header name");
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert_eq!(err.status_code(), None);
    }
}
