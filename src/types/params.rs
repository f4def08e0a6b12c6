//! Node parameters
//!
//! Typed replacement for resolving parameters by name at run time. A host
//! parameter object is deserialized once per item into [`RequestParameters`],
//! with every optional field falling back to the node's declared default.

use crate::defaults;
use crate::error::{NodeError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// HTTP methods the node can send
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpMethod {
    Delete,
    #[default]
    Get,
    Head,
    Options,
    Patch,
    Post,
    Put,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 7] = [
        HttpMethod::Delete,
        HttpMethod::Get,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Patch,
        HttpMethod::Post,
        HttpMethod::Put,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Delete => "DELETE",
            HttpMethod::Get => "GET",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = NodeError;

    fn from_str(s: &str) -> Result<Self> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| NodeError::configuration(format!("Unsupported HTTP method: {s}")))
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Delete => reqwest::Method::DELETE,
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Head => reqwest::Method::HEAD,
            HttpMethod::Options => reqwest::Method::OPTIONS,
            HttpMethod::Patch => reqwest::Method::PATCH,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
        }
    }
}

/// How the request body is encoded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyContentType {
    #[default]
    #[serde(rename = "json")]
    Json,
    /// Selectable but not encoded: the request goes out without a body.
    #[serde(rename = "form-urlencoded")]
    FormUrlencoded,
    #[serde(rename = "raw")]
    Raw,
}

impl BodyContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BodyContentType::Json => "json",
            BodyContentType::FormUrlencoded => "form-urlencoded",
            BodyContentType::Raw => "raw",
        }
    }
}

/// A single user-defined header
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderParameter {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub value: String,
}

impl HeaderParameter {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// The `headerParameters` collection as the host stores it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderParameters {
    #[serde(default)]
    pub parameters: Vec<HeaderParameter>,
}

fn default_json_body() -> serde_json::Value {
    serde_json::Value::String(defaults::params::JSON_BODY.to_string())
}

/// Resolved parameters for one item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestParameters {
    #[serde(default)]
    pub method: HttpMethod,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub send_headers: bool,
    #[serde(default)]
    pub header_parameters: HeaderParameters,
    #[serde(default)]
    pub send_body: bool,
    #[serde(default)]
    pub body_content_type: BodyContentType,
    /// Either a JSON document held in a string, or an already structured value
    #[serde(default = "default_json_body")]
    pub json_body: serde_json::Value,
    #[serde(default)]
    pub raw_body: String,
}

impl Default for RequestParameters {
    fn default() -> Self {
        Self {
            method: HttpMethod::default(),
            url: String::new(),
            send_headers: false,
            header_parameters: HeaderParameters::default(),
            send_body: false,
            body_content_type: BodyContentType::default(),
            json_body: default_json_body(),
            raw_body: String::new(),
        }
    }
}

impl RequestParameters {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            ..Default::default()
        }
    }

    /// Deserialize a host parameter object.
    pub fn from_value(value: &serde_json::Value) -> Result<Self> {
        Self::deserialize(value)
            .map_err(|e| NodeError::configuration(format!("Invalid node parameters: {e}")))
    }

    /// Check the parameters that have no usable default.
    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(NodeError::configuration("URL is required"));
        }
        Ok(())
    }

    /// Append a custom header and enable header sending.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.send_headers = true;
        self.header_parameters
            .parameters
            .push(HeaderParameter::new(name, value));
        self
    }

    pub fn with_send_headers(mut self, send_headers: bool) -> Self {
        self.send_headers = send_headers;
        self
    }

    /// Send a JSON body. Strings are parsed at request time.
    pub fn with_json_body(mut self, body: impl Into<serde_json::Value>) -> Self {
        self.send_body = true;
        self.body_content_type = BodyContentType::Json;
        self.json_body = body.into();
        self
    }

    /// Send a raw body exactly as given.
    pub fn with_raw_body(mut self, body: impl Into<String>) -> Self {
        self.send_body = true;
        self.body_content_type = BodyContentType::Raw;
        self.raw_body = body.into();
        self
    }

    pub fn with_body_content_type(mut self, content_type: BodyContentType) -> Self {
        self.send_body = true;
        self.body_content_type = content_type;
        self
    }

    /// Custom headers to apply; empty unless `send_headers` is set.
    pub fn custom_headers(&self) -> &[HeaderParameter] {
        if self.send_headers {
            &self.header_parameters.parameters
        } else {
            &[]
        }
    }
}
