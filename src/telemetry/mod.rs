//! Tracing subscriber setup
//!
//! The library itself only emits `tracing` events. Hosts that do not install
//! their own subscriber can use these helpers.
//!
//! ## Example
//!
//! ```rust,ignore
//! use http_context_node::telemetry::{init_subscriber, OutputFormat, SubscriberConfig};
//!
//! let config = SubscriberConfig::builder()
//!     .log_level(tracing::Level::DEBUG)
//!     .output_format(OutputFormat::Json)
//!     .build();
//! let _guard = init_subscriber(config)?;
//! ```

use crate::error::{NodeError, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Output format for tracing logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text format
    #[default]
    Text,
    /// JSON format
    Json,
    /// Compact JSON format
    JsonCompact,
}

impl std::str::FromStr for OutputFormat {
    type Err = NodeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "json-compact" => Ok(Self::JsonCompact),
            "text" => Ok(Self::Text),
            _ => Err(NodeError::configuration(format!(
                "Invalid log format: {s}. Valid options: text, json, json-compact"
            ))),
        }
    }
}

/// Configuration for tracing subscriber
#[derive(Debug, Clone)]
pub struct SubscriberConfig {
    /// Log level
    pub log_level: tracing::Level,
    /// Output format
    pub output_format: OutputFormat,
    /// Log file path. When set, logs go to the file instead of stdout.
    pub log_file: Option<std::path::PathBuf>,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            log_level: tracing::Level::INFO,
            output_format: OutputFormat::Text,
            log_file: None,
        }
    }
}

impl SubscriberConfig {
    pub fn builder() -> SubscriberConfigBuilder {
        SubscriberConfigBuilder::default()
    }

    /// Create a debug configuration
    pub fn debug() -> Self {
        Self {
            log_level: tracing::Level::DEBUG,
            ..Self::default()
        }
    }

    /// JSON logs at WARN, written to `log_file`
    pub fn production(log_file: std::path::PathBuf) -> Self {
        Self {
            log_level: tracing::Level::WARN,
            output_format: OutputFormat::Json,
            log_file: Some(log_file),
        }
    }

    fn filter(&self) -> EnvFilter {
        let level = self.log_level.to_string().to_lowercase();
        EnvFilter::new(format!("http_context_node={level}"))
    }
}

/// Builder for SubscriberConfig
#[derive(Debug, Default)]
pub struct SubscriberConfigBuilder {
    log_level: Option<tracing::Level>,
    output_format: Option<OutputFormat>,
    log_file: Option<std::path::PathBuf>,
}

impl SubscriberConfigBuilder {
    pub fn log_level(mut self, level: tracing::Level) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Set the log level from a string
    pub fn log_level_str(mut self, level: &str) -> Result<Self> {
        let level = level.parse::<tracing::Level>().map_err(|_| {
            NodeError::configuration(format!(
                "Invalid log level: {level}. Valid options: trace, debug, info, warn, error"
            ))
        })?;
        self.log_level = Some(level);
        Ok(self)
    }

    pub fn output_format(mut self, format: OutputFormat) -> Self {
        self.output_format = Some(format);
        self
    }

    pub fn log_file(mut self, path: std::path::PathBuf) -> Self {
        self.log_file = Some(path);
        self
    }

    pub fn build(self) -> SubscriberConfig {
        SubscriberConfig {
            log_level: self.log_level.unwrap_or(tracing::Level::INFO),
            output_format: self.output_format.unwrap_or_default(),
            log_file: self.log_file,
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// Returns the file writer guard when file logging is enabled; it must be
/// kept alive for as long as logs should be flushed. An already installed
/// global subscriber is not an error.
pub fn init_subscriber(config: SubscriberConfig) -> Result<Option<WorkerGuard>> {
    let (writer, guard) = match &config.log_file {
        Some(path) => {
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            let file_name = path.file_name().ok_or_else(|| {
                NodeError::configuration(format!("Invalid log file path: {}", path.display()))
            })?;
            let appender = tracing_appender::rolling::never(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            (Some(writer), Some(guard))
        }
        None => (None, None),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(config.filter())
        .with_target(true);

    let init_result = match (config.output_format, writer) {
        (OutputFormat::Text, None) => builder.try_init(),
        (OutputFormat::Text, Some(w)) => builder.with_ansi(false).with_writer(w).try_init(),
        (OutputFormat::Json, None) => builder.json().try_init(),
        (OutputFormat::Json, Some(w)) => builder.json().with_writer(w).try_init(),
        (OutputFormat::JsonCompact, None) => builder.json().flatten_event(true).try_init(),
        (OutputFormat::JsonCompact, Some(w)) => {
            builder.json().flatten_event(true).with_writer(w).try_init()
        }
    };

    match init_result {
        Ok(()) => Ok(guard),
        Err(e) => {
            if e.to_string().contains("already been set") {
                Ok(None)
            } else {
                Err(NodeError::configuration(format!(
                    "Failed to initialize tracing: {e}"
                )))
            }
        }
    }
}

/// Initialize from environment variables
///
/// - `HTTP_CONTEXT_NODE_LOG_LEVEL`: trace, debug, info, warn, error
/// - `HTTP_CONTEXT_NODE_LOG_FORMAT`: text, json, json-compact
/// - `HTTP_CONTEXT_NODE_LOG_FILE`: log file path
pub fn init_from_env() -> Result<Option<WorkerGuard>> {
    let mut builder = SubscriberConfig::builder();

    if let Ok(level) = std::env::var("HTTP_CONTEXT_NODE_LOG_LEVEL") {
        builder = builder.log_level_str(&level)?;
    }

    if let Ok(format) = std::env::var("HTTP_CONTEXT_NODE_LOG_FORMAT") {
        builder = builder.output_format(format.parse()?);
    }

    if let Ok(file) = std::env::var("HTTP_CONTEXT_NODE_LOG_FILE") {
        builder = builder.log_file(file.into());
    }

    init_subscriber(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_log_levels() {
        let config = SubscriberConfig::builder()
            .log_level_str("DEBUG")
            .unwrap()
            .build();
        assert_eq!(config.log_level, tracing::Level::DEBUG);
        assert!(SubscriberConfig::builder().log_level_str("loud").is_err());
    }

    #[test]
    fn production_logs_json_to_file() {
        let config = SubscriberConfig::production("/var/log/node.log".into());
        assert_eq!(config.output_format, OutputFormat::Json);
        assert_eq!(config.log_level, tracing::Level::WARN);
        assert!(config.log_file.is_some());
    }

    #[test]
    fn parses_output_formats() {
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("json-compact".parse::<OutputFormat>().unwrap(), OutputFormat::JsonCompact);
        assert_eq!("text".parse::<OutputFormat>().unwrap(), OutputFormat::Text);

        let err = "yaml".parse::<OutputFormat>().unwrap_err();
        assert!(matches!(err, NodeError::ConfigurationError(ref m) if m.contains("yaml")));
    }
}
