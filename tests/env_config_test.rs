//! Environment-driven configuration.
//!
//! Everything that touches the process environment lives in one test so the
//! variables never change under a concurrently running test.

use std::time::Duration;

use http_context_node::defaults;
use http_context_node::prelude::*;
use http_context_node::telemetry;

struct EnvGuard {
    key: &'static str,
    previous: Option<String>,
}

impl EnvGuard {
    fn set(key: &'static str, value: &str) -> Self {
        let previous = std::env::var(key).ok();
        unsafe {
            std::env::set_var(key, value);
        }
        Self { key, previous }
    }

    fn remove(key: &'static str) -> Self {
        let previous = std::env::var(key).ok();
        unsafe {
            std::env::remove_var(key);
        }
        Self { key, previous }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.previous {
            Some(v) => unsafe {
                std::env::set_var(self.key, v);
            },
            None => unsafe {
                std::env::remove_var(self.key);
            },
        }
    }
}

#[test]
fn environment_overrides_timeout_and_validates_log_settings() {
    {
        let _g = EnvGuard::remove(defaults::http::TIMEOUT_ENV);
        assert_eq!(HttpConfig::default().timeout, Some(Duration::from_secs(30)));
    }
    {
        let _g = EnvGuard::set(defaults::http::TIMEOUT_ENV, "7");
        assert_eq!(HttpConfig::default().timeout, Some(Duration::from_secs(7)));
    }
    for unusable in ["", "  ", "soon"] {
        let _g = EnvGuard::set(defaults::http::TIMEOUT_ENV, unusable);
        assert_eq!(
            HttpConfig::default().timeout,
            Some(defaults::http::REQUEST_TIMEOUT),
            "{unusable:?}"
        );
    }

    // Both rejections happen before any subscriber is installed.
    {
        let _level = EnvGuard::remove("HTTP_CONTEXT_NODE_LOG_LEVEL");
        let _format = EnvGuard::set("HTTP_CONTEXT_NODE_LOG_FORMAT", "yaml");
        let err = telemetry::init_from_env().err().expect("rejected before installing");
        assert!(err.to_string().contains("Invalid log format: yaml"));
    }
    {
        let _level = EnvGuard::set("HTTP_CONTEXT_NODE_LOG_LEVEL", "loud");
        let _format = EnvGuard::remove("HTTP_CONTEXT_NODE_LOG_FORMAT");
        let err = telemetry::init_from_env().err().expect("rejected before installing");
        assert!(err.to_string().contains("Invalid log level: loud"));
    }
}
