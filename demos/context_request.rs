//! Send one request through the node and print the output records.
//!
//! ```bash
//! cargo run --example context_request -- https://httpbin.org/headers
//! ```

use std::sync::Arc;

use http_context_node::prelude::*;
use http_context_node::telemetry;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _guard = telemetry::init_from_env()?;

    let url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "https://httpbin.org/headers".to_string());

    let params = RequestParameters::new(HttpMethod::Get, url).with_header("X-Custom", "demo");
    let node = HttpRequestContextExecutor::with_http_config(&HttpConfig::default(), Arc::new(params))?
        .with_interceptor(Arc::new(LoggingInterceptor));

    let ctx = ExecutionContext::new(WorkflowContext::new("42", "demo")).with_continue_on_fail(true);
    let output = node.execute(&[NodeExecutionData::default()], &ctx).await?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
