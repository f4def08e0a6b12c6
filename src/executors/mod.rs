//! Executors Layer
//!
//! Node executors turn an input batch into the node's output channels.

pub mod http_request;
pub mod parameters;

use crate::error::Result;
use crate::types::{ExecutionContext, NodeExecutionData, NodeOutput};

pub use http_request::{HttpRequestContextExecutor, NODE_TYPE, build_request};
pub use parameters::{ParameterFn, ParameterSource, parameters_fn};

/// Entry point the host calls once per workflow run with the full batch.
#[async_trait::async_trait]
pub trait NodeExecutor: Send + Sync {
    /// Node type this executor handles
    fn node_type(&self) -> &str;

    /// Execute the node. On success the result holds one output channel with
    /// exactly one record per input item.
    async fn execute(
        &self,
        items: &[NodeExecutionData],
        ctx: &ExecutionContext,
    ) -> Result<NodeOutput>;
}
