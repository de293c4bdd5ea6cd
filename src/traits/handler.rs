use async_trait::async_trait;
use serde_json::Value;

use crate::engine::RunContext;
use crate::errors::HandlerError;

/// The uniform invoke contract every capability handler implements.
///
/// Handlers are the only extension point that performs real work (data
/// fetching, computation); the core never looks inside `args` or the result.
/// Invocation may block on I/O; the engine bounds the wait with a timeout.
#[async_trait]
pub trait Handler: Send + Sync {
    async fn invoke(&self, args: Value, ctx: &RunContext) -> Result<Value, HandlerError>;

    /// Stable handler name used for binding lookup and routing decisions.
    fn name(&self) -> &str;

    /// Liveness probe consulted at routing time. Routing falls back to the
    /// next binding when this returns false.
    fn is_available(&self) -> bool {
        true
    }
}
