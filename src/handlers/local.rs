// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Simple in-process handlers used by the demo binary.

use async_trait::async_trait;
use serde_json::{json, Value};

use crate::engine::RunContext;
use crate::errors::HandlerError;
use crate::traits::Handler;

/// Echoes the resolved args back as the step result.
pub struct EchoHandler {
    name: String,
}

impl EchoHandler {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl Handler for EchoHandler {
    async fn invoke(&self, args: Value, ctx: &RunContext) -> Result<Value, HandlerError> {
        Ok(json!({
            "handler": self.name,
            "args": args,
            "depth": ctx.depth,
        }))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Returns a fixed value regardless of args.
pub struct ConstantHandler {
    name: String,
    value: Value,
}

impl ConstantHandler {
    pub fn new(name: impl Into<String>, value: Value) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

#[async_trait]
impl Handler for ConstantHandler {
    async fn invoke(&self, _args: Value, _ctx: &RunContext) -> Result<Value, HandlerError> {
        Ok(self.value.clone())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_echo_reflects_args_and_depth() {
        let handler = EchoHandler::new("echo");
        let ctx = RunContext::new().child();

        let result = handler.invoke(json!({"k": 1}), &ctx).await.unwrap();

        assert_eq!(result["args"], json!({"k": 1}));
        assert_eq!(result["depth"], json!(1));
    }
}
