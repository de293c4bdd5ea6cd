// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::{Mutex, Weak};

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::engine::{PatternOrchestrator, RunContext};
use crate::errors::HandlerError;
use crate::traits::Handler;

/// Invokes another pattern as a single step.
///
/// Args: `{ "pattern": "<id>", "inputs": <value> }`. The nested run
/// executes under `ctx.child()`, so the orchestrator's recursion guard
/// bounds pattern-in-pattern depth. Holds the orchestrator weakly; the
/// reference is installed after the orchestrator is built because the
/// orchestrator also owns the registry this handler is bound in.
pub struct NestedPatternHandler {
    name: String,
    orchestrator: Mutex<Weak<PatternOrchestrator>>,
}

impl NestedPatternHandler {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            orchestrator: Mutex::new(Weak::new()),
        }
    }

    pub fn attach(&self, orchestrator: Weak<PatternOrchestrator>) {
        *self
            .orchestrator
            .lock()
            .expect("nested handler lock poisoned") = orchestrator;
    }

    fn orchestrator(&self) -> Result<std::sync::Arc<PatternOrchestrator>, HandlerError> {
        self.orchestrator
            .lock()
            .expect("nested handler lock poisoned")
            .upgrade()
            .ok_or_else(|| HandlerError::new("no orchestrator attached for nested execution"))
    }
}

#[async_trait]
impl Handler for NestedPatternHandler {
    async fn invoke(&self, args: Value, ctx: &RunContext) -> Result<Value, HandlerError> {
        let pattern_id = args
            .get("pattern")
            .and_then(Value::as_str)
            .ok_or_else(|| HandlerError::new("nested invocation requires a 'pattern' arg"))?
            .to_string();
        let inputs = args
            .get("inputs")
            .cloned()
            .unwrap_or(Value::Object(Map::new()));

        let orchestrator = self.orchestrator()?;
        let result = orchestrator
            .run_pattern(&pattern_id, inputs, &ctx.child())
            .await
            .map_err(|failure| HandlerError::new(failure.to_string()))?;

        Ok(Value::Object(result.outputs.into_iter().collect()))
    }

    fn name(&self) -> &str {
        &self.name
    }
}
