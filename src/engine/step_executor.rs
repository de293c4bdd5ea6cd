// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;

use crate::config::Step;
use crate::engine::{ExecutionState, RunContext};
use crate::errors::{HandlerError, RunError};
use crate::observability::messages::engine::{StateKeyOverwritten, StepRecovered};
use crate::observability::messages::StructuredLog;
use crate::routing::{CapabilityRouter, RoutingDecision};
use crate::template::TemplateResolver;

/// A step abort: the run-level error plus the routing decision for the
/// failing step, when one was made before the failure.
#[derive(Debug)]
pub struct StepFailure {
    pub decision: Option<RoutingDecision>,
    pub error: RunError,
}

/// Executes one workflow step: resolve args, invoke the routed handler,
/// store the result.
pub struct StepExecutor {
    router: Arc<CapabilityRouter>,
    step_timeout: Duration,
}

impl StepExecutor {
    pub fn new(router: Arc<CapabilityRouter>, step_timeout: Duration) -> Self {
        Self {
            router,
            step_timeout,
        }
    }

    /// Execute a step against the run state.
    ///
    /// Handler errors and timeouts on non-critical steps are recovered as
    /// `state[as] = {"error": message}` so later steps still run. Critical
    /// steps and routing failures abort. Exactly one invocation per step;
    /// retry policy belongs to handlers.
    pub async fn execute(
        &self,
        step: &Step,
        step_index: usize,
        state: &mut ExecutionState,
        ctx: &RunContext,
    ) -> Result<RoutingDecision, StepFailure> {
        let args = TemplateResolver::resolve(&step.args, state);

        let (handler, decision) = self
            .router
            .resolve(&step.capability, ctx)
            .map_err(|e| StepFailure {
                decision: None,
                error: RunError::Routing(e),
            })?;

        let invocation = handler.invoke(args, ctx);
        let result = match tokio::time::timeout(self.step_timeout, invocation).await {
            Ok(result) => result,
            Err(_) => Err(HandlerError::new(format!(
                "handler '{}' timed out after {:?}",
                handler.name(),
                self.step_timeout
            ))),
        };

        match result {
            Ok(value) => {
                if state.contains_key(&step.result_key) {
                    StateKeyOverwritten {
                        key: &step.result_key,
                        step_index,
                    }
                    .log();
                }
                state.insert(&step.result_key, value);
                Ok(decision)
            }
            Err(error) => {
                if step.critical {
                    return Err(StepFailure {
                        decision: Some(decision),
                        error: RunError::CriticalStepFailed {
                            step_index,
                            capability: step.capability.clone(),
                            result_key: step.result_key.clone(),
                            message: error.message,
                        },
                    });
                }
                StepRecovered {
                    step_index,
                    capability: &step.capability,
                    result_key: &step.result_key,
                    error: &error.message,
                }
                .log();
                state.insert(&step.result_key, json!({ "error": error.message }));
                Ok(decision)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Step;
    use crate::handlers::stub::{FailingHandler, SlowHandler, StubHandler};
    use crate::registry::CapabilityRegistry;
    use crate::routing::StaticFlags;
    use serde_json::json;

    fn executor_with(handlers: Vec<(&str, Arc<dyn crate::traits::Handler>)>) -> StepExecutor {
        let registry = Arc::new(CapabilityRegistry::new());
        for (capability, handler) in handlers {
            registry.register_default(capability, handler).unwrap();
        }
        let router = Arc::new(CapabilityRouter::new(
            registry,
            Arc::new(StaticFlags::new()),
            16,
        ));
        StepExecutor::new(router, Duration::from_millis(100))
    }

    fn step(capability: &str, args: serde_json::Value, result_key: &str, critical: bool) -> Step {
        Step {
            capability: capability.to_string(),
            args,
            result_key: result_key.to_string(),
            critical,
        }
    }

    #[tokio::test]
    async fn test_result_stored_under_declared_key() {
        let executor = executor_with(vec![(
            "a.b",
            Arc::new(StubHandler::new("h1").returning(json!({"value": 7}))),
        )]);
        let mut state = ExecutionState::with_inputs(json!({}));

        let decision = executor
            .execute(&step("a.b", json!({}), "x", false), 0, &mut state, &RunContext::new())
            .await
            .unwrap();

        assert_eq!(state.get("x"), Some(&json!({"value": 7})));
        assert_eq!(decision.capability, "a.b");
    }

    #[tokio::test]
    async fn test_non_critical_failure_recovered_into_state() {
        let executor = executor_with(vec![(
            "a.b",
            Arc::new(FailingHandler::new("h1", "upstream down")),
        )]);
        let mut state = ExecutionState::with_inputs(json!({}));

        executor
            .execute(&step("a.b", json!({}), "x", false), 0, &mut state, &RunContext::new())
            .await
            .unwrap();

        assert_eq!(state.get("x"), Some(&json!({"error": "upstream down"})));
    }

    #[tokio::test]
    async fn test_critical_failure_aborts_with_decision() {
        let executor = executor_with(vec![(
            "a.b",
            Arc::new(FailingHandler::new("h1", "upstream down")),
        )]);
        let mut state = ExecutionState::with_inputs(json!({}));

        let failure = executor
            .execute(&step("a.b", json!({}), "x", true), 2, &mut state, &RunContext::new())
            .await
            .unwrap_err();

        assert!(failure.decision.is_some());
        assert_eq!(
            failure.error,
            RunError::CriticalStepFailed {
                step_index: 2,
                capability: "a.b".to_string(),
                result_key: "x".to_string(),
                message: "upstream down".to_string(),
            }
        );
        assert!(state.get("x").is_none());
    }

    #[tokio::test]
    async fn test_timeout_treated_as_handler_error() {
        let executor = executor_with(vec![(
            "a.b",
            Arc::new(SlowHandler::new("h1", Duration::from_secs(5), json!(1))),
        )]);
        let mut state = ExecutionState::with_inputs(json!({}));

        executor
            .execute(&step("a.b", json!({}), "x", false), 0, &mut state, &RunContext::new())
            .await
            .unwrap();

        let stored = state.get("x").unwrap();
        let message = stored["error"].as_str().unwrap();
        assert!(message.contains("timed out"), "got: {}", message);
    }

    #[tokio::test]
    async fn test_routing_failure_aborts_without_decision() {
        let executor = executor_with(vec![]);
        let mut state = ExecutionState::with_inputs(json!({}));

        let failure = executor
            .execute(&step("no.such", json!({}), "x", false), 0, &mut state, &RunContext::new())
            .await
            .unwrap_err();

        assert!(failure.decision.is_none());
        assert!(matches!(failure.error, RunError::Routing(_)));
    }

    #[tokio::test]
    async fn test_args_resolved_against_state_before_invocation() {
        let recording = Arc::new(crate::handlers::stub::RecordingHandler::new("h1", json!("ok")));
        let executor = executor_with(vec![("c.d", recording.clone())]);

        let mut state = ExecutionState::with_inputs(json!({}));
        state.insert("x", json!({"value": 7}));

        executor
            .execute(
                &step("c.d", json!({"v": "{{x.value}}"}), "y", false),
                1,
                &mut state,
                &RunContext::new(),
            )
            .await
            .unwrap();

        assert_eq!(recording.calls(), vec![json!({"v": 7})]);
    }
}
