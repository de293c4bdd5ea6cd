// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Pattern orchestration: ordered step execution over shared run state.
//!
//! A run moves LOADED -> RUNNING -> (COMPLETED | FAILED). Steps execute
//! strictly in declared order; there is no implicit parallelism within a
//! run because the run state is one shared mutable structure and the
//! routing trace must read as an ordered narrative. Multiple runs may
//! execute concurrently with fully independent state.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Instant;

use serde_json::Value;

use crate::config::store::PatternStore;
use crate::engine::step_executor::StepExecutor;
use crate::engine::{ExecutionState, RunContext};
use crate::errors::{LoadError, RunError};
use crate::observability::messages::engine::{RunCompleted, RunFailed, RunStarted};
use crate::observability::messages::StructuredLog;
use crate::outputs::OutputExtractor;
use crate::routing::{CapabilityRouter, RoutingDecision};
use crate::traits::PatternLoader;
use crate::config::consts::{
    DEFAULT_DECISION_LOG_CAPACITY, DEFAULT_MAX_RECURSION_DEPTH, DEFAULT_STEP_TIMEOUT_SECS,
};

/// Lifecycle of a single pattern run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Loaded,
    Running,
    Completed,
    Failed,
}

/// Orchestrator tuning knobs.
#[derive(Debug, Clone)]
pub struct OrchestratorOptions {
    /// Bounded wait per handler invocation; a timeout is treated as a
    /// handler error.
    pub step_timeout: std::time::Duration,
    /// Maximum nested pattern depth before `RecursionLimit`.
    pub max_recursion_depth: u32,
    /// Capacity of the shared routing decision ring.
    pub decision_log_capacity: usize,
}

impl Default for OrchestratorOptions {
    fn default() -> Self {
        Self {
            step_timeout: std::time::Duration::from_secs(DEFAULT_STEP_TIMEOUT_SECS),
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
            decision_log_capacity: DEFAULT_DECISION_LOG_CAPACITY,
        }
    }
}

/// Successful run: extracted outputs plus the run's routing trace.
#[derive(Debug)]
pub struct RunResult {
    pub outputs: HashMap<String, Value>,
    pub trace: Vec<RoutingDecision>,
    pub status: RunStatus,
}

/// Aborted run: the run-level error plus the partial trace up to the
/// failure point. Callers always get the trace, never a bare exception.
#[derive(Debug)]
pub struct RunFailure {
    pub error: RunError,
    pub trace: Vec<RoutingDecision>,
}

impl std::fmt::Display for RunFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({} routing decision(s) before failure)",
            self.error,
            self.trace.len()
        )
    }
}

impl std::error::Error for RunFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

/// Runs an ordered list of steps, accumulates state, and delegates to
/// output extraction.
pub struct PatternOrchestrator {
    router: Arc<CapabilityRouter>,
    executor: StepExecutor,
    patterns: PatternStore,
    options: OrchestratorOptions,
}

impl PatternOrchestrator {
    /// Build an orchestrator and load pattern definitions once from the
    /// injected loader. Loading failures surface here, not at run time.
    pub fn new(
        router: Arc<CapabilityRouter>,
        loader: Arc<dyn PatternLoader>,
        options: OrchestratorOptions,
    ) -> Result<Self, LoadError> {
        let patterns = PatternStore::load(loader)?;
        let executor = StepExecutor::new(Arc::clone(&router), options.step_timeout);
        Ok(Self {
            router,
            executor,
            patterns,
            options,
        })
    }

    /// Explicitly reload pattern definitions. Returns the number loaded.
    pub fn reload(&self) -> Result<usize, LoadError> {
        self.patterns.reload()
    }

    pub fn pattern_ids(&self) -> Vec<String> {
        self.patterns.pattern_ids()
    }

    /// The most recent `limit` routing decisions across all runs.
    pub fn routing_decisions(&self, limit: usize) -> Vec<RoutingDecision> {
        self.router.recent_decisions(limit)
    }

    /// Execute a pattern with the given inputs and context.
    pub async fn run_pattern(
        &self,
        pattern_id: &str,
        inputs: Value,
        ctx: &RunContext,
    ) -> Result<RunResult, RunFailure> {
        if ctx.depth > self.options.max_recursion_depth {
            let error = RunError::RecursionLimit {
                depth: ctx.depth,
                max_depth: self.options.max_recursion_depth,
            };
            RunFailed {
                pattern_id,
                error: &error,
            }
            .log();
            return Err(RunFailure {
                error,
                trace: Vec::new(),
            });
        }

        let pattern = self.patterns.get(pattern_id).ok_or_else(|| RunFailure {
            error: RunError::PatternNotFound(pattern_id.to_string()),
            trace: Vec::new(),
        })?;

        // LOADED -> RUNNING
        let started = Instant::now();
        RunStarted {
            pattern_id,
            step_count: pattern.steps.len(),
            depth: ctx.depth,
        }
        .log();

        let mut run_ctx = ctx.clone();
        run_ctx.pattern_id = Some(pattern.id.clone());

        let mut state = ExecutionState::with_inputs(inputs);
        let mut trace: Vec<RoutingDecision> = Vec::with_capacity(pattern.steps.len());

        for (step_index, step) in pattern.steps.iter().enumerate() {
            match self
                .executor
                .execute(step, step_index, &mut state, &run_ctx)
                .await
            {
                Ok(decision) => trace.push(decision),
                Err(failure) => {
                    // RUNNING -> FAILED
                    if let Some(decision) = failure.decision {
                        trace.push(decision);
                    }
                    RunFailed {
                        pattern_id,
                        error: &failure.error,
                    }
                    .log();
                    return Err(RunFailure {
                        error: failure.error,
                        trace,
                    });
                }
            }
        }

        // RUNNING -> COMPLETED
        let outputs = OutputExtractor::extract(&pattern.outputs, &state);
        RunCompleted {
            pattern_id,
            step_count: pattern.steps.len(),
            duration: started.elapsed(),
        }
        .log();

        Ok(RunResult {
            outputs,
            trace,
            status: RunStatus::Completed,
        })
    }
}
