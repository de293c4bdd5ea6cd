// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod execution_state;
pub mod orchestrator;
pub mod run_context;
pub mod step_executor;


pub use execution_state::{ExecutionState, INPUTS_KEY};
pub use orchestrator::{
    OrchestratorOptions, PatternOrchestrator, RunFailure, RunResult, RunStatus,
};
pub use run_context::RunContext;
pub use step_executor::StepExecutor;
