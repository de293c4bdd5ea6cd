// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use super::routing::RoutingError;

/// Run-level errors that abort a pattern execution.
///
/// Per-step handler failures on non-critical steps are *not* represented
/// here; those are recovered into the run state as `{"error": ...}` values.
/// Everything in this enum halts the run and is returned together with the
/// partial routing trace accumulated so far.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RunError {
    #[error("pattern '{0}' was not found")]
    PatternNotFound(String),

    /// A step flagged `critical` failed; no later steps were executed.
    #[error("critical step {step_index} ('{capability}' -> '{result_key}') failed: {message}")]
    CriticalStepFailed {
        step_index: usize,
        capability: String,
        result_key: String,
        message: String,
    },

    /// Nested pattern execution exceeded the configured depth limit.
    #[error("nested pattern execution reached depth {depth}, exceeding the configured maximum of {max_depth}")]
    RecursionLimit { depth: u32, max_depth: u32 },

    /// Routing could not produce a handler for a step's capability.
    #[error(transparent)]
    Routing(#[from] RoutingError),
}
