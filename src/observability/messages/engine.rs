// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for pattern run lifecycle and step execution events.

use std::fmt::{Display, Formatter};
use tracing::Span;

use crate::observability::messages::StructuredLog;

/// A pattern run started.
///
/// # Log Level
/// `info!` - important operational event
pub struct RunStarted<'a> {
    pub pattern_id: &'a str,
    pub step_count: usize,
    pub depth: u32,
}

impl Display for RunStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Starting pattern '{}': {} steps, depth={}",
            self.pattern_id, self.step_count, self.depth
        )
    }
}

impl StructuredLog for RunStarted<'_> {
    fn log(&self) {
        tracing::info!(
            pattern_id = self.pattern_id,
            step_count = self.step_count,
            depth = self.depth,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "pattern_run",
            span_name = name,
            pattern_id = self.pattern_id,
            step_count = self.step_count,
            depth = self.depth,
        )
    }
}

/// A pattern run completed successfully.
///
/// # Log Level
/// `info!` - important operational event
pub struct RunCompleted<'a> {
    pub pattern_id: &'a str,
    pub step_count: usize,
    pub duration: std::time::Duration,
}

impl Display for RunCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Pattern '{}' completed: {} steps in {:?}",
            self.pattern_id, self.step_count, self.duration
        )
    }
}

impl StructuredLog for RunCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            pattern_id = self.pattern_id,
            step_count = self.step_count,
            duration_ms = self.duration.as_millis() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "pattern_run_completed",
            span_name = name,
            pattern_id = self.pattern_id,
            step_count = self.step_count,
            duration = ?self.duration,
        )
    }
}

/// A pattern run aborted with a run-level error.
///
/// # Log Level
/// `error!` - failure requiring attention
pub struct RunFailed<'a> {
    pub pattern_id: &'a str,
    pub error: &'a dyn std::error::Error,
}

impl Display for RunFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Pattern '{}' failed: {}", self.pattern_id, self.error)
    }
}

impl StructuredLog for RunFailed<'_> {
    fn log(&self) {
        tracing::error!(
            pattern_id = self.pattern_id,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "pattern_run_failed",
            span_name = name,
            pattern_id = self.pattern_id,
            error = %self.error,
        )
    }
}

/// A non-critical step failed and was recovered into the run state.
///
/// # Log Level
/// `warn!` - degraded but the run continues
pub struct StepRecovered<'a> {
    pub step_index: usize,
    pub capability: &'a str,
    pub result_key: &'a str,
    pub error: &'a str,
}

impl Display for StepRecovered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Step {} ('{}' -> '{}') failed and was recovered: {}",
            self.step_index, self.capability, self.result_key, self.error
        )
    }
}

impl StructuredLog for StepRecovered<'_> {
    fn log(&self) {
        tracing::warn!(
            step_index = self.step_index,
            capability = self.capability,
            result_key = self.result_key,
            error = self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "step_recovered",
            span_name = name,
            step_index = self.step_index,
            capability = self.capability,
            result_key = self.result_key,
        )
    }
}

/// A step overwrote an existing state key (last write wins).
///
/// # Log Level
/// `warn!` - allowed, but worth surfacing
pub struct StateKeyOverwritten<'a> {
    pub key: &'a str,
    pub step_index: usize,
}

impl Display for StateKeyOverwritten<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Step {} overwrote existing state key '{}'",
            self.step_index, self.key
        )
    }
}

impl StructuredLog for StateKeyOverwritten<'_> {
    fn log(&self) {
        tracing::warn!(key = self.key, step_index = self.step_index, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "state_key_overwritten",
            span_name = name,
            key = self.key,
            step_index = self.step_index,
        )
    }
}
