// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Bounded, concurrent log of routing decisions.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::time::SystemTime;

use serde::Serialize;

use crate::engine::RunContext;

/// Why a handler was (or was not) selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteReason {
    Rollout,
    ExplicitMapping,
    PriorityDefault,
    Fallback,
    /// Resolution failed; no handler was selected. Failures are logged with
    /// the same record shape so the decision history is complete.
    Failed,
}

impl RouteReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            RouteReason::Rollout => "rollout",
            RouteReason::ExplicitMapping => "explicit-mapping",
            RouteReason::PriorityDefault => "priority-default",
            RouteReason::Fallback => "fallback",
            RouteReason::Failed => "failed",
        }
    }
}

impl std::fmt::Display for RouteReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of the run context at resolution time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionContext {
    pub identity_key: Option<String>,
    pub pattern_id: Option<String>,
    pub depth: u32,
}

impl From<&RunContext> for DecisionContext {
    fn from(ctx: &RunContext) -> Self {
        Self {
            identity_key: ctx.identity_key.clone(),
            pattern_id: ctx.pattern_id.clone(),
            depth: ctx.depth,
        }
    }
}

/// One routing decision, successful or failed.
#[derive(Debug, Clone, Serialize)]
pub struct RoutingDecision {
    pub timestamp: SystemTime,
    pub capability: String,
    /// Selected handler name; `None` when resolution failed.
    pub handler: Option<String>,
    pub reason: RouteReason,
    pub context: DecisionContext,
}

/// Fixed-capacity ring buffer of routing decisions, oldest evicted first.
///
/// Shared across concurrent runs; append and read are lock-protected.
/// Records persist until evicted or process restart.
pub struct DecisionLog {
    capacity: usize,
    entries: Mutex<VecDeque<RoutingDecision>>,
}

impl DecisionLog {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            capacity,
            entries: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    pub fn append(&self, decision: RoutingDecision) {
        let mut entries = self.entries.lock().expect("decision log lock poisoned");
        if entries.len() == self.capacity {
            entries.pop_front();
        }
        entries.push_back(decision);
    }

    /// The most recent `limit` decisions, in chronological order.
    pub fn recent(&self, limit: usize) -> Vec<RoutingDecision> {
        let entries = self.entries.lock().expect("decision log lock poisoned");
        let skip = entries.len().saturating_sub(limit);
        entries.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .expect("decision log lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
