// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Routing configuration: rollout rules, consolidation mappings, and the
//! statically enabled feature flags, declared in YAML.

use std::collections::HashMap;

use serde::Deserialize;

use crate::errors::RoutingError;
use crate::routing::RolloutRule;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RoutingConfig {
    #[serde(default)]
    pub rollouts: Vec<RolloutRuleConfig>,

    /// Source capability -> handler name selected under "explicit-mapping".
    #[serde(default)]
    pub consolidations: HashMap<String, String>,

    /// Flags considered active for this process.
    #[serde(default)]
    pub flags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RolloutRuleConfig {
    pub capability: String,
    pub target: String,
    pub percentage: u32,
    #[serde(default)]
    pub flags: Vec<String>,
}

impl RoutingConfig {
    /// Convert declared rollout entries into validated rules. Percentage
    /// range errors surface here, at load, not during routing.
    pub fn rollout_rules(&self) -> Result<Vec<RolloutRule>, RoutingError> {
        self.rollouts
            .iter()
            .map(|entry| {
                RolloutRule::new(
                    entry.capability.clone(),
                    entry.target.clone(),
                    entry.percentage,
                    entry.flags.clone(),
                )
            })
            .collect()
    }
}
