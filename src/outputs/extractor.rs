// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Shapes run state into the pattern's declared output structure.
//!
//! Extraction is total: missing keys become null with a warning, never an
//! error. Panel ids that have no exact state key are reconciled through a
//! fuzzy scan (suffix rule, then prefix rule) over state keys in insertion
//! order; the first hit wins and is logged for auditing.

use std::collections::HashMap;

use serde_json::Value;

use crate::config::{OutputsSpec, PanelEntry};
use crate::engine::ExecutionState;
use crate::observability::messages::outputs::{FuzzyKeyMatched, OrphanPanelId, OutputKeyMissing};
use crate::observability::messages::StructuredLog;

pub struct OutputExtractor;

impl OutputExtractor {
    /// Extract declared outputs from the final run state.
    pub fn extract(spec: &OutputsSpec, state: &ExecutionState) -> HashMap<String, Value> {
        match spec {
            OutputsSpec::FlatList(keys) => {
                Self::extract_flat(keys.iter().map(String::as_str), state)
            }
            // Map values are informational metadata only; extraction uses
            // the key set alone.
            OutputsSpec::FlatMap(entries) => {
                Self::extract_flat(entries.keys().map(String::as_str), state)
            }
            OutputsSpec::PanelList(panels) => Self::extract_panels(panels, state),
        }
    }

    fn extract_flat<'a>(
        keys: impl Iterator<Item = &'a str>,
        state: &ExecutionState,
    ) -> HashMap<String, Value> {
        let mut result = HashMap::new();
        for key in keys {
            let value = match state.get(key) {
                Some(value) => value.clone(),
                None => {
                    OutputKeyMissing { key }.log();
                    Value::Null
                }
            };
            result.insert(key.to_string(), value);
        }
        result
    }

    fn extract_panels(panels: &[PanelEntry], state: &ExecutionState) -> HashMap<String, Value> {
        let mut result = HashMap::new();
        for panel in panels {
            let value = match Self::match_panel(&panel.id, state) {
                Some((state_key, value, rule)) => {
                    if let Some(rule) = rule {
                        FuzzyKeyMatched {
                            panel_id: &panel.id,
                            state_key,
                            rule,
                        }
                        .log();
                    }
                    value.clone()
                }
                None => {
                    OrphanPanelId {
                        panel_id: &panel.id,
                    }
                    .log();
                    Value::Null
                }
            };
            result.insert(panel.id.clone(), value);
        }
        result
    }

    /// Exact match first, then a suffix pass (`*_<id>`), then a prefix pass
    /// (`<id>_*`). Each pass scans the full key set in insertion order and
    /// the first hit wins, so ambiguity resolves deterministically.
    fn match_panel<'s>(
        panel_id: &str,
        state: &'s ExecutionState,
    ) -> Option<(&'s str, &'s Value, Option<&'static str>)> {
        if let Some(value) = state.get(panel_id) {
            // Borrow the key back out of the order list for a uniform return.
            let key = state.keys().find(|k| *k == panel_id)?;
            return Some((key, value, None));
        }

        let suffix = format!("_{}", panel_id);
        for key in state.keys() {
            if key.ends_with(&suffix) {
                return Some((key, state.get(key)?, Some("suffix")));
            }
        }

        let prefix = format!("{}_", panel_id);
        for key in state.keys() {
            if key.starts_with(&prefix) {
                return Some((key, state.get(key)?, Some("prefix")));
            }
        }

        None
    }
}
