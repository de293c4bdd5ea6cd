// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

use serde_json::Value;

/// Reserved state root holding the pattern's invocation arguments.
pub const INPUTS_KEY: &str = "inputs";

/// Per-run accumulator of step results, keyed by declared result names.
///
/// Created at run start, grows monotonically during the run, and is
/// discarded after output extraction; never shared across runs. Key
/// iteration follows first-insertion order, which is the documented scan
/// order for fuzzy output matching.
#[derive(Debug, Clone, Default)]
pub struct ExecutionState {
    values: HashMap<String, Value>,
    order: Vec<String>,
}

impl ExecutionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State seeded with invocation inputs under the reserved `inputs` key.
    pub fn with_inputs(inputs: Value) -> Self {
        let mut state = Self::new();
        state.insert(INPUTS_KEY, inputs);
        state
    }

    /// Store a value. Returns true when an existing key was overwritten
    /// (allowed; last write wins).
    pub fn insert(&mut self, key: &str, value: Value) -> bool {
        let overwrote = self.values.insert(key.to_string(), value).is_some();
        if !overwrote {
            self.order.push(key.to_string());
        }
        overwrote
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Keys in first-insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insertion_order_is_preserved() {
        let mut state = ExecutionState::new();
        state.insert("b", json!(1));
        state.insert("a", json!(2));
        state.insert("c", json!(3));

        let keys: Vec<&str> = state.keys().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_overwrite_keeps_original_position() {
        let mut state = ExecutionState::new();
        assert!(!state.insert("a", json!(1)));
        state.insert("b", json!(2));
        assert!(state.insert("a", json!(3)));

        assert_eq!(state.get("a"), Some(&json!(3)));
        let keys: Vec<&str> = state.keys().collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_with_inputs_seeds_reserved_key() {
        let state = ExecutionState::with_inputs(json!({"ticker": "SPX"}));
        assert_eq!(state.get(INPUTS_KEY), Some(&json!({"ticker": "SPX"})));
        assert_eq!(state.len(), 1);
    }
}
