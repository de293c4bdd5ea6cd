// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;

use crate::engine::ExecutionState;

/// Look up a dot-separated path against the run state.
///
/// The first segment names a state key (the reserved `inputs` root reaches
/// the pattern's invocation arguments, which are stored under that key);
/// remaining segments descend into object fields of the stored value.
pub fn lookup_path<'a>(state: &'a ExecutionState, path: &str) -> Option<&'a Value> {
    let mut segments = path.split('.').map(str::trim).filter(|s| !s.is_empty());

    let root = segments.next()?;
    let mut current = state.get(root)?;
    for segment in segments {
        current = current.as_object()?.get(segment)?;
    }
    Some(current)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn state() -> ExecutionState {
        let mut state = ExecutionState::with_inputs(json!({"ticker": "SPX"}));
        state.insert("series", json!({"meta": {"points": 12}, "value": 7}));
        state
    }

    #[test]
    fn test_lookup_top_level_and_nested() {
        let state = state();
        assert_eq!(lookup_path(&state, "series.value"), Some(&json!(7)));
        assert_eq!(lookup_path(&state, "series.meta.points"), Some(&json!(12)));
        assert_eq!(
            lookup_path(&state, "series"),
            Some(&json!({"meta": {"points": 12}, "value": 7}))
        );
    }

    #[test]
    fn test_lookup_inputs_root() {
        let state = state();
        assert_eq!(lookup_path(&state, "inputs.ticker"), Some(&json!("SPX")));
    }

    #[test]
    fn test_lookup_missing_paths() {
        let state = state();
        assert_eq!(lookup_path(&state, "series.missing"), None);
        assert_eq!(lookup_path(&state, "absent"), None);
        assert_eq!(lookup_path(&state, "inputs.missing_field"), None);
        // Descending through a non-object is a miss, not a panic.
        assert_eq!(lookup_path(&state, "series.value.deeper"), None);
    }

    #[test]
    fn test_lookup_tolerates_whitespace_segments() {
        let state = state();
        assert_eq!(lookup_path(&state, " series . value "), Some(&json!(7)));
        assert_eq!(lookup_path(&state, ""), None);
    }
}
