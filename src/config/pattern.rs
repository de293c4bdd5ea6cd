// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Pattern definition structures deserialized from YAML.

use std::collections::HashMap;

use serde::Deserialize;
use serde_json::Value;

/// A declarative workflow: ordered steps plus an output shape.
#[derive(Debug, Clone, Deserialize)]
pub struct Pattern {
    pub id: String,
    pub steps: Vec<Step>,
    pub outputs: OutputsSpec,
}

/// One workflow step.
#[derive(Debug, Clone, Deserialize)]
pub struct Step {
    /// Capability to route, e.g. `fetch.series`.
    pub capability: String,

    /// Templated invocation arguments; `{{path}}` tokens are resolved
    /// against run state before the handler is invoked.
    #[serde(default = "default_args")]
    pub args: Value,

    /// State key the step's result is stored under.
    #[serde(rename = "as")]
    pub result_key: String,

    /// Critical steps abort the whole run on handler failure.
    #[serde(default)]
    pub critical: bool,
}

fn default_args() -> Value {
    Value::Object(serde_json::Map::new())
}

/// Declared shape of a pattern's outputs.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputsSpec {
    /// Copy each listed state key verbatim.
    FlatList(Vec<String>),
    /// Copy each map key verbatim; map values are display metadata and do
    /// not affect extraction.
    FlatMap(HashMap<String, Value>),
    /// Panel entries reconciled to state keys, fuzzily when needed.
    PanelList(Vec<PanelEntry>),
}

#[derive(Debug, Clone, Deserialize)]
pub struct PanelEntry {
    pub id: String,
    /// Optional renderer hint, carried through untouched.
    #[serde(default)]
    pub data_path: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pattern_deserializes_with_defaults() {
        let yaml = r#"
id: market-summary
steps:
  - capability: fetch.series
    as: series
  - capability: compute.trend
    args:
      series: "{{series}}"
    as: trend
    critical: true
outputs:
  flat_list:
    - series
    - trend
"#;
        let pattern: Pattern = serde_yaml::from_str(yaml).unwrap();

        assert_eq!(pattern.id, "market-summary");
        assert_eq!(pattern.steps.len(), 2);
        assert_eq!(pattern.steps[0].args, json!({}));
        assert!(!pattern.steps[0].critical);
        assert_eq!(pattern.steps[1].result_key, "trend");
        assert!(pattern.steps[1].critical);
        match &pattern.outputs {
            OutputsSpec::FlatList(keys) => assert_eq!(keys, &["series", "trend"]),
            other => panic!("unexpected outputs: {:?}", other),
        }
    }

    #[test]
    fn test_panel_list_deserializes_with_optional_data_path() {
        let yaml = r#"
id: dashboard
steps:
  - capability: a.b
    as: cycle_risk_map
outputs:
  panel_list:
    - id: risk_map
      data_path: heat.cells
    - id: summary
"#;
        let pattern: Pattern = serde_yaml::from_str(yaml).unwrap();

        match &pattern.outputs {
            OutputsSpec::PanelList(panels) => {
                assert_eq!(panels[0].data_path.as_deref(), Some("heat.cells"));
                assert_eq!(panels[1].data_path, None);
            }
            other => panic!("unexpected outputs: {:?}", other),
        }
    }

    #[test]
    fn test_flat_map_metadata_is_opaque() {
        let yaml = r#"
id: labelled
steps:
  - capability: a.b
    as: x
outputs:
  flat_map:
    x:
      label: Series X
"#;
        let pattern: Pattern = serde_yaml::from_str(yaml).unwrap();

        match &pattern.outputs {
            OutputsSpec::FlatMap(entries) => {
                assert_eq!(entries["x"], json!({"label": "Series X"}));
            }
            other => panic!("unexpected outputs: {:?}", other),
        }
    }
}
