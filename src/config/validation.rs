// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashSet;

use crate::config::pattern::{OutputsSpec, Pattern};
use crate::engine::INPUTS_KEY;
use crate::errors::PatternValidationError;

/// Validate a pattern definition after deserialization.
///
/// Runs at load time so a malformed pattern is rejected before any run
/// can select it.
pub fn validate_pattern(pattern: &Pattern) -> Result<(), PatternValidationError> {
    if pattern.steps.is_empty() {
        return Err(PatternValidationError::EmptyPattern {
            pattern_id: pattern.id.clone(),
        });
    }

    for (step_index, step) in pattern.steps.iter().enumerate() {
        if step.capability.trim().is_empty() {
            return Err(PatternValidationError::BlankCapability {
                pattern_id: pattern.id.clone(),
                step_index,
            });
        }
        if step.result_key.trim().is_empty() {
            return Err(PatternValidationError::BlankResultKey {
                pattern_id: pattern.id.clone(),
                step_index,
            });
        }
        if step.result_key == INPUTS_KEY {
            return Err(PatternValidationError::ReservedResultKey {
                pattern_id: pattern.id.clone(),
                step_index,
            });
        }
    }

    if let OutputsSpec::PanelList(panels) = &pattern.outputs {
        let mut seen = HashSet::new();
        for panel in panels {
            if !seen.insert(panel.id.as_str()) {
                return Err(PatternValidationError::DuplicatePanelId {
                    pattern_id: pattern.id.clone(),
                    panel_id: panel.id.clone(),
                });
            }
        }
    }

    Ok(())
}
