// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

/// Errors that can occur during pattern definition validation
#[derive(Debug, Clone, PartialEq)]
pub enum PatternValidationError {
    /// A pattern declared no steps
    EmptyPattern {
        /// The offending pattern id
        pattern_id: String,
    },
    /// A step declared a blank capability name
    BlankCapability {
        pattern_id: String,
        step_index: usize,
    },
    /// A step declared a blank result key ("as")
    BlankResultKey {
        pattern_id: String,
        step_index: usize,
    },
    /// A step tried to claim the reserved `inputs` root as its result key
    ReservedResultKey {
        pattern_id: String,
        step_index: usize,
    },
    /// Two panel entries declared the same id
    DuplicatePanelId {
        pattern_id: String,
        panel_id: String,
    },
}

impl fmt::Display for PatternValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PatternValidationError::EmptyPattern { pattern_id } => {
                write!(f, "Pattern '{}' declares no steps", pattern_id)
            }
            PatternValidationError::BlankCapability {
                pattern_id,
                step_index,
            } => {
                write!(
                    f,
                    "Pattern '{}' step {} has a blank capability name",
                    pattern_id, step_index
                )
            }
            PatternValidationError::BlankResultKey {
                pattern_id,
                step_index,
            } => {
                write!(
                    f,
                    "Pattern '{}' step {} has a blank result key",
                    pattern_id, step_index
                )
            }
            PatternValidationError::ReservedResultKey {
                pattern_id,
                step_index,
            } => {
                write!(
                    f,
                    "Pattern '{}' step {} uses the reserved result key 'inputs'",
                    pattern_id, step_index
                )
            }
            PatternValidationError::DuplicatePanelId {
                pattern_id,
                panel_id,
            } => {
                write!(
                    f,
                    "Pattern '{}' declares panel id '{}' more than once",
                    pattern_id, panel_id
                )
            }
        }
    }
}

impl std::error::Error for PatternValidationError {}
