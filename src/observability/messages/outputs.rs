// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for output extraction events.

use std::fmt::{Display, Formatter};
use tracing::Span;

use crate::observability::messages::StructuredLog;

/// A declared output key had no matching state entry.
///
/// # Log Level
/// `warn!` - the output is emitted as null
pub struct OutputKeyMissing<'a> {
    pub key: &'a str,
}

impl Display for OutputKeyMissing<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Declared output key '{}' not present in run state; emitting null",
            self.key
        )
    }
}

impl StructuredLog for OutputKeyMissing<'_> {
    fn log(&self) {
        tracing::warn!(key = self.key, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("output_key_missing", span_name = name, key = self.key)
    }
}

/// A panel id was reconciled to a state key through fuzzy matching.
///
/// # Log Level
/// `warn!` - the match is heuristic and worth auditing
pub struct FuzzyKeyMatched<'a> {
    pub panel_id: &'a str,
    pub state_key: &'a str,
    pub rule: &'a str,
}

impl Display for FuzzyKeyMatched<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Panel id '{}' matched state key '{}' via {} rule",
            self.panel_id, self.state_key, self.rule
        )
    }
}

impl StructuredLog for FuzzyKeyMatched<'_> {
    fn log(&self) {
        tracing::warn!(
            panel_id = self.panel_id,
            state_key = self.state_key,
            rule = self.rule,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "fuzzy_key_matched",
            span_name = name,
            panel_id = self.panel_id,
            state_key = self.state_key,
            rule = self.rule,
        )
    }
}

/// A panel id matched nothing in the run state.
///
/// # Log Level
/// `warn!` - the panel is emitted as null
pub struct OrphanPanelId<'a> {
    pub panel_id: &'a str,
}

impl Display for OrphanPanelId<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Panel id '{}' matched no state key (exact, suffix, or prefix); emitting null",
            self.panel_id
        )
    }
}

impl StructuredLog for OrphanPanelId<'_> {
    fn log(&self) {
        tracing::warn!(panel_id = self.panel_id, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("orphan_panel_id", span_name = name, panel_id = self.panel_id)
    }
}
