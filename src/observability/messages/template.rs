// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for template resolution warnings.

use std::fmt::{Display, Formatter};
use tracing::Span;

use crate::observability::messages::StructuredLog;

/// A templated path did not resolve against the run state.
///
/// Soft resolution policy: the token yields null and the run continues.
///
/// # Log Level
/// `warn!`
pub struct TemplatePathMissing<'a> {
    pub path: &'a str,
}

impl Display for TemplatePathMissing<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Template path '{}' not found in run state; substituting null",
            self.path
        )
    }
}

impl StructuredLog for TemplatePathMissing<'_> {
    fn log(&self) {
        tracing::warn!(path = self.path, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("template_path_missing", span_name = name, path = self.path)
    }
}
