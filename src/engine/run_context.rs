// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;

/// Caller-supplied context threaded through one pattern run.
///
/// Carries the rollout identity key, the nesting depth used by the
/// recursion guard, and free-form attributes for handlers.
#[derive(Debug, Clone, Default)]
pub struct RunContext {
    pub identity_key: Option<String>,
    pub pattern_id: Option<String>,
    pub depth: u32,
    pub attributes: HashMap<String, String>,
}

impl RunContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identity_key(mut self, key: impl Into<String>) -> Self {
        self.identity_key = Some(key.into());
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Context for a nested pattern execution, one level deeper.
    pub fn child(&self) -> Self {
        let mut child = self.clone();
        child.depth += 1;
        child
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_child_increments_depth_and_keeps_identity() {
        let ctx = RunContext::new()
            .with_identity_key("user-42")
            .with_attribute("region", "us");
        let child = ctx.child();

        assert_eq!(child.depth, 1);
        assert_eq!(child.child().depth, 2);
        assert_eq!(child.identity_key.as_deref(), Some("user-42"));
        assert_eq!(child.attributes.get("region").map(String::as_str), Some("us"));
    }
}
