// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashSet;

use crate::traits::FeatureFlags;

/// Set-backed feature-flag provider for configs, demos, and tests.
///
/// Production deployments hand the router their own `FeatureFlags`
/// implementation; this one treats any flag in the set as active.
#[derive(Debug, Default, Clone)]
pub struct StaticFlags {
    active: HashSet<String>,
}

impl StaticFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enable(mut self, flag: impl Into<String>) -> Self {
        self.active.insert(flag.into());
        self
    }
}

impl<S: Into<String>> FromIterator<S> for StaticFlags {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            active: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl FeatureFlags for StaticFlags {
    fn is_active(&self, flag: &str) -> bool {
        self.active.contains(flag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_flags() {
        let flags = StaticFlags::new().enable("consolidate");
        assert!(flags.is_active("consolidate"));
        assert!(!flags.is_active("other"));

        let flags: StaticFlags = ["a", "b"].into_iter().collect();
        assert!(flags.is_active("a"));
        assert!(flags.is_active("b"));
        assert!(!flags.is_active("c"));
    }
}
