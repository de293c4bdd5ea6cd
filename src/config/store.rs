// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::config::pattern::Pattern;
use crate::errors::LoadError;
use crate::traits::PatternLoader;

/// Immutable-until-reload cache of pattern definitions.
///
/// Filled once from the injected loader at construction; `reload()` swaps
/// in a fresh set atomically, so in-flight runs keep the `Arc<Pattern>`
/// they already resolved.
pub struct PatternStore {
    loader: Arc<dyn PatternLoader>,
    patterns: RwLock<HashMap<String, Arc<Pattern>>>,
}

impl PatternStore {
    pub fn load(loader: Arc<dyn PatternLoader>) -> Result<Self, LoadError> {
        let patterns = Self::load_all(loader.as_ref())?;
        Ok(Self {
            loader,
            patterns: RwLock::new(patterns),
        })
    }

    fn load_all(loader: &dyn PatternLoader) -> Result<HashMap<String, Arc<Pattern>>, LoadError> {
        let mut patterns = HashMap::new();
        for id in loader.list_patterns()? {
            let pattern = loader.load_pattern(&id)?;
            patterns.insert(id, Arc::new(pattern));
        }
        Ok(patterns)
    }

    pub fn get(&self, id: &str) -> Option<Arc<Pattern>> {
        self.patterns
            .read()
            .expect("pattern store lock poisoned")
            .get(id)
            .cloned()
    }

    /// Re-pull every definition from the loader. Returns the number loaded.
    pub fn reload(&self) -> Result<usize, LoadError> {
        let fresh = Self::load_all(self.loader.as_ref())?;
        let count = fresh.len();
        *self
            .patterns
            .write()
            .expect("pattern store lock poisoned") = fresh;
        Ok(count)
    }

    pub fn pattern_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .patterns
            .read()
            .expect("pattern store lock poisoned")
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }
}
