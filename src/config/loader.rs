// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Pattern loaders.
//!
//! The engine pulls definitions through the `PatternLoader` trait;
//! `DirectoryPatternLoader` is the filesystem implementation used by the
//! demo binary, `InMemoryPatternLoader` serves tests and embedders that
//! assemble patterns programmatically.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::pattern::Pattern;
use crate::config::routing::RoutingConfig;
use crate::config::validation::validate_pattern;
use crate::errors::LoadError;
use crate::traits::PatternLoader;

/// Loads `<id>.yaml` pattern files from a directory.
pub struct DirectoryPatternLoader {
    dir: PathBuf,
}

impl DirectoryPatternLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn read_pattern(&self, path: &Path) -> Result<Pattern, LoadError> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
            path: display.clone(),
            source,
        })?;
        let pattern: Pattern =
            serde_yaml::from_str(&content).map_err(|source| LoadError::Yaml {
                path: display,
                source,
            })?;
        validate_pattern(&pattern)?;
        Ok(pattern)
    }
}

impl PatternLoader for DirectoryPatternLoader {
    fn load_pattern(&self, id: &str) -> Result<Pattern, LoadError> {
        let path = self.dir.join(format!("{}.yaml", id));
        if !path.is_file() {
            return Err(LoadError::PatternNotFound(id.to_string()));
        }
        self.read_pattern(&path)
    }

    fn list_patterns(&self) -> Result<Vec<String>, LoadError> {
        let entries = fs::read_dir(&self.dir).map_err(|source| LoadError::Io {
            path: self.dir.display().to_string(),
            source,
        })?;

        let mut ids = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| LoadError::Io {
                path: self.dir.display().to_string(),
                source,
            })?;
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) == Some("yaml") {
                if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                    ids.push(stem.to_string());
                }
            }
        }
        ids.sort();
        Ok(ids)
    }
}

/// Fixed set of patterns held in memory.
#[derive(Default)]
pub struct InMemoryPatternLoader {
    patterns: HashMap<String, Pattern>,
}

impl InMemoryPatternLoader {
    pub fn new(patterns: impl IntoIterator<Item = Pattern>) -> Self {
        Self {
            patterns: patterns
                .into_iter()
                .map(|pattern| (pattern.id.clone(), pattern))
                .collect(),
        }
    }
}

impl PatternLoader for InMemoryPatternLoader {
    fn load_pattern(&self, id: &str) -> Result<Pattern, LoadError> {
        let pattern = self
            .patterns
            .get(id)
            .cloned()
            .ok_or_else(|| LoadError::PatternNotFound(id.to_string()))?;
        validate_pattern(&pattern)?;
        Ok(pattern)
    }

    fn list_patterns(&self) -> Result<Vec<String>, LoadError> {
        let mut ids: Vec<String> = self.patterns.keys().cloned().collect();
        ids.sort();
        Ok(ids)
    }
}

/// Load a routing config from a YAML file.
pub fn load_routing_config<P: AsRef<Path>>(path: P) -> Result<RoutingConfig, LoadError> {
    let display = path.as_ref().display().to_string();
    let content = fs::read_to_string(&path).map_err(|source| LoadError::Io {
        path: display.clone(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|source| LoadError::Yaml {
        path: display,
        source,
    })
}
