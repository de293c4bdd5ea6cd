// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use super::validation::PatternValidationError;

/// Errors raised while loading pattern or routing definitions from disk.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("YAML parse error in '{path}': {source}")]
    Yaml {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// The loader has no pattern under the requested id.
    #[error("pattern '{0}' was not found by the loader")]
    PatternNotFound(String),

    #[error(transparent)]
    Validation(#[from] PatternValidationError),
}
