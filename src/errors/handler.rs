// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Failure reported by a handler invocation.
///
/// Handlers are external collaborators; whatever goes wrong on their side
/// (I/O, upstream service, bad arguments) is flattened into a message. A
/// step timeout is reported through the same type so the engine treats both
/// identically.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct HandlerError {
    pub message: String,
}

impl HandlerError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
