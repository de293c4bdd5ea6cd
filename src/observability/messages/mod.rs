// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for human-readable output and
//! `StructuredLog` to emit the same event with structured fields through
//! `tracing`.

use tracing::Span;

pub mod engine;
pub mod outputs;
pub mod routing;
pub mod template;

/// Emit a message through `tracing` with structured fields.
pub trait StructuredLog {
    /// Log the event at the level appropriate for the message type.
    fn log(&self);

    /// Create a tracing span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
