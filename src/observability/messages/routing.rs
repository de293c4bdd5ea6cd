// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for capability resolution events.

use std::fmt::{Display, Formatter};
use tracing::Span;

use crate::observability::messages::StructuredLog;

/// A capability was resolved to a handler.
///
/// # Log Level
/// `debug!` - routine routing event, one per step
pub struct RouteResolved<'a> {
    pub capability: &'a str,
    pub handler: &'a str,
    pub reason: &'a str,
}

impl Display for RouteResolved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Resolved capability '{}' to handler '{}' (reason: {})",
            self.capability, self.handler, self.reason
        )
    }
}

impl StructuredLog for RouteResolved<'_> {
    fn log(&self) {
        tracing::debug!(
            capability = self.capability,
            handler = self.handler,
            reason = self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "route_resolved",
            span_name = name,
            capability = self.capability,
            handler = self.handler,
            reason = self.reason,
        )
    }
}

/// The preferred handler was unavailable and routing fell back to a
/// lower-priority binding.
///
/// # Log Level
/// `warn!` - degraded but functional
pub struct RouteFallback<'a> {
    pub capability: &'a str,
    pub skipped: &'a str,
    pub selected: &'a str,
}

impl Display for RouteFallback<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Capability '{}': handler '{}' unavailable, falling back to '{}'",
            self.capability, self.skipped, self.selected
        )
    }
}

impl StructuredLog for RouteFallback<'_> {
    fn log(&self) {
        tracing::warn!(
            capability = self.capability,
            skipped = self.skipped,
            selected = self.selected,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "route_fallback",
            span_name = name,
            capability = self.capability,
            skipped = self.skipped,
            selected = self.selected,
        )
    }
}

/// Routing exhausted every binding without finding an available handler.
///
/// # Log Level
/// `error!` - the run cannot proceed past this step
pub struct RoutingFailed<'a> {
    pub capability: &'a str,
    pub attempted: usize,
}

impl Display for RoutingFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "No handler available for capability '{}' after trying {} binding(s)",
            self.capability, self.attempted
        )
    }
}

impl StructuredLog for RoutingFailed<'_> {
    fn log(&self) {
        tracing::error!(
            capability = self.capability,
            attempted = self.attempted,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "routing_failed",
            span_name = name,
            capability = self.capability,
            attempted = self.attempted,
        )
    }
}
