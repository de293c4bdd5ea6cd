// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// Errors raised while resolving a capability to a handler.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoutingError {
    /// A gated rollout rule applied but the run context carried no identity
    /// key to bucket on.
    #[error("rollout evaluation for capability '{capability}' requires an identity key but the run context has none")]
    MissingIdentity { capability: String },

    /// Every candidate binding was exhausted without finding an available
    /// handler.
    #[error("no handler available for capability '{capability}' after trying {attempted} binding(s)")]
    NoHandlerAvailable { capability: String, attempted: usize },

    /// A rollout rule was configured with a percentage outside [0, 100].
    #[error("rollout percentage {percentage} for capability '{capability}' is outside [0, 100]")]
    InvalidPercentage { capability: String, percentage: u32 },
}
