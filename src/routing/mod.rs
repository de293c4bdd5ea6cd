// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Capability routing: progressive rollout, explicit consolidation
//! mappings, priority defaults, and fallback, with every decision recorded.

mod decision_log;
mod flags;
mod rollout;
mod router;

pub use decision_log::{DecisionContext, DecisionLog, RouteReason, RoutingDecision};
pub use flags::StaticFlags;
pub use rollout::{RolloutEvaluator, RolloutRule};
pub use router::CapabilityRouter;
