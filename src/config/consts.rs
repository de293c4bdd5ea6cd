// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Bounded wait per handler invocation, in seconds.
pub const DEFAULT_STEP_TIMEOUT_SECS: u64 = 30;

/// Maximum nested pattern depth before a run is refused.
pub const DEFAULT_MAX_RECURSION_DEPTH: u32 = 5;

/// Capacity of the routing decision ring buffer.
pub const DEFAULT_DECISION_LOG_CAPACITY: usize = 256;

/// Priority assigned to bindings registered without an explicit priority.
pub const DEFAULT_BINDING_PRIORITY: u32 = 100;
