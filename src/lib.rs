// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;     // pattern + routing definitions, loaders
pub mod engine;     // orchestrator and step execution
pub mod errors;     // error handling
pub mod handlers;   // capability handlers
pub mod observability;
pub mod outputs;    // output extraction
pub mod registry;   // capability -> binding tables
pub mod routing;    // router, rollout, decision log
pub mod template;   // {{path}} resolution
pub mod traits;     // unified abstractions
