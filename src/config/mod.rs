// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod consts;
pub mod loader;
pub mod pattern;
pub mod routing;
pub mod store;
pub mod validation;

pub use loader::{load_routing_config, DirectoryPatternLoader, InMemoryPatternLoader};
pub use pattern::{OutputsSpec, PanelEntry, Pattern, Step};
pub use routing::{RolloutRuleConfig, RoutingConfig};
pub use store::PatternStore;
pub use validation::validate_pattern;
