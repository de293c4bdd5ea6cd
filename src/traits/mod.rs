// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod flags;
pub mod handler;
pub mod loader;

pub use flags::FeatureFlags;
pub use handler::Handler;
pub use loader::PatternLoader;
