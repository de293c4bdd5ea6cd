// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Capability registry: capability name -> ordered handler bindings.

mod capability_registry;

pub use capability_registry::{Binding, CapabilityRegistry};
