// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::config::consts::DEFAULT_BINDING_PRIORITY;
use crate::errors::RegistryError;
use crate::traits::Handler;

/// A registered association between a capability and a concrete handler.
#[derive(Clone)]
pub struct Binding {
    pub handler: Arc<dyn Handler>,
    pub handler_name: String,
    /// Lower number wins. Only breaks ties when no rollout or explicit
    /// mapping applies.
    pub priority: u32,
    /// Capability this binding consolidates, if it was dual-registered as
    /// part of a migration. Informational for listing and audit.
    pub consolidates: Option<String>,
    pub allow_dual: bool,
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("handler_name", &self.handler_name)
            .field("priority", &self.priority)
            .field("consolidates", &self.consolidates)
            .field("allow_dual", &self.allow_dual)
            .finish()
    }
}

/// Holds capability -> ordered handler bindings.
///
/// The registry is the one piece of shared mutable routing state besides the
/// decision log; it is lock-protected and shared via `Arc` across concurrent
/// runs. Bindings for a capability are kept sorted by ascending priority;
/// ties keep registration order (stable sort).
pub struct CapabilityRegistry {
    bindings: RwLock<HashMap<String, Vec<Binding>>>,
}

impl CapabilityRegistry {
    pub fn new() -> Self {
        Self {
            bindings: RwLock::new(HashMap::new()),
        }
    }

    /// Register a handler for a capability.
    ///
    /// Fails with `DuplicateBinding` when `allow_dual` is false and the
    /// capability already has a binding. With `allow_dual` true the handler
    /// joins the existing binding list (dual registration), ordered by
    /// priority.
    pub fn register(
        &self,
        capability: &str,
        handler: Arc<dyn Handler>,
        priority: u32,
        allow_dual: bool,
    ) -> Result<(), RegistryError> {
        self.insert(capability, handler, priority, allow_dual, None)
    }

    /// Register with the default priority (100) and dual registration
    /// allowed.
    pub fn register_default(
        &self,
        capability: &str,
        handler: Arc<dyn Handler>,
    ) -> Result<(), RegistryError> {
        self.insert(capability, handler, DEFAULT_BINDING_PRIORITY, true, None)
    }

    /// Register a handler that consolidates another capability, recording
    /// the consolidated capability name on the binding.
    pub fn register_consolidating(
        &self,
        capability: &str,
        handler: Arc<dyn Handler>,
        priority: u32,
        allow_dual: bool,
        consolidates: &str,
    ) -> Result<(), RegistryError> {
        self.insert(
            capability,
            handler,
            priority,
            allow_dual,
            Some(consolidates.to_string()),
        )
    }

    fn insert(
        &self,
        capability: &str,
        handler: Arc<dyn Handler>,
        priority: u32,
        allow_dual: bool,
        consolidates: Option<String>,
    ) -> Result<(), RegistryError> {
        let handler_name = handler.name().to_string();
        let mut bindings = self.bindings.write().expect("registry lock poisoned");

        let entry = bindings.entry(capability.to_string()).or_default();
        if !allow_dual && !entry.is_empty() {
            return Err(RegistryError::DuplicateBinding {
                capability: capability.to_string(),
                handler: handler_name,
            });
        }

        entry.push(Binding {
            handler,
            handler_name,
            priority,
            consolidates,
            allow_dual,
        });
        entry.sort_by_key(|b| b.priority);
        Ok(())
    }

    /// Bindings for a capability, ordered by ascending priority.
    pub fn list(&self, capability: &str) -> Vec<Binding> {
        let bindings = self.bindings.read().expect("registry lock poisoned");
        bindings.get(capability).cloned().unwrap_or_default()
    }

    /// Remove a binding by capability and handler name.
    pub fn unregister(&self, capability: &str, handler_name: &str) -> Result<(), RegistryError> {
        let mut bindings = self.bindings.write().expect("registry lock poisoned");
        let entry = bindings
            .get_mut(capability)
            .ok_or_else(|| RegistryError::UnknownBinding {
                capability: capability.to_string(),
                handler: handler_name.to_string(),
            })?;

        let before = entry.len();
        entry.retain(|b| b.handler_name != handler_name);
        if entry.len() == before {
            return Err(RegistryError::UnknownBinding {
                capability: capability.to_string(),
                handler: handler_name.to_string(),
            });
        }
        if entry.is_empty() {
            bindings.remove(capability);
        }
        Ok(())
    }

    /// Look up a handler by name across all capabilities. Used by the
    /// router to check rollout and consolidation targets.
    pub fn find_handler(&self, handler_name: &str) -> Option<Arc<dyn Handler>> {
        let bindings = self.bindings.read().expect("registry lock poisoned");
        bindings
            .values()
            .flatten()
            .find(|b| b.handler_name == handler_name)
            .map(|b| Arc::clone(&b.handler))
    }

    pub fn contains(&self, capability: &str) -> bool {
        let bindings = self.bindings.read().expect("registry lock poisoned");
        bindings.contains_key(capability)
    }

    pub fn capabilities(&self) -> Vec<String> {
        let bindings = self.bindings.read().expect("registry lock poisoned");
        bindings.keys().cloned().collect()
    }
}

impl Default for CapabilityRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CapabilityRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bindings = self.bindings.read().expect("registry lock poisoned");
        f.debug_struct("CapabilityRegistry")
            .field("capability_count", &bindings.len())
            .field("capabilities", &bindings.keys().collect::<Vec<_>>())
            .finish()
    }
}
