// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Multi-criteria capability resolution with fallback.
//!
//! Resolution order for a capability request:
//!
//! 1. An active, gated rollout rule whose inclusion decision is true and
//!    whose target handler is registered and available -> `rollout`.
//! 2. A static explicit consolidation mapping whose target is available ->
//!    `explicit-mapping`.
//! 3. The lowest-priority-number binding for the capability ->
//!    `priority-default`.
//! 4. When the selected handler is unavailable, the next binding in
//!    priority order -> `fallback`; with none left, resolution fails.
//!
//! Every resolution, including failures, appends a `RoutingDecision` to the
//! bounded decision log.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::SystemTime;

use crate::observability::messages::routing::{RouteFallback, RouteResolved, RoutingFailed};
use crate::observability::messages::StructuredLog;
use crate::engine::RunContext;
use crate::errors::RoutingError;
use crate::registry::CapabilityRegistry;
use crate::routing::decision_log::{DecisionContext, DecisionLog, RouteReason, RoutingDecision};
use crate::routing::rollout::{RolloutEvaluator, RolloutRule};
use crate::traits::{FeatureFlags, Handler};

/// Resolves capability requests to handlers using registry + rollout +
/// explicit consolidation mapping + fallback, logging every decision.
pub struct CapabilityRouter {
    registry: Arc<CapabilityRegistry>,
    flags: Arc<dyn FeatureFlags>,
    rollouts: HashMap<String, Vec<RolloutRule>>,
    consolidations: HashMap<String, String>,
    decisions: Arc<DecisionLog>,
}

impl CapabilityRouter {
    pub fn new(
        registry: Arc<CapabilityRegistry>,
        flags: Arc<dyn FeatureFlags>,
        decision_capacity: usize,
    ) -> Self {
        Self {
            registry,
            flags,
            rollouts: HashMap::new(),
            consolidations: HashMap::new(),
            decisions: Arc::new(DecisionLog::new(decision_capacity)),
        }
    }

    /// Add a rollout rule. Rules for the same capability are tried in the
    /// order they were added.
    pub fn add_rollout_rule(&mut self, rule: RolloutRule) {
        self.rollouts
            .entry(rule.capability.clone())
            .or_default()
            .push(rule);
    }

    /// Add a static explicit consolidation mapping: requests for
    /// `capability` go to the named handler when it is available.
    pub fn add_consolidation(
        &mut self,
        capability: impl Into<String>,
        handler_name: impl Into<String>,
    ) {
        self.consolidations
            .insert(capability.into(), handler_name.into());
    }

    pub fn decision_log(&self) -> Arc<DecisionLog> {
        Arc::clone(&self.decisions)
    }

    /// The most recent `limit` routing decisions across all runs.
    pub fn recent_decisions(&self, limit: usize) -> Vec<RoutingDecision> {
        self.decisions.recent(limit)
    }

    /// Resolve a capability request to one handler.
    pub fn resolve(
        &self,
        capability: &str,
        ctx: &RunContext,
    ) -> Result<(Arc<dyn Handler>, RoutingDecision), RoutingError> {
        // 1. Rollout rules, gated by feature flags.
        if let Some(rules) = self.rollouts.get(capability) {
            for rule in rules {
                if !rule.flags.iter().all(|f| self.flags.is_active(f)) {
                    continue;
                }
                let identity_key = match ctx.identity_key.as_deref() {
                    Some(key) => key,
                    None => {
                        let error = RoutingError::MissingIdentity {
                            capability: capability.to_string(),
                        };
                        self.record_failure(capability, ctx);
                        return Err(error);
                    }
                };
                if RolloutEvaluator::decide(identity_key, rule.percentage) {
                    if let Some(handler) = self.registry.find_handler(&rule.target_handler) {
                        if handler.is_available() {
                            return Ok(self.select(
                                capability,
                                handler,
                                RouteReason::Rollout,
                                ctx,
                            ));
                        }
                    }
                }
            }
        }

        // 2. Explicit consolidation mapping.
        if let Some(target) = self.consolidations.get(capability) {
            if let Some(handler) = self.registry.find_handler(target) {
                if handler.is_available() {
                    return Ok(self.select(
                        capability,
                        handler,
                        RouteReason::ExplicitMapping,
                        ctx,
                    ));
                }
            }
        }

        // 3 + 4. Priority default with fallback chain.
        let bindings = self.registry.list(capability);
        for (index, binding) in bindings.iter().enumerate() {
            if !binding.handler.is_available() {
                continue;
            }
            let reason = if index == 0 {
                RouteReason::PriorityDefault
            } else {
                RouteFallback {
                    capability,
                    skipped: &bindings[index - 1].handler_name,
                    selected: &binding.handler_name,
                }
                .log();
                RouteReason::Fallback
            };
            return Ok(self.select(capability, Arc::clone(&binding.handler), reason, ctx));
        }

        RoutingFailed {
            capability,
            attempted: bindings.len(),
        }
        .log();
        self.record_failure(capability, ctx);
        Err(RoutingError::NoHandlerAvailable {
            capability: capability.to_string(),
            attempted: bindings.len(),
        })
    }

    fn select(
        &self,
        capability: &str,
        handler: Arc<dyn Handler>,
        reason: RouteReason,
        ctx: &RunContext,
    ) -> (Arc<dyn Handler>, RoutingDecision) {
        let decision = RoutingDecision {
            timestamp: SystemTime::now(),
            capability: capability.to_string(),
            handler: Some(handler.name().to_string()),
            reason,
            context: DecisionContext::from(ctx),
        };
        RouteResolved {
            capability,
            handler: handler.name(),
            reason: reason.as_str(),
        }
        .log();
        self.decisions.append(decision.clone());
        (handler, decision)
    }

    fn record_failure(&self, capability: &str, ctx: &RunContext) {
        self.decisions.append(RoutingDecision {
            timestamp: SystemTime::now(),
            capability: capability.to_string(),
            handler: None,
            reason: RouteReason::Failed,
            context: DecisionContext::from(ctx),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::stub::{StubHandler, UnavailableHandler};
    use crate::routing::flags::StaticFlags;

    fn registry_with(handlers: &[(&str, &str, u32)]) -> Arc<CapabilityRegistry> {
        let registry = Arc::new(CapabilityRegistry::new());
        for (capability, name, priority) in handlers {
            registry
                .register(capability, Arc::new(StubHandler::new(*name)), *priority, true)
                .unwrap();
        }
        registry
    }

    fn ctx_with_identity(key: &str) -> RunContext {
        RunContext::new().with_identity_key(key)
    }

    /// A percentage guaranteed to include `key` (its bucket plus one).
    fn including_percentage(key: &str) -> u32 {
        u32::from(RolloutEvaluator::bucket(key)) + 1
    }

    /// A percentage guaranteed to exclude `key` (exactly its bucket).
    fn excluding_percentage(key: &str) -> u32 {
        u32::from(RolloutEvaluator::bucket(key))
    }

    #[test]
    fn test_priority_default_selects_lowest_priority_number() {
        let registry = registry_with(&[
            ("fetch.series", "h1", 100),
            ("fetch.series", "h2", 10),
        ]);
        let router =
            CapabilityRouter::new(registry, Arc::new(StaticFlags::new()), 16);

        let (handler, decision) = router
            .resolve("fetch.series", &RunContext::new())
            .unwrap();
        assert_eq!(handler.name(), "h2");
        assert_eq!(decision.reason, RouteReason::PriorityDefault);
        assert_eq!(decision.handler.as_deref(), Some("h2"));
    }

    #[test]
    fn test_rollout_outranks_explicit_mapping_and_priority() {
        // All three criteria configured for one capability; rollout must win.
        let registry = registry_with(&[
            ("fetch.series", "h1", 100),
            ("data.unified", "h2", 10),
            ("data.legacy", "h3", 10),
        ]);
        let flags = Arc::new(StaticFlags::new().enable("consolidate"));
        let mut router = CapabilityRouter::new(registry, flags, 16);
        router.add_consolidation("fetch.series", "h3");
        router
            .add_rollout_rule(
                RolloutRule::new(
                    "fetch.series",
                    "h2",
                    including_percentage("user-42"),
                    vec!["consolidate".to_string()],
                )
                .unwrap(),
            );

        let (handler, decision) = router
            .resolve("fetch.series", &ctx_with_identity("user-42"))
            .unwrap();
        assert_eq!(handler.name(), "h2");
        assert_eq!(decision.reason, RouteReason::Rollout);
    }

    #[test]
    fn test_explicit_mapping_outranks_priority_default() {
        let registry = registry_with(&[
            ("fetch.series", "h1", 100),
            ("data.unified", "h2", 10),
        ]);
        let mut router =
            CapabilityRouter::new(registry, Arc::new(StaticFlags::new()), 16);
        router.add_consolidation("fetch.series", "h2");

        let (handler, decision) = router
            .resolve("fetch.series", &RunContext::new())
            .unwrap();
        assert_eq!(handler.name(), "h2");
        assert_eq!(decision.reason, RouteReason::ExplicitMapping);
    }

    #[test]
    fn test_rollout_excluded_key_falls_through() {
        let registry = registry_with(&[
            ("fetch.series", "h1", 100),
            ("data.unified", "h2", 10),
        ]);
        let flags = Arc::new(StaticFlags::new().enable("consolidate"));
        let mut router = CapabilityRouter::new(registry, flags, 16);
        router
            .add_rollout_rule(
                RolloutRule::new(
                    "fetch.series",
                    "h2",
                    excluding_percentage("user-42"),
                    vec!["consolidate".to_string()],
                )
                .unwrap(),
            );

        let (handler, decision) = router
            .resolve("fetch.series", &ctx_with_identity("user-42"))
            .unwrap();
        assert_eq!(handler.name(), "h1");
        assert_eq!(decision.reason, RouteReason::PriorityDefault);
    }

    #[test]
    fn test_inactive_flag_disables_rollout() {
        let registry = registry_with(&[
            ("fetch.series", "h1", 100),
            ("data.unified", "h2", 10),
        ]);
        // Flag not enabled.
        let mut router =
            CapabilityRouter::new(registry, Arc::new(StaticFlags::new()), 16);
        router
            .add_rollout_rule(
                RolloutRule::new("fetch.series", "h2", 100, vec!["consolidate".to_string()])
                    .unwrap(),
            );

        let (handler, _) = router
            .resolve("fetch.series", &ctx_with_identity("user-42"))
            .unwrap();
        assert_eq!(handler.name(), "h1");
    }

    #[test]
    fn test_missing_identity_key_fails() {
        let registry = registry_with(&[("fetch.series", "h1", 100)]);
        let flags = Arc::new(StaticFlags::new().enable("consolidate"));
        let mut router = CapabilityRouter::new(registry, flags, 16);
        router
            .add_rollout_rule(
                RolloutRule::new("fetch.series", "h2", 50, vec!["consolidate".to_string()])
                    .unwrap(),
            );

        let result = router.resolve("fetch.series", &RunContext::new());
        assert_eq!(
            result.err(),
            Some(RoutingError::MissingIdentity {
                capability: "fetch.series".to_string(),
            })
        );

        // The failure is still recorded.
        let recent = router.recent_decisions(1);
        assert_eq!(recent[0].reason, RouteReason::Failed);
        assert_eq!(recent[0].handler, None);
    }

    #[test]
    fn test_fallback_to_next_priority_binding() {
        let registry = Arc::new(CapabilityRegistry::new());
        registry
            .register(
                "fetch.series",
                Arc::new(UnavailableHandler::new("down")),
                10,
                true,
            )
            .unwrap();
        registry
            .register("fetch.series", Arc::new(StubHandler::new("up")), 100, true)
            .unwrap();
        let router =
            CapabilityRouter::new(registry, Arc::new(StaticFlags::new()), 16);

        let (handler, decision) = router
            .resolve("fetch.series", &RunContext::new())
            .unwrap();
        assert_eq!(handler.name(), "up");
        assert_eq!(decision.reason, RouteReason::Fallback);
    }

    #[test]
    fn test_no_handler_available() {
        let registry = Arc::new(CapabilityRegistry::new());
        registry
            .register(
                "fetch.series",
                Arc::new(UnavailableHandler::new("down")),
                10,
                true,
            )
            .unwrap();
        let router =
            CapabilityRouter::new(registry, Arc::new(StaticFlags::new()), 16);

        let result = router.resolve("fetch.series", &RunContext::new());
        assert_eq!(
            result.err(),
            Some(RoutingError::NoHandlerAvailable {
                capability: "fetch.series".to_string(),
                attempted: 1,
            })
        );
        assert_eq!(router.recent_decisions(1)[0].reason, RouteReason::Failed);
    }

    #[test]
    fn test_unknown_capability_fails_with_zero_attempted() {
        let registry = Arc::new(CapabilityRegistry::new());
        let router =
            CapabilityRouter::new(registry, Arc::new(StaticFlags::new()), 16);

        let result = router.resolve("no.such", &RunContext::new());
        assert_eq!(
            result.err(),
            Some(RoutingError::NoHandlerAvailable {
                capability: "no.such".to_string(),
                attempted: 0,
            })
        );
    }

    #[test]
    fn test_rollout_with_unregistered_target_falls_through() {
        let registry = registry_with(&[("fetch.series", "h1", 100)]);
        let flags = Arc::new(StaticFlags::new().enable("consolidate"));
        let mut router = CapabilityRouter::new(registry, flags, 16);
        router
            .add_rollout_rule(
                RolloutRule::new(
                    "fetch.series",
                    "not-registered",
                    100,
                    vec!["consolidate".to_string()],
                )
                .unwrap(),
            );

        let (handler, decision) = router
            .resolve("fetch.series", &ctx_with_identity("user-42"))
            .unwrap();
        assert_eq!(handler.name(), "h1");
        assert_eq!(decision.reason, RouteReason::PriorityDefault);
    }

    #[test]
    fn test_every_resolution_is_logged() {
        let registry = registry_with(&[("fetch.series", "h1", 100)]);
        let router =
            CapabilityRouter::new(registry, Arc::new(StaticFlags::new()), 16);

        for _ in 0..3 {
            router.resolve("fetch.series", &RunContext::new()).unwrap();
        }
        let _ = router.resolve("no.such", &RunContext::new());

        assert_eq!(router.decision_log().len(), 4);
    }
}
