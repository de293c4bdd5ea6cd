// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::sync::Arc;
use std::time::Instant;

use the_switchboard::config::{
    load_routing_config, DirectoryPatternLoader, RoutingConfig,
};
use the_switchboard::engine::{OrchestratorOptions, PatternOrchestrator, RunContext};
use the_switchboard::handlers::{ConstantHandler, EchoHandler, NestedPatternHandler};
use the_switchboard::registry::CapabilityRegistry;
use the_switchboard::routing::{CapabilityRouter, StaticFlags};
use the_switchboard::traits::Handler;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!(
            "Usage: {} <patterns-dir> <pattern-id> [inputs-json] [--routing <routing.yaml>] [--identity <key>]",
            args[0]
        );
        eprintln!(
            "Example: {} configs/patterns market-summary '{{\"ticker\": \"SPX\"}}'",
            args[0]
        );
        std::process::exit(1);
    }

    let patterns_dir = &args[1];
    let pattern_id = &args[2];
    let inputs_json = args
        .get(3)
        .filter(|arg| !arg.starts_with("--"))
        .map(String::as_str)
        .unwrap_or("{}");
    let routing_file = flag_value(&args, "--routing");
    let identity_key = flag_value(&args, "--identity");

    let inputs: serde_json::Value = match serde_json::from_str(inputs_json) {
        Ok(inputs) => inputs,
        Err(e) => {
            eprintln!("❌ Invalid inputs JSON: {}", e);
            std::process::exit(1);
        }
    };

    let routing = match routing_file {
        Some(path) => match load_routing_config(path) {
            Ok(routing) => routing,
            Err(e) => {
                eprintln!("❌ Failed to load routing config: {}", e);
                std::process::exit(1);
            }
        },
        None => RoutingConfig::default(),
    };

    println!("🔀 Switchboard Pattern Runner");
    println!("═════════════════════════════");
    println!("Patterns: {}", patterns_dir);
    println!("Pattern:  {}", pattern_id);
    println!("Inputs:   {}", inputs);
    println!();

    match run(patterns_dir, pattern_id, inputs, routing, identity_key).await {
        Ok(()) => {}
        Err(e) => {
            eprintln!("❌ Run failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|arg| arg == flag)
        .and_then(|index| args.get(index + 1))
        .map(String::as_str)
}

async fn run(
    patterns_dir: &str,
    pattern_id: &str,
    inputs: serde_json::Value,
    routing: RoutingConfig,
    identity_key: Option<&str>,
) -> anyhow::Result<()> {
    let start_time = Instant::now();

    let registry = Arc::new(CapabilityRegistry::new());
    let nested = Arc::new(NestedPatternHandler::new("nested"));
    register_demo_handlers(&registry, &nested)?;

    let flags: StaticFlags = routing.flags.iter().cloned().collect();
    let mut router = CapabilityRouter::new(
        Arc::clone(&registry),
        Arc::new(flags),
        OrchestratorOptions::default().decision_log_capacity,
    );
    for rule in routing.rollout_rules()? {
        router.add_rollout_rule(rule);
    }
    for (capability, target) in &routing.consolidations {
        router.add_consolidation(capability.clone(), target.clone());
    }

    let loader = Arc::new(DirectoryPatternLoader::new(patterns_dir));
    let orchestrator = Arc::new(PatternOrchestrator::new(
        Arc::new(router),
        loader,
        OrchestratorOptions::default(),
    )?);
    nested.attach(Arc::downgrade(&orchestrator));

    println!("📋 Loaded patterns: {:?}", orchestrator.pattern_ids());

    let mut ctx = RunContext::new();
    if let Some(key) = identity_key {
        ctx = ctx.with_identity_key(key);
    }

    let result = orchestrator.run_pattern(pattern_id, inputs, &ctx).await?;

    println!("\n📊 Outputs:");
    let mut keys: Vec<&String> = result.outputs.keys().collect();
    keys.sort();
    for key in keys {
        println!("  {} = {}", key, result.outputs[key]);
    }

    println!("\n🧭 Routing Trace:");
    for (i, decision) in result.trace.iter().enumerate() {
        println!(
            "  {}. {} → {} ({})",
            i + 1,
            decision.capability,
            decision.handler.as_deref().unwrap_or("<none>"),
            decision.reason
        );
    }

    println!("\n⏱️  Total Time: {:?}", start_time.elapsed());
    Ok(())
}

/// Demo capability bindings: echo/constant handlers plus nested pattern
/// execution under `pattern.run`.
fn register_demo_handlers(
    registry: &Arc<CapabilityRegistry>,
    nested: &Arc<NestedPatternHandler>,
) -> anyhow::Result<()> {
    registry.register_default("echo", Arc::new(EchoHandler::new("echo")))?;
    registry.register_default("fetch.series", Arc::new(EchoHandler::new("series-v1")))?;
    registry.register_default(
        "data.unified",
        Arc::new(ConstantHandler::new(
            "unified-v2",
            serde_json::json!({"source": "unified", "points": []}),
        )),
    )?;
    registry.register_default("pattern.run", Arc::clone(nested) as Arc<dyn Handler>)?;
    Ok(())
}
