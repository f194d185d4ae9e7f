// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{bail, Context};
use event_arbor::config::consts::{DEFAULT_MAX_EVENTS, DEFAULT_RULESET_PATH};
use event_arbor::config::{load_and_validate_ruleset, RuntimeBuilder};
use event_arbor::demo::messages::SkillHit;
use event_arbor::demo::{
    action_catalog, build_state_tree, populate_repository, register_default_handlers, GameStatsHandler,
};
use event_arbor::engine::{DispatchOptions, EventDispatcher};
use event_arbor::events::{kinds, Event, EventContext};
use event_arbor::handlers::HandlerRegistry;
use event_arbor::repository::InMemoryConfigRepository;
use serde_json::json;
use tracing_subscriber::EnvFilter;

const CODE_MODE_FLAG: &str = "--code-mode";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: {} [ruleset.yaml ...] <damage>", args[0]);
        eprintln!("       {} {} <damage>", args[0], CODE_MODE_FLAG);
        eprintln!("Example: {} {} 150", args[0], DEFAULT_RULESET_PATH);
        eprintln!("Example: {} {} 50", args[0], CODE_MODE_FLAG);
        std::process::exit(1);
    }

    // The last argument is the damage of the seed hit
    let damage_arg = &args[args.len() - 1];
    let damage: i64 = damage_arg
        .parse()
        .with_context(|| format!("damage must be an integer, got '{}'", damage_arg))?;

    println!("🌳 Event Arbor Skill Damage Demo");
    println!("═══════════════════════════════════");
    println!("Seed: skill.on_hit fireball -> player-001 ({} damage)", damage);

    if args.len() == 3 && args[1] == CODE_MODE_FLAG {
        return run_code_tree(damage);
    }

    let ruleset_files: Vec<&str> = if args.len() == 2 {
        vec![DEFAULT_RULESET_PATH]
    } else {
        args[1..args.len() - 1].iter().map(String::as_str).collect()
    };

    for (i, ruleset_file) in ruleset_files.iter().enumerate() {
        if ruleset_file.starts_with("--") {
            bail!("unknown flag '{}'", ruleset_file);
        }
        println!();
        println!("📄 Rule-set {}: {}", i + 1, ruleset_file);
        println!("{}", "─".repeat(50));
        run_ruleset(ruleset_file, damage)?;
    }

    println!("\n🎉 Demo complete!");
    Ok(())
}

fn run_ruleset(path: &str, damage: i64) -> anyhow::Result<()> {
    let cfg = load_and_validate_ruleset(path).with_context(|| format!("loading rule-set '{}'", path))?;

    let mut registry = HandlerRegistry::new();
    let stats = register_default_handlers(&mut registry);
    print_registry(&registry);

    let (mut dispatcher, context) = RuntimeBuilder::from_config(&cfg, &action_catalog(), registry)
        .with_context(|| format!("building runtime for '{}'", path))?;
    if dispatcher.options().max_events.is_none() {
        dispatcher = EventDispatcher::with_options(
            dispatcher.tree().clone(),
            dispatcher.registry().clone(),
            DispatchOptions::with_max_events(DEFAULT_MAX_EVENTS),
        );
    }

    run_and_report(&dispatcher, damage, context, &stats)
}

fn run_code_tree(damage: i64) -> anyhow::Result<()> {
    let repository = Arc::new(InMemoryConfigRepository::new());
    populate_repository(&repository)?;
    let tree = build_state_tree(repository);

    let mut registry = HandlerRegistry::new();
    let stats = register_default_handlers(&mut registry);
    print_registry(&registry);

    let dispatcher =
        EventDispatcher::with_options(tree, registry, DispatchOptions::with_max_events(DEFAULT_MAX_EVENTS));
    let context = EventContext::from_pairs([("target_health", json!(120)), ("damage_threshold", json!(100))]);

    run_and_report(&dispatcher, damage, context, &stats)
}

fn run_and_report(
    dispatcher: &EventDispatcher,
    damage: i64,
    context: EventContext,
    stats: &GameStatsHandler,
) -> anyhow::Result<()> {
    let seed = Event::from_message(
        kinds::SKILL_ON_HIT,
        &SkillHit {
            skill_id: "fireball".to_string(),
            target_id: "player-001".to_string(),
            damage,
            is_critical: false,
            is_extra_damage: false,
        },
    )?;

    let start = Instant::now();
    let processed = dispatcher.emit_traced(seed, Some(context))?;
    let elapsed = start.elapsed();

    println!();
    println!("📊 Processed {} events in {:?}:", processed.len(), elapsed);
    for (i, routed) in processed.iter().enumerate() {
        println!(
            "  {}. {} {}",
            i + 1,
            routed.event.kind(),
            serde_json::Value::Object(routed.event.payload().clone())
        );
    }

    let totals = stats.snapshot();
    println!();
    println!("📈 Game stats:");
    println!("  total damage:   {}", totals.total_damage);
    println!("  health changes: {}", totals.health_changes);
    println!("  state changes:  {}", totals.state_changes);
    Ok(())
}

fn print_registry(registry: &HandlerRegistry) {
    println!("🔌 Registered handlers ({}):", registry.len());
    for kind in registry.registered_kinds() {
        let handlers = registry.handlers_for(kind);
        println!("  {}: {} handler(s)", kind, handlers.len());
        for handler in handlers {
            println!("    - {}", handler.name());
        }
    }
}
