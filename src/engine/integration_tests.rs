// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::json;

use crate::engine::EventDispatcher;
use crate::errors::{DispatchError, RuleError};
use crate::events::{kinds, Event, EventContext, EventKind};
use crate::handlers::{FnHandler, HandlerRegistry};
use crate::repository::{InMemoryConfigRepository, LeafConfiguration};
use crate::traits::{EventAction, EventHandler, FnAction, FnCondition};
use crate::tree::{BranchNode, DynamicLeafNode, EventStateTree, Transition};

/// Integration tests for the dispatcher driving a real tree and registry
#[cfg(test)]
mod tests {
    use super::*;

    /// Records the kind and context of every event it sees.
    #[derive(Default)]
    struct Recorder {
        seen: Mutex<Vec<(EventKind, EventContext)>>,
    }

    impl Recorder {
        fn seen(&self) -> Vec<(EventKind, EventContext)> {
            self.seen.lock().unwrap().clone()
        }
    }

    impl EventHandler for Recorder {
        fn supports(&self, _event: &Event) -> bool {
            true
        }

        fn handle(&self, event: &Event, context: &EventContext) -> Result<Vec<Event>, RuleError> {
            self.seen
                .lock()
                .unwrap()
                .push((event.kind().clone(), context.clone()));
            Ok(vec![])
        }

        fn name(&self) -> &str {
            "recorder"
        }
    }

    fn emit_bare(kind: EventKind) -> Arc<dyn EventAction> {
        Arc::new(FnAction::new(format!("emit {}", kind), move |_, _| {
            Ok(vec![Event::bare(kind.clone())])
        }))
    }

    fn emitting_handler(kind: EventKind, emits: Vec<EventKind>) -> Arc<dyn EventHandler> {
        Arc::new(FnHandler::new(format!("on {}", kind), kind, move |_, _| {
            Ok(emits.iter().cloned().map(Event::bare).collect())
        }))
    }

    /// root --kind--> leaf(rules)
    fn single_leaf_tree(
        repo: &Arc<InMemoryConfigRepository>,
        routes: &[(EventKind, &str)],
    ) -> EventStateTree {
        let mut root = BranchNode::new("root");
        for (kind, leaf_id) in routes {
            let leaf = Arc::new(DynamicLeafNode::new(*leaf_id, repo.clone()));
            root.add_transition(kind.clone(), Transition::always(leaf));
        }
        EventStateTree::new(Arc::new(root))
    }

    fn skill_damage_dispatcher() -> EventDispatcher {
        let repo = Arc::new(InMemoryConfigRepository::new());
        repo.register(
            "skill.damage",
            LeafConfiguration::new(
                kinds::SKILL_ON_HIT,
                Arc::new(FnCondition::new("damage >= threshold", |event, ctx| {
                    match (
                        event.field("damage").and_then(|v| v.as_f64()),
                        ctx.attribute_f64("threshold"),
                    ) {
                        (Some(damage), Some(threshold)) => damage >= threshold,
                        _ => false,
                    }
                })),
                vec![Arc::new(FnAction::new("health change", |event, ctx| {
                    let damage = event.field("damage").and_then(|v| v.as_i64()).unwrap_or(0);
                    let health = ctx.attribute("target_health").and_then(|v| v.as_i64()).unwrap_or(0);
                    Ok(vec![Event::bare(kinds::PLAYER_HEALTH_CHANGED)
                        .copy_with(None, [("value", json!(health - damage))])])
                }))],
            ),
        )
        .unwrap();

        let tree = single_leaf_tree(&repo, &[(kinds::SKILL_ON_HIT, "skill.damage")]);
        EventDispatcher::new(tree, HandlerRegistry::new())
    }

    fn hit(damage: i64) -> Event {
        Event::bare(kinds::SKILL_ON_HIT).copy_with(None, [("damage", json!(damage))])
    }

    fn battle_context() -> EventContext {
        EventContext::from_pairs([("threshold", json!(100)), ("target_health", json!(120))])
    }

    #[test]
    fn strong_hit_produces_health_change() {
        let dispatcher = skill_damage_dispatcher();

        let processed = dispatcher.emit(hit(150), Some(battle_context())).unwrap();

        assert_eq!(
            processed,
            vec![
                hit(150),
                Event::bare(kinds::PLAYER_HEALTH_CHANGED).copy_with(None, [("value", json!(-30))]),
            ]
        );
    }

    #[test]
    fn weak_hit_is_processed_alone() {
        let dispatcher = skill_damage_dispatcher();

        let processed = dispatcher.emit(hit(50), Some(battle_context())).unwrap();

        assert_eq!(processed, vec![hit(50)]);
    }

    #[test]
    fn processing_order_is_breadth_first_with_handlers_before_tree() {
        let repo = Arc::new(InMemoryConfigRepository::new());
        repo.register(
            "leaf",
            LeafConfiguration::new(
                kinds::SKILL_ON_HIT,
                Arc::new(FnCondition::always()),
                vec![emit_bare(kinds::SKILL_ON_END)],
            ),
        )
        .unwrap();
        let tree = single_leaf_tree(&repo, &[(kinds::SKILL_ON_HIT, "leaf")]);

        let mut registry = HandlerRegistry::new();
        registry
            .register(
                kinds::SKILL_ON_HIT,
                emitting_handler(
                    kinds::SKILL_ON_HIT,
                    vec![kinds::PLAYER_HEALTH_CHANGED, kinds::PLAYER_CREATED],
                ),
            )
            .register(
                kinds::PLAYER_HEALTH_CHANGED,
                emitting_handler(kinds::PLAYER_HEALTH_CHANGED, vec![kinds::PLAYER_STATE_CHANGED]),
            );

        let dispatcher = EventDispatcher::new(tree, registry);
        let processed = dispatcher.emit(Event::bare(kinds::SKILL_ON_HIT), None).unwrap();
        let order: Vec<&str> = processed.iter().map(|e| e.kind().as_str()).collect();

        assert_eq!(
            order,
            vec![
                "skill.on_hit",
                "player.health_changed",
                "player.created",
                "skill.on_end",
                "player.state_changed",
            ]
        );
    }

    #[test]
    fn follow_up_contexts_follow_their_producer() {
        let repo = Arc::new(InMemoryConfigRepository::new());
        repo.register(
            "leaf",
            LeafConfiguration::new(
                kinds::SKILL_ON_HIT,
                Arc::new(FnCondition::always()),
                vec![emit_bare(kinds::SKILL_ON_END)],
            ),
        )
        .unwrap();
        let tree = single_leaf_tree(&repo, &[(kinds::SKILL_ON_HIT, "leaf")]);

        let recorder = Arc::new(Recorder::default());
        let mut registry = HandlerRegistry::new();
        registry
            .register(
                kinds::SKILL_ON_HIT,
                emitting_handler(kinds::SKILL_ON_HIT, vec![kinds::SYSTEM_TICK]),
            )
            .register(kinds::SYSTEM_TICK, recorder.clone())
            .register(kinds::SKILL_ON_END, recorder.clone());

        let seed_context = EventContext::from_pairs([("round", json!(3))]).with_state("upstream");
        let dispatcher = EventDispatcher::new(tree, registry);
        dispatcher
            .emit(Event::bare(kinds::SKILL_ON_HIT), Some(seed_context.clone()))
            .unwrap();

        let seen = recorder.seen();
        assert_eq!(seen.len(), 2);

        let (handler_kind, handler_context) = &seen[0];
        assert_eq!(handler_kind, &kinds::SYSTEM_TICK);
        assert_eq!(handler_context, &seed_context);
        assert!(handler_context.shares_attributes_with(&seed_context));

        let (tree_kind, tree_context) = &seen[1];
        assert_eq!(tree_kind, &kinds::SKILL_ON_END);
        assert!(tree_context.state_path().is_empty());
        assert_eq!(tree_context.attributes(), seed_context.attributes());
        assert!(tree_context.shares_attributes_with(&seed_context));
    }

    #[test]
    fn tree_products_re_enter_from_the_root() {
        let repo = Arc::new(InMemoryConfigRepository::new());
        repo.register(
            "skill.damage",
            LeafConfiguration::new(
                kinds::SKILL_ON_HIT,
                Arc::new(FnCondition::always()),
                vec![emit_bare(kinds::PLAYER_HEALTH_CHANGED)],
            ),
        )
        .unwrap();

        let paths_seen = Arc::new(Mutex::new(Vec::new()));
        let paths = paths_seen.clone();
        repo.register(
            "player.health",
            LeafConfiguration::new(
                kinds::PLAYER_HEALTH_CHANGED,
                Arc::new(FnCondition::always()),
                vec![Arc::new(FnAction::new("flag", move |_, ctx| {
                    paths.lock().unwrap().push(ctx.state_path().to_vec());
                    Ok(vec![Event::bare(kinds::PLAYER_STATE_CHANGED)])
                }))],
            ),
        )
        .unwrap();

        let tree = single_leaf_tree(
            &repo,
            &[
                (kinds::SKILL_ON_HIT, "skill.damage"),
                (kinds::PLAYER_HEALTH_CHANGED, "player.health"),
            ],
        );
        let dispatcher = EventDispatcher::new(tree, HandlerRegistry::new());

        let traced = dispatcher
            .emit_traced(Event::bare(kinds::SKILL_ON_HIT), None)
            .unwrap();

        let order: Vec<&str> = traced.iter().map(|r| r.event.kind().as_str()).collect();
        assert_eq!(order, vec!["skill.on_hit", "player.health_changed", "player.state_changed"]);
        assert!(traced.iter().all(|r| r.context.state_path().is_empty()));
        assert_eq!(
            *paths_seen.lock().unwrap(),
            vec![vec!["root".to_string(), "player.health".to_string()]]
        );
    }

    #[test]
    fn stateless_rules_are_idempotent() {
        let dispatcher = skill_damage_dispatcher();

        let first = dispatcher.emit(hit(150), Some(battle_context())).unwrap();
        let second = dispatcher.emit(hit(150), Some(battle_context())).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn rule_failure_aborts_without_rollback() {
        let produced = Arc::new(AtomicUsize::new(0));
        let counter = produced.clone();

        let repo = Arc::new(InMemoryConfigRepository::new());
        repo.register(
            "leaf",
            LeafConfiguration::new(
                kinds::SKILL_ON_HIT,
                Arc::new(FnCondition::always()),
                vec![Arc::new(FnAction::new("counted", move |_, _| {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(vec![Event::bare(kinds::PLAYER_HEALTH_CHANGED)])
                }))],
            ),
        )
        .unwrap();
        let tree = single_leaf_tree(&repo, &[(kinds::SKILL_ON_HIT, "leaf")]);

        let mut registry = HandlerRegistry::new();
        registry.register(
            kinds::PLAYER_HEALTH_CHANGED,
            Arc::new(FnHandler::new("explodes", kinds::PLAYER_HEALTH_CHANGED, |_, _| {
                Err(RuleError::evaluation("explodes", "player record missing"))
            })),
        );

        let dispatcher = EventDispatcher::new(tree, registry);
        let result = dispatcher.emit(Event::bare(kinds::SKILL_ON_HIT), None);

        assert!(matches!(
            result,
            Err(DispatchError::Rule(RuleError::Evaluation { ref rule, .. })) if rule == "explodes"
        ));
        assert_eq!(produced.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn fan_out_branches_each_feed_the_queue() {
        let repo = Arc::new(InMemoryConfigRepository::new());
        for (leaf, emits) in [("left", kinds::SKILL_ON_END), ("right", kinds::SYSTEM_TICK)] {
            repo.register(
                leaf,
                LeafConfiguration::new(
                    kinds::SKILL_ON_HIT,
                    Arc::new(FnCondition::always()),
                    vec![emit_bare(emits)],
                ),
            )
            .unwrap();
        }
        let tree = single_leaf_tree(
            &repo,
            &[(kinds::SKILL_ON_HIT, "left"), (kinds::SKILL_ON_HIT, "right")],
        );
        let dispatcher = EventDispatcher::new(tree, HandlerRegistry::new());

        let processed = dispatcher.emit(Event::bare(kinds::SKILL_ON_HIT), None).unwrap();
        let order: Vec<&str> = processed.iter().map(|e| e.kind().as_str()).collect();

        assert_eq!(order, vec!["skill.on_hit", "skill.on_end", "system.tick"]);
    }
}
