// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use serde_json::json;

use crate::errors::RuleError;
use crate::events::{kinds, Event, EventContext, EventKind};
use crate::repository::{ConfigRepository, InMemoryConfigRepository, LeafConfiguration};
use crate::traits::{EventAction, FnAction, FnCondition};
use crate::tree::{BranchNode, DynamicLeafNode, EventNode, EventStateTree, Transition};

/// Emits a single bare event of `kind` and counts its invocations.
struct CountingAction {
    kind: EventKind,
    calls: AtomicUsize,
}

impl CountingAction {
    fn new(kind: EventKind) -> Arc<Self> {
        Arc::new(Self {
            kind,
            calls: AtomicUsize::new(0),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl EventAction for CountingAction {
    fn produce(&self, _event: &Event, _context: &EventContext) -> Result<Vec<Event>, RuleError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![Event::bare(self.kind.clone())])
    }
}

fn emit_kind(kind: EventKind) -> Arc<dyn EventAction> {
    Arc::new(FnAction::new(format!("emit {}", kind), move |_, _| {
        Ok(vec![Event::bare(kind.clone())])
    }))
}

fn leaf_with(id: &str, rules: Vec<LeafConfiguration>) -> Arc<DynamicLeafNode> {
    let repo = InMemoryConfigRepository::new();
    for rule in rules {
        repo.register(id, rule).unwrap();
    }
    Arc::new(DynamicLeafNode::new(id, Arc::new(repo)))
}

fn always_rule(trigger: EventKind, actions: Vec<Arc<dyn EventAction>>) -> LeafConfiguration {
    LeafConfiguration::new(trigger, Arc::new(FnCondition::always()), actions)
}

fn kinds_of(routed: &[crate::tree::RoutedEvent]) -> Vec<&str> {
    routed.iter().map(|r| r.event.kind().as_str()).collect()
}

#[test]
fn unmatched_kind_produces_nothing() {
    let root = BranchNode::new("root");
    let tree = EventStateTree::new(Arc::new(root));

    let routed = tree.dispatch(&Event::bare(kinds::SYSTEM_TICK), None).unwrap();
    assert!(routed.is_empty());
}

#[test]
fn branch_fans_out_in_registration_order() {
    let first = leaf_with("first", vec![always_rule(kinds::SKILL_ON_HIT, vec![emit_kind(kinds::PLAYER_CREATED)])]);
    let second = leaf_with("second", vec![always_rule(kinds::SKILL_ON_HIT, vec![emit_kind(kinds::SYSTEM_TICK)])]);

    let root = BranchNode::new("root")
        .with_transition(kinds::SKILL_ON_HIT, Transition::always(first))
        .with_transition(kinds::SKILL_ON_HIT, Transition::always(second));
    let tree = EventStateTree::new(Arc::new(root));

    let routed = tree.dispatch(&Event::bare(kinds::SKILL_ON_HIT), None).unwrap();

    assert_eq!(kinds_of(&routed), vec!["player.created", "system.tick"]);
    assert_eq!(routed[0].context.state_path(), ["root", "first"]);
    assert_eq!(routed[1].context.state_path(), ["root", "second"]);
}

#[test]
fn false_transition_is_skipped() {
    let leaf = leaf_with("leaf", vec![always_rule(kinds::SKILL_ON_HIT, vec![emit_kind(kinds::SKILL_ON_END)])]);
    let never = Arc::new(FnCondition::new("never", |_, _| false));
    let root = BranchNode::new("root").with_transition(kinds::SKILL_ON_HIT, Transition::new(never, leaf.clone()));
    let tree = EventStateTree::new(Arc::new(root));

    let routed = tree.dispatch(&Event::bare(kinds::SKILL_ON_HIT), None).unwrap();
    assert!(routed.is_empty());
    assert!(!leaf.is_resolved());
}

#[test]
fn gated_leaf_rule_never_runs_its_actions() {
    let counter = CountingAction::new(kinds::PLAYER_HEALTH_CHANGED);
    let threshold = Arc::new(FnCondition::new("damage >= threshold", |event, ctx| {
        let damage = event.field("damage").and_then(|v| v.as_f64()).unwrap_or(0.0);
        damage >= ctx.attribute_f64("threshold").unwrap_or(0.0)
    }));
    let leaf = leaf_with(
        "skill.damage",
        vec![LeafConfiguration::new(
            kinds::SKILL_ON_HIT,
            threshold,
            vec![counter.clone() as Arc<dyn EventAction>],
        )],
    );
    let tree = EventStateTree::new(leaf);
    let ctx = EventContext::from_pairs([("threshold", json!(100))]);

    let weak = Event::bare(kinds::SKILL_ON_HIT).copy_with(None, [("damage", json!(50))]);
    assert!(tree.dispatch(&weak, Some(&ctx)).unwrap().is_empty());
    assert_eq!(counter.calls(), 0);

    let strong = weak.copy_with(None, [("damage", json!(150))]);
    assert_eq!(tree.dispatch(&strong, Some(&ctx)).unwrap().len(), 1);
    assert_eq!(counter.calls(), 1);
}

#[test]
fn leaf_ignores_rules_for_other_kinds() {
    let counter = CountingAction::new(kinds::SYSTEM_TICK);
    let leaf = leaf_with(
        "leaf",
        vec![always_rule(kinds::SKILL_ON_END, vec![counter.clone() as Arc<dyn EventAction>])],
    );

    let routed = leaf.handle(&Event::bare(kinds::SKILL_ON_HIT), &EventContext::default()).unwrap();
    assert!(routed.is_empty());
    assert_eq!(counter.calls(), 0);
}

#[test]
fn leaf_actions_share_the_leaf_context() {
    let leaf = leaf_with(
        "leaf",
        vec![
            always_rule(kinds::SKILL_ON_HIT, vec![emit_kind(kinds::SKILL_ON_END), emit_kind(kinds::SYSTEM_TICK)]),
            always_rule(kinds::SKILL_ON_HIT, vec![emit_kind(kinds::PLAYER_CREATED)]),
        ],
    );
    let mid = Arc::new(BranchNode::new("mid").with_transition(kinds::SKILL_ON_HIT, Transition::always(leaf)));
    let root = BranchNode::new("root").with_transition(kinds::SKILL_ON_HIT, Transition::always(mid));
    let ctx = EventContext::from_pairs([("k", json!("v"))]);

    let routed = EventStateTree::new(Arc::new(root))
        .dispatch(&Event::bare(kinds::SKILL_ON_HIT), Some(&ctx))
        .unwrap();

    assert_eq!(kinds_of(&routed), vec!["skill.on_end", "system.tick", "player.created"]);
    for r in &routed {
        assert_eq!(r.context.state_path(), ["root", "mid", "leaf"]);
        assert!(r.context.shares_attributes_with(&ctx));
    }
}

#[test]
fn shared_target_runs_once_per_matching_transition() {
    let counter = CountingAction::new(kinds::SYSTEM_TICK);
    let shared = leaf_with(
        "shared",
        vec![always_rule(kinds::SKILL_ON_HIT, vec![counter.clone() as Arc<dyn EventAction>])],
    );
    let left = Arc::new(BranchNode::new("left").with_transition(kinds::SKILL_ON_HIT, Transition::always(shared.clone())));
    let right = Arc::new(BranchNode::new("right").with_transition(kinds::SKILL_ON_HIT, Transition::always(shared)));
    let root = BranchNode::new("root")
        .with_transition(kinds::SKILL_ON_HIT, Transition::always(left))
        .with_transition(kinds::SKILL_ON_HIT, Transition::always(right));

    let routed = EventStateTree::new(Arc::new(root))
        .dispatch(&Event::bare(kinds::SKILL_ON_HIT), None)
        .unwrap();

    assert_eq!(counter.calls(), 2);
    assert_eq!(routed[0].context.state_path(), ["root", "left", "shared"]);
    assert_eq!(routed[1].context.state_path(), ["root", "right", "shared"]);
}

#[test]
fn leaf_cache_is_not_invalidated_by_later_registrations() {
    let repo = Arc::new(InMemoryConfigRepository::new());
    repo.register("leaf", always_rule(kinds::SKILL_ON_HIT, vec![emit_kind(kinds::SKILL_ON_END)]))
        .unwrap();
    let leaf = DynamicLeafNode::new("leaf", repo.clone() as Arc<dyn ConfigRepository>);
    let event = Event::bare(kinds::SKILL_ON_HIT);

    assert_eq!(leaf.handle(&event, &EventContext::default()).unwrap().len(), 1);
    assert!(leaf.is_resolved());

    repo.register("leaf", always_rule(kinds::SKILL_ON_HIT, vec![emit_kind(kinds::SYSTEM_TICK)]))
        .unwrap();

    // The first load is kept for the node's lifetime.
    assert_eq!(leaf.handle(&event, &EventContext::default()).unwrap().len(), 1);

    let fresh = DynamicLeafNode::new("leaf", repo as Arc<dyn ConfigRepository>);
    assert_eq!(fresh.handle(&event, &EventContext::default()).unwrap().len(), 2);
}

#[test]
fn condition_failure_propagates() {
    let failing = Arc::new(FnCondition::fallible("boom", |_, _| {
        Err(RuleError::evaluation("boom", "missing input"))
    }));
    let leaf = leaf_with("leaf", vec![always_rule(kinds::SKILL_ON_HIT, vec![emit_kind(kinds::SKILL_ON_END)])]);
    let root = BranchNode::new("root").with_transition(kinds::SKILL_ON_HIT, Transition::new(failing, leaf));

    let result = EventStateTree::new(Arc::new(root)).dispatch(&Event::bare(kinds::SKILL_ON_HIT), None);
    assert!(matches!(result, Err(RuleError::Evaluation { rule, .. }) if rule == "boom"));
}
