// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The bundled skill-damage tree, assembled in code.
//!
//! ```text
//! root ── skill.on_hit ──────────▶ skill_flow ── skill.on_hit ──────────▶ [skill.damage]
//!      └─ player.health_changed ─▶ player_flow ─ player.health_changed ─▶ [player.health]
//! ```
//!
//! `configs/skill-damage.yaml` declares the same tree and rules.

use std::sync::Arc;

use crate::demo::actions::{emit_health_change, flag_player_state, EMIT_HEALTH_CHANGE, FLAG_PLAYER_STATE};
use crate::demo::messages::{PlayerHealthChanged, SkillHit};
use crate::errors::ConfigError;
use crate::events::kinds;
use crate::repository::{ConfigRepository, InMemoryConfigRepository, LeafConfiguration};
use crate::traits::{FnAction, FnCondition};
use crate::tree::{BranchNode, DynamicLeafNode, EventStateTree, Transition};

pub const SKILL_DAMAGE_LEAF: &str = "skill.damage";
pub const PLAYER_HEALTH_LEAF: &str = "player.health";

pub fn build_state_tree(repository: Arc<dyn ConfigRepository>) -> EventStateTree {
    let skill_leaf = Arc::new(DynamicLeafNode::new(SKILL_DAMAGE_LEAF, repository.clone()));
    let player_leaf = Arc::new(DynamicLeafNode::new(PLAYER_HEALTH_LEAF, repository));

    let skill_flow = BranchNode::new("skill_flow")
        .with_transition(kinds::SKILL_ON_HIT, Transition::always(skill_leaf));
    let player_flow = BranchNode::new("player_flow")
        .with_transition(kinds::PLAYER_HEALTH_CHANGED, Transition::always(player_leaf));

    let root = BranchNode::new("root")
        .with_transition(kinds::SKILL_ON_HIT, Transition::always(Arc::new(skill_flow)))
        .with_transition(kinds::PLAYER_HEALTH_CHANGED, Transition::always(Arc::new(player_flow)));

    EventStateTree::new(Arc::new(root))
}

/// Register the two leaf rules the bundled tree expects.
///
/// * `skill.damage`: a hit at or above `damage_threshold` emits the target's
///   remaining health
/// * `player.health`: a health change at or below zero flags the player dead
pub fn populate_repository(repository: &InMemoryConfigRepository) -> Result<(), ConfigError> {
    repository.register(
        SKILL_DAMAGE_LEAF,
        LeafConfiguration::new(
            kinds::SKILL_ON_HIT,
            Arc::new(FnCondition::new("damage >= damage_threshold", |event, ctx| {
                let threshold = ctx.attribute_f64("damage_threshold").unwrap_or(0.0);
                event
                    .try_message::<SkillHit>()
                    .is_some_and(|hit| hit.damage as f64 >= threshold)
            })),
            vec![Arc::new(FnAction::new(EMIT_HEALTH_CHANGE, emit_health_change))],
        ),
    )?;

    repository.register(
        PLAYER_HEALTH_LEAF,
        LeafConfiguration::new(
            kinds::PLAYER_HEALTH_CHANGED,
            Arc::new(FnCondition::new("health <= 0", |event, _| {
                event
                    .try_message::<PlayerHealthChanged>()
                    .is_some_and(|change| change.value <= 0)
            })),
            vec![Arc::new(FnAction::new(FLAG_PLAYER_STATE, flag_player_state))],
        ),
    )?;

    Ok(())
}
