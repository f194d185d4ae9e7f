// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::config::ActionCatalog;
use crate::demo::messages::{PlayerHealthChanged, PlayerStateChanged, SkillHit};
use crate::errors::RuleError;
use crate::events::{kinds, Event, EventContext};
use crate::traits::FnAction;

pub const EMIT_HEALTH_CHANGE: &str = "emit_health_change";
pub const FLAG_PLAYER_STATE: &str = "flag_player_state";

/// Turn a skill hit into the target's remaining health.
///
/// Remaining health is the `target_health` attribute (0 when absent) minus
/// the hit's damage. Events that are not skill hits produce nothing.
pub fn emit_health_change(event: &Event, context: &EventContext) -> Result<Vec<Event>, RuleError> {
    let Some(hit) = event.try_message::<SkillHit>() else {
        return Ok(vec![]);
    };
    let target_health = context
        .attribute("target_health")
        .and_then(|value| value.as_i64())
        .unwrap_or(0);

    let change = PlayerHealthChanged {
        player_id: hit.target_id,
        value: target_health.saturating_sub(hit.damage),
        source_event: Some(event.kind().to_string()),
    };
    Ok(vec![Event::from_message(kinds::PLAYER_HEALTH_CHANGED, &change)?])
}

/// Mark the player dead, recording the leaf path that decided it.
pub fn flag_player_state(event: &Event, context: &EventContext) -> Result<Vec<Event>, RuleError> {
    let Some(change) = event.try_message::<PlayerHealthChanged>() else {
        return Ok(vec![]);
    };

    let state = PlayerStateChanged {
        player_id: change.player_id,
        state: "dead".to_string(),
        trail: context.state_path().to_vec(),
    };
    Ok(vec![Event::from_message(kinds::PLAYER_STATE_CHANGED, &state)?])
}

/// Catalog holding the bundled leaf actions under their rule-file names.
pub fn action_catalog() -> ActionCatalog {
    let mut catalog = ActionCatalog::new();
    catalog
        .register(
            EMIT_HEALTH_CHANGE,
            Arc::new(FnAction::new(EMIT_HEALTH_CHANGE, emit_health_change)),
        )
        .register(
            FLAG_PLAYER_STATE,
            Arc::new(FnAction::new(FLAG_PLAYER_STATE, flag_player_state)),
        );
    catalog
}
