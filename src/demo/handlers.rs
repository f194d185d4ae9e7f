// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::Arc;

use crate::demo::messages::{PlayerCreated, PlayerHealthChanged, PlayerStateChanged, SkillHit, SystemTick};
use crate::errors::RuleError;
use crate::events::{kinds, Event, EventContext};
use crate::handlers::{FnHandler, HandlerRegistry};
use crate::traits::EventHandler;

/// Logs every health change it is given.
#[derive(Debug, Default)]
pub struct PlayerHealthLogger;

impl EventHandler for PlayerHealthLogger {
    fn supports(&self, event: &Event) -> bool {
        event.kind() == &kinds::PLAYER_HEALTH_CHANGED
    }

    fn handle(&self, event: &Event, _context: &EventContext) -> Result<Vec<Event>, RuleError> {
        if let Some(change) = event.try_message::<PlayerHealthChanged>() {
            tracing::info!(player_id = %change.player_id, value = change.value, "Player health is now {}", change.value);
        }
        Ok(vec![])
    }

    fn name(&self) -> &str {
        "player_health_logger"
    }
}

/// Running totals kept by [`GameStatsHandler`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameStats {
    pub total_damage: i64,
    pub health_changes: usize,
    pub state_changes: usize,
}

/// Stateful handler accumulating damage and change counts.
///
/// Accepts every event it is registered for; the registry decides which
/// kinds reach it.
#[derive(Debug, Default)]
pub struct GameStatsHandler {
    total_damage: AtomicI64,
    health_changes: AtomicUsize,
    state_changes: AtomicUsize,
}

impl GameStatsHandler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> GameStats {
        GameStats {
            total_damage: self.total_damage.load(Ordering::Relaxed),
            health_changes: self.health_changes.load(Ordering::Relaxed),
            state_changes: self.state_changes.load(Ordering::Relaxed),
        }
    }
}

impl EventHandler for GameStatsHandler {
    fn supports(&self, _event: &Event) -> bool {
        true
    }

    fn handle(&self, event: &Event, _context: &EventContext) -> Result<Vec<Event>, RuleError> {
        let kind = event.kind();
        if kind == &kinds::SKILL_ON_HIT {
            if let Some(hit) = event.try_message::<SkillHit>() {
                self.total_damage.fetch_add(hit.damage, Ordering::Relaxed);
            }
        } else if kind == &kinds::PLAYER_HEALTH_CHANGED {
            self.health_changes.fetch_add(1, Ordering::Relaxed);
        } else if kind == &kinds::PLAYER_STATE_CHANGED {
            self.state_changes.fetch_add(1, Ordering::Relaxed);
        }

        let stats = self.snapshot();
        tracing::info!(
            total_damage = stats.total_damage,
            health_changes = stats.health_changes,
            state_changes = stats.state_changes,
            "Game stats updated"
        );
        Ok(vec![])
    }

    fn name(&self) -> &str {
        "game_stats"
    }
}

/// Rough rating of a hit's damage.
pub fn damage_efficiency(damage: i64) -> &'static str {
    match damage {
        d if d >= 100 => "high",
        d if d >= 50 => "medium",
        _ => "low",
    }
}

/// Named health band for a remaining health value.
pub fn health_band(value: i64) -> &'static str {
    match value {
        v if v <= 0 => "dead",
        v if v <= 10 => "dying",
        v if v <= 30 => "badly_wounded",
        v if v <= 60 => "wounded",
        _ => "healthy",
    }
}

pub fn log_skill_hit(event: &Event, _context: &EventContext) -> Result<Vec<Event>, RuleError> {
    if let Some(hit) = event.try_message::<SkillHit>() {
        tracing::info!(
            skill_id = %hit.skill_id,
            target_id = %hit.target_id,
            damage = hit.damage,
            critical = hit.is_critical,
            efficiency = damage_efficiency(hit.damage),
            "Skill {} hit {}",
            hit.skill_id,
            hit.target_id
        );
    }
    Ok(vec![])
}

pub fn analyze_game_balance(event: &Event, context: &EventContext) -> Result<Vec<Event>, RuleError> {
    let Some(hit) = event.try_message::<SkillHit>() else {
        return Ok(vec![]);
    };
    let target_health = context.attribute_f64("target_health").unwrap_or(100.0);
    let share = if target_health > 0.0 {
        hit.damage as f64 / target_health * 100.0
    } else {
        100.0
    };

    if share > 80.0 {
        tracing::warn!(skill_id = %hit.skill_id, share, "Skill damage too high for target health");
    } else if share < 20.0 {
        tracing::warn!(skill_id = %hit.skill_id, share, "Skill damage too low for target health");
    } else {
        tracing::info!(skill_id = %hit.skill_id, share, "Skill damage balanced");
    }
    Ok(vec![])
}

pub fn check_health_threshold(event: &Event, _context: &EventContext) -> Result<Vec<Event>, RuleError> {
    if let Some(change) = event.try_message::<PlayerHealthChanged>() {
        let source = change.source_event.as_deref().unwrap_or("unknown");
        tracing::info!(
            player_id = %change.player_id,
            value = change.value,
            band = health_band(change.value),
            source,
            "Health threshold check"
        );
    }
    Ok(vec![])
}

pub fn log_state_transition(event: &Event, context: &EventContext) -> Result<Vec<Event>, RuleError> {
    if let Some(change) = event.try_message::<PlayerStateChanged>() {
        let trail = if change.trail.is_empty() {
            context.state_path().join(" -> ")
        } else {
            change.trail.join(" -> ")
        };
        tracing::info!(player_id = %change.player_id, state = %change.state, trail = %trail, "Player state changed");
    }
    Ok(vec![])
}

pub fn log_player_created(event: &Event, context: &EventContext) -> Result<Vec<Event>, RuleError> {
    if let Some(created) = event.try_message::<PlayerCreated>() {
        let timestamp = context.attribute("timestamp").map(ToString::to_string);
        tracing::info!(
            player_id = %created.player_id,
            player_name = %created.player_name,
            level = created.initial_level,
            timestamp = timestamp.as_deref().unwrap_or("unknown"),
            "Player joined"
        );
    }
    Ok(vec![])
}

pub fn log_system_tick(event: &Event, _context: &EventContext) -> Result<Vec<Event>, RuleError> {
    let tick = event.try_message::<SystemTick>().map(|t| t.tick_count).unwrap_or(0);
    tracing::debug!(tick, "System tick");
    Ok(vec![])
}

pub fn trace_event_flow(event: &Event, context: &EventContext) -> Result<Vec<Event>, RuleError> {
    tracing::debug!(
        kind = %event.kind(),
        state_path = %context.state_path().join(" -> "),
        attribute_keys = ?context.attributes().keys().collect::<Vec<_>>(),
        "Tracing event flow"
    );
    Ok(vec![])
}

/// Register the bundled handlers and return the shared stats handler so the
/// caller can read its totals afterwards.
pub fn register_default_handlers(registry: &mut HandlerRegistry) -> Arc<GameStatsHandler> {
    let stats = Arc::new(GameStatsHandler::new());

    registry
        .register(
            kinds::SKILL_ON_HIT,
            Arc::new(FnHandler::new("log_skill_hit", kinds::SKILL_ON_HIT, log_skill_hit)),
        )
        .register(
            kinds::SKILL_ON_HIT,
            Arc::new(FnHandler::new("analyze_game_balance", kinds::SKILL_ON_HIT, analyze_game_balance)),
        )
        .register(kinds::SKILL_ON_HIT, stats.clone())
        .register(kinds::PLAYER_HEALTH_CHANGED, Arc::new(PlayerHealthLogger))
        .register(
            kinds::PLAYER_HEALTH_CHANGED,
            Arc::new(FnHandler::new(
                "check_health_threshold",
                kinds::PLAYER_HEALTH_CHANGED,
                check_health_threshold,
            )),
        )
        .register(kinds::PLAYER_HEALTH_CHANGED, stats.clone())
        .register(
            kinds::PLAYER_STATE_CHANGED,
            Arc::new(FnHandler::new(
                "log_state_transition",
                kinds::PLAYER_STATE_CHANGED,
                log_state_transition,
            )),
        )
        .register(kinds::PLAYER_STATE_CHANGED, stats.clone())
        .register(
            kinds::PLAYER_CREATED,
            Arc::new(FnHandler::new("log_player_created", kinds::PLAYER_CREATED, log_player_created)),
        )
        .register(
            kinds::SYSTEM_TICK,
            Arc::new(FnHandler::new("log_system_tick", kinds::SYSTEM_TICK, log_system_tick)),
        )
        .register(
            kinds::DEFAULT,
            Arc::new(FnHandler::new("trace_event_flow", kinds::DEFAULT, trace_event_flow)),
        );

    stats
}
