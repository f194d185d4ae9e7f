// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Typed payloads for the bundled player, skill and system events.
//!
//! Events carry untyped JSON payloads; these structs are how handlers and
//! actions read and write them (`Event::message` / `Event::from_message`).

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerCreated {
    pub player_id: String,
    pub player_name: String,
    #[serde(default = "default_level")]
    pub initial_level: u32,
}

fn default_level() -> u32 {
    1
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerHealthChanged {
    pub player_id: String,
    pub value: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_event: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStateChanged {
    pub player_id: String,
    pub state: String,
    /// State path of the leaf that flagged the change
    #[serde(default)]
    pub trail: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillHit {
    pub skill_id: String,
    pub target_id: String,
    #[serde(default)]
    pub damage: i64,
    #[serde(default)]
    pub is_critical: bool,
    #[serde(default)]
    pub is_extra_damage: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillEnd {
    pub skill_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemTick {
    pub tick_count: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
}
