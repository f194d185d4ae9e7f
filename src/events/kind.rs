// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Routing key for events.
///
/// Both the state tree and the handler registry match on kind equality only;
/// there is no hierarchy between kinds (`skill.on_hit` does not match `skill`).
/// Well-known kinds live in [`kinds`]; rule-set files may name any other kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventKind(Cow<'static, str>);

impl EventKind {
    pub const fn from_static(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }

    pub fn new(name: impl Into<String>) -> Self {
        Self(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&'static str> for EventKind {
    fn from(name: &'static str) -> Self {
        Self::from_static(name)
    }
}

impl From<String> for EventKind {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

/// Event kinds used by the bundled player/skill/system payloads.
pub mod kinds {
    use super::EventKind;

    pub const DEFAULT: EventKind = EventKind::from_static("default");
    pub const PLAYER_CREATED: EventKind = EventKind::from_static("player.created");
    pub const PLAYER_HEALTH_CHANGED: EventKind = EventKind::from_static("player.health_changed");
    pub const PLAYER_STATE_CHANGED: EventKind = EventKind::from_static("player.state_changed");
    pub const SYSTEM_TICK: EventKind = EventKind::from_static("system.tick");

    pub const SKILL_ON_TRIGGERING: EventKind = EventKind::from_static("skill.on_triggering");
    pub const SKILL_ON_HIT: EventKind = EventKind::from_static("skill.on_hit");
    pub const SKILL_ON_END: EventKind = EventKind::from_static("skill.on_end");
}
