// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::RuleError;
use crate::events::{Event, EventContext};

/// A registry-side consumer of events.
///
/// Handlers are registered under one or more kinds, but `supports` may still
/// refuse an event of a registered kind (for example by payload shape).
/// Handlers may keep private state across `emit` calls.
pub trait EventHandler: Send + Sync {
    fn supports(&self, event: &Event) -> bool;

    fn handle(&self, event: &Event, context: &EventContext) -> Result<Vec<Event>, RuleError>;

    fn name(&self) -> &str;
}
