// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

use crate::errors::RuleError;
use crate::events::{Event, EventContext};

/// Producer of follow-up events.
///
/// An action may keep private state (counters, logs) but never modifies the
/// event or context it is given. The returned vector is the complete, ordered
/// output; a failure discards whatever the action had built so far.
pub trait EventAction: Send + Sync {
    fn produce(&self, event: &Event, context: &EventContext) -> Result<Vec<Event>, RuleError>;
}

type ActionFn = dyn Fn(&Event, &EventContext) -> Result<Vec<Event>, RuleError> + Send + Sync;

/// Adapter turning a plain function into an [`EventAction`].
pub struct FnAction {
    name: String,
    func: Box<ActionFn>,
}

impl FnAction {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Event, &EventContext) -> Result<Vec<Event>, RuleError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Box::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl EventAction for FnAction {
    fn produce(&self, event: &Event, context: &EventContext) -> Result<Vec<Event>, RuleError> {
        (self.func)(event, context)
    }
}

impl fmt::Debug for FnAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnAction").field("name", &self.name).finish()
    }
}
