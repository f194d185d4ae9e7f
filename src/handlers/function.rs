// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

use crate::errors::RuleError;
use crate::events::{Event, EventContext, EventKind};
use crate::traits::EventHandler;

type HandlerFn = dyn Fn(&Event, &EventContext) -> Result<Vec<Event>, RuleError> + Send + Sync;

/// Handler backed by a plain function, accepting exactly one kind.
pub struct FnHandler {
    name: String,
    kind: EventKind,
    func: Box<HandlerFn>,
}

impl FnHandler {
    pub fn new<F>(name: impl Into<String>, kind: EventKind, func: F) -> Self
    where
        F: Fn(&Event, &EventContext) -> Result<Vec<Event>, RuleError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            kind,
            func: Box::new(func),
        }
    }

    pub fn kind(&self) -> &EventKind {
        &self.kind
    }
}

impl EventHandler for FnHandler {
    fn supports(&self, event: &Event) -> bool {
        event.kind() == &self.kind
    }

    fn handle(&self, event: &Event, context: &EventContext) -> Result<Vec<Event>, RuleError> {
        (self.func)(event, context)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Debug for FnHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FnHandler({}, {})", self.kind, self.name)
    }
}
