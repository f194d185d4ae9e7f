// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::errors::RuleError;
use crate::events::{Event, EventContext};
use crate::tree::{EventNode, RoutedEvent};

/// Owns the root node and runs events through it.
#[derive(Clone)]
pub struct EventStateTree {
    root: Arc<dyn EventNode>,
}

impl EventStateTree {
    pub fn new(root: Arc<dyn EventNode>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Arc<dyn EventNode> {
        &self.root
    }

    /// Route `event` from the root. `None` means a default (empty) context.
    pub fn dispatch(&self, event: &Event, context: Option<&EventContext>) -> Result<Vec<RoutedEvent>, RuleError> {
        match context {
            Some(context) => self.root.handle(event, context),
            None => self.root.handle(event, &EventContext::default()),
        }
    }
}

impl std::fmt::Debug for EventStateTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventStateTree")
            .field("root", &self.root.id())
            .finish()
    }
}
