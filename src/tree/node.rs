// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::RuleError;
use crate::events::{Event, EventContext};

/// A follow-up event together with the context of the node that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutedEvent {
    pub event: Event,
    pub context: EventContext,
}

impl RoutedEvent {
    pub fn new(event: Event, context: EventContext) -> Self {
        Self { event, context }
    }
}

/// A node of the event state tree.
///
/// Implementors provide [`EventNode::resolve`]; callers use
/// [`EventNode::handle`], which first appends the node's id to the context
/// path and hands that extended context to `resolve`.
pub trait EventNode: Send + Sync {
    fn id(&self) -> &str;

    /// Node-specific resolution, given the context already extended with this node.
    fn resolve(&self, event: &Event, node_context: &EventContext) -> Result<Vec<RoutedEvent>, RuleError>;

    fn handle(&self, event: &Event, context: &EventContext) -> Result<Vec<RoutedEvent>, RuleError> {
        let node_context = context.with_state(self.id());
        self.resolve(event, &node_context)
    }
}
