// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::errors::RuleError;
use crate::events::{Event, EventContext, EventKind};
use crate::observability::messages::{tree::TransitionTaken, StructuredLog};
use crate::traits::{EventCondition, FnCondition};
use crate::tree::{EventNode, RoutedEvent};

/// Condition plus target node. Targets may be shared between branches.
#[derive(Clone)]
pub struct Transition {
    condition: Arc<dyn EventCondition>,
    target: Arc<dyn EventNode>,
}

impl Transition {
    pub fn new(condition: Arc<dyn EventCondition>, target: Arc<dyn EventNode>) -> Self {
        Self { condition, target }
    }

    /// Unconditional transition.
    pub fn always(target: Arc<dyn EventNode>) -> Self {
        Self::new(Arc::new(FnCondition::always()), target)
    }

    pub fn matches(&self, event: &Event, context: &EventContext) -> Result<bool, RuleError> {
        self.condition.evaluate(event, context)
    }

    pub fn target(&self) -> &Arc<dyn EventNode> {
        &self.target
    }
}

impl fmt::Debug for Transition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transition")
            .field("target", &self.target.id())
            .finish()
    }
}

/// Static routing node: per-kind ordered transitions to child nodes.
///
/// Every matching transition fires, in registration order, so one event may
/// fan out into several downstream flows.
#[derive(Debug)]
pub struct BranchNode {
    id: String,
    transitions: HashMap<EventKind, Vec<Transition>>,
}

impl BranchNode {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            transitions: HashMap::new(),
        }
    }

    pub fn add_transition(&mut self, kind: EventKind, transition: Transition) {
        self.transitions.entry(kind).or_default().push(transition);
    }

    /// Builder form of [`BranchNode::add_transition`].
    pub fn with_transition(mut self, kind: EventKind, transition: Transition) -> Self {
        self.add_transition(kind, transition);
        self
    }

    pub fn transitions_for(&self, kind: &EventKind) -> &[Transition] {
        self.transitions.get(kind).map(Vec::as_slice).unwrap_or(&[])
    }
}

impl EventNode for BranchNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn resolve(&self, event: &Event, node_context: &EventContext) -> Result<Vec<RoutedEvent>, RuleError> {
        let mut routed = Vec::new();
        for transition in self.transitions_for(event.kind()) {
            if !transition.matches(event, node_context)? {
                continue;
            }
            TransitionTaken {
                from: &self.id,
                to: transition.target.id(),
                kind: event.kind().as_str(),
            }
            .log();
            routed.extend(transition.target.handle(event, node_context)?);
        }
        Ok(routed)
    }
}
