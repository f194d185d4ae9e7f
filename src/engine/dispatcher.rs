// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Breadth-first propagation loop merging the handler registry and the state tree.
//!
//! # Algorithm
//!
//! One `emit` call seeds a FIFO work queue with the initial `(event, context)`
//! pair and then, until the queue drains:
//!
//! 1. dequeue `(event, context)` and record `event` as processed
//! 2. run every matching handler with `context`
//! 3. run the state tree from its root with `context`
//! 4. enqueue handler outputs with `context` unchanged
//! 5. enqueue tree outputs with an empty path but the producing traversal's
//!    attribute map, so they start a fresh traversal from the root
//!
//! ```text
//!              ┌──────────────────────────────┐
//!   seed ───▶  │ queue (FIFO)                 │ ───▶ processed
//!              └──────────────────────────────┘
//!                  ▲                   ▲
//!   handlers ──────┘ same context      │
//!   tree ──────────────────────────────┘ path reset, attributes kept
//! ```
//!
//! The processed list is therefore breadth-first over the propagation graph:
//! the seed, then all of its handler products followed by its tree products,
//! then their products, and so on.
//!
//! # Termination
//!
//! The loop stops when nothing produces further events. A rule set that keeps
//! re-emitting a kind it also listens to never terminates; by default no cycle
//! detection or step limit is applied. [`DispatchOptions::max_events`] turns on
//! an optional budget that aborts with [`DispatchError::BudgetExceeded`].
//!
//! # Failures
//!
//! The first [`RuleError`](crate::errors::RuleError) raised by a condition,
//! action or handler aborts the call. Side effects already performed by
//! handlers and actions are not rolled back.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use event_arbor::engine::EventDispatcher;
//! use event_arbor::events::{kinds, Event};
//! use event_arbor::handlers::HandlerRegistry;
//! use event_arbor::tree::{BranchNode, EventStateTree};
//!
//! let tree = EventStateTree::new(Arc::new(BranchNode::new("root")));
//! let dispatcher = EventDispatcher::new(tree, HandlerRegistry::new());
//!
//! let processed = dispatcher.emit(Event::bare(kinds::SYSTEM_TICK), None).unwrap();
//! assert_eq!(processed, vec![Event::bare(kinds::SYSTEM_TICK)]);
//! ```

use std::collections::VecDeque;
use std::time::Instant;

use crate::errors::DispatchError;
use crate::events::{Event, EventContext};
use crate::handlers::HandlerRegistry;
use crate::observability::messages::dispatch::{
    BudgetExhausted, EmitCompleted, EmitFailed, EmitStarted, EventDequeued, FollowUpsQueued,
};
use crate::observability::messages::StructuredLog;
use crate::tree::{EventStateTree, RoutedEvent};

/// Tuning knobs for a dispatcher.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOptions {
    /// Maximum number of events one `emit` call may process. `None` is unbounded.
    pub max_events: Option<usize>,
}

impl DispatchOptions {
    pub fn with_max_events(max_events: usize) -> Self {
        Self {
            max_events: Some(max_events),
        }
    }
}

/// Routes events through a [`HandlerRegistry`] and an [`EventStateTree`].
///
/// Single-threaded by contract: one `emit` runs to completion before the
/// next starts. Concurrent calls on one instance are memory-safe but leave
/// stateful handlers and the processing order undefined.
#[derive(Debug)]
pub struct EventDispatcher {
    tree: EventStateTree,
    registry: HandlerRegistry,
    options: DispatchOptions,
}

impl EventDispatcher {
    pub fn new(tree: EventStateTree, registry: HandlerRegistry) -> Self {
        Self::with_options(tree, registry, DispatchOptions::default())
    }

    pub fn with_options(tree: EventStateTree, registry: HandlerRegistry, options: DispatchOptions) -> Self {
        Self {
            tree,
            registry,
            options,
        }
    }

    pub fn tree(&self) -> &EventStateTree {
        &self.tree
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut HandlerRegistry {
        &mut self.registry
    }

    pub fn options(&self) -> DispatchOptions {
        self.options
    }

    /// Process `event` and everything it transitively produces.
    ///
    /// Returns every processed event in dequeue order, seed first.
    pub fn emit(&self, event: Event, context: Option<EventContext>) -> Result<Vec<Event>, DispatchError> {
        Ok(self
            .emit_traced(event, context)?
            .into_iter()
            .map(|routed| routed.event)
            .collect())
    }

    /// Like [`EventDispatcher::emit`], but keeps the context each event was
    /// processed under.
    pub fn emit_traced(
        &self,
        event: Event,
        context: Option<EventContext>,
    ) -> Result<Vec<RoutedEvent>, DispatchError> {
        let context = context.unwrap_or_default();
        let seed_kind = event.kind().clone();

        let started = EmitStarted {
            kind: seed_kind.as_str(),
            attribute_count: context.attributes().len(),
        };
        let span = started.span("emit");
        let _guard = span.enter();
        started.log();

        let start_time = Instant::now();
        let mut queue = VecDeque::from([RoutedEvent::new(event, context)]);
        let mut processed: Vec<RoutedEvent> = Vec::new();

        while let Some(current) = queue.pop_front() {
            if let Some(limit) = self.options.max_events {
                if processed.len() >= limit {
                    BudgetExhausted {
                        kind: seed_kind.as_str(),
                        limit,
                    }
                    .log();
                    return Err(DispatchError::BudgetExceeded {
                        limit,
                        processed: processed.len(),
                    });
                }
            }

            EventDequeued {
                kind: current.event.kind().as_str(),
                sequence: processed.len() + 1,
                queue_depth: queue.len(),
                state_path: current.context.state_path(),
            }
            .log();

            let (from_handlers, from_tree) = match self.step(&current) {
                Ok(products) => products,
                Err(error) => {
                    EmitFailed {
                        kind: current.event.kind().as_str(),
                        processed_count: processed.len() + 1,
                        error: &error,
                    }
                    .log();
                    return Err(error.into());
                }
            };

            FollowUpsQueued {
                kind: current.event.kind().as_str(),
                from_handlers: from_handlers.len(),
                from_tree: from_tree.len(),
            }
            .log();

            queue.extend(
                from_handlers
                    .into_iter()
                    .map(|next| RoutedEvent::new(next, current.context.clone())),
            );
            queue.extend(
                from_tree
                    .into_iter()
                    .map(|routed| RoutedEvent::new(routed.event, routed.context.with_reset_path())),
            );

            processed.push(current);
        }

        EmitCompleted {
            kind: seed_kind.as_str(),
            processed_count: processed.len(),
            duration: start_time.elapsed(),
        }
        .log();

        Ok(processed)
    }

    /// Handlers first, then the tree, both with the dequeued context.
    fn step(&self, current: &RoutedEvent) -> Result<(Vec<Event>, Vec<RoutedEvent>), crate::errors::RuleError> {
        let from_handlers = self.registry.handle(&current.event, &current.context)?;
        let from_tree = self.tree.dispatch(&current.event, Some(&current.context))?;
        Ok((from_handlers, from_tree))
    }
}
