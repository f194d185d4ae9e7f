// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for the dispatcher's propagation loop.
//!
//! This module contains message types for logging events related to:
//! * `emit` lifecycle (start, completion, failure)
//! * Per-event progress through the work queue
//! * The optional dispatch budget

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// An `emit` call started.
///
/// # Log Level
/// `info!` - Important operational event
pub struct EmitStarted<'a> {
    pub kind: &'a str,
    pub attribute_count: usize,
}

impl Display for EmitStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Emitting '{}' with {} context attributes",
            self.kind, self.attribute_count
        )
    }
}

impl StructuredLog for EmitStarted<'_> {
    fn log(&self) {
        tracing::info!(
            kind = self.kind,
            attribute_count = self.attribute_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "emit",
            span_name = name,
            kind = self.kind,
            attribute_count = self.attribute_count,
        )
    }
}

/// An `emit` call drained its queue.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use event_arbor::observability::messages::dispatch::EmitCompleted;
/// use std::time::Duration;
///
/// let msg = EmitCompleted {
///     kind: "skill.on_hit",
///     processed_count: 3,
///     duration: Duration::from_micros(250),
/// };
///
/// assert_eq!(msg.to_string(), "Emit of 'skill.on_hit' processed 3 events in 250µs");
/// ```
pub struct EmitCompleted<'a> {
    pub kind: &'a str,
    pub processed_count: usize,
    pub duration: std::time::Duration,
}

impl Display for EmitCompleted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Emit of '{}' processed {} events in {:?}",
            self.kind, self.processed_count, self.duration
        )
    }
}

impl StructuredLog for EmitCompleted<'_> {
    fn log(&self) {
        tracing::info!(
            kind = self.kind,
            processed_count = self.processed_count,
            duration_us = self.duration.as_micros() as u64,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "emit_completed",
            span_name = name,
            kind = self.kind,
            processed_count = self.processed_count,
            duration = ?self.duration,
        )
    }
}

/// A rule failed and aborted the `emit` call.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct EmitFailed<'a> {
    pub kind: &'a str,
    pub processed_count: usize,
    pub error: &'a dyn std::error::Error,
}

impl Display for EmitFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Emit aborted while processing '{}' after {} events: {}",
            self.kind, self.processed_count, self.error
        )
    }
}

impl StructuredLog for EmitFailed<'_> {
    fn log(&self) {
        tracing::error!(
            kind = self.kind,
            processed_count = self.processed_count,
            error = %self.error,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "emit_failed",
            span_name = name,
            kind = self.kind,
            processed_count = self.processed_count,
            error = %self.error,
        )
    }
}

/// One event was taken off the work queue.
///
/// # Log Level
/// `debug!` - Per-event progress
pub struct EventDequeued<'a> {
    pub kind: &'a str,
    pub sequence: usize,
    pub queue_depth: usize,
    pub state_path: &'a [String],
}

impl Display for EventDequeued<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Processing event #{} '{}' ({} queued, path=[{}])",
            self.sequence,
            self.kind,
            self.queue_depth,
            self.state_path.join(" -> ")
        )
    }
}

impl StructuredLog for EventDequeued<'_> {
    fn log(&self) {
        tracing::debug!(
            kind = self.kind,
            sequence = self.sequence,
            queue_depth = self.queue_depth,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "event",
            span_name = name,
            kind = self.kind,
            sequence = self.sequence,
        )
    }
}

/// Follow-up events were queued for one processed event.
///
/// # Log Level
/// `debug!` - Per-event progress
pub struct FollowUpsQueued<'a> {
    pub kind: &'a str,
    pub from_handlers: usize,
    pub from_tree: usize,
}

impl Display for FollowUpsQueued<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "'{}' produced {} handler and {} tree follow-ups",
            self.kind, self.from_handlers, self.from_tree
        )
    }
}

impl StructuredLog for FollowUpsQueued<'_> {
    fn log(&self) {
        tracing::debug!(
            kind = self.kind,
            from_handlers = self.from_handlers,
            from_tree = self.from_tree,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "follow_ups",
            span_name = name,
            kind = self.kind,
            from_handlers = self.from_handlers,
            from_tree = self.from_tree,
        )
    }
}

/// The configured dispatch budget stopped propagation.
///
/// # Log Level
/// `warn!` - Degraded behavior
pub struct BudgetExhausted<'a> {
    pub kind: &'a str,
    pub limit: usize,
}

impl Display for BudgetExhausted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Dispatch budget of {} events exhausted while emitting '{}'",
            self.limit, self.kind
        )
    }
}

impl StructuredLog for BudgetExhausted<'_> {
    fn log(&self) {
        tracing::warn!(
            kind = self.kind,
            limit = self.limit,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "budget_exhausted",
            span_name = name,
            kind = self.kind,
            limit = self.limit,
        )
    }
}
