// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for rule-set validation warnings and errors.
//!
//! This module contains message types for logging events related to:
//! * Node graph validation
//! * Cyclic node graph detection
//! * Unresolved transition targets
//! * Duplicate node ID detection
//! * Malformed node shapes
//! * Leaves that no rule addresses

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// Cyclic node graph detected in a rule-set.
///
/// # Log Level
/// `error!` - Failure requiring attention
///
/// # Example
/// ```
/// use event_arbor::observability::messages::validation::CyclicTreeDetected;
///
/// let cycle = vec!["root", "skill_flow", "root"];
/// let msg = CyclicTreeDetected {
///     cycle: &cycle,
/// };
///
/// tracing::error!("{}", msg);
/// ```
pub struct CyclicTreeDetected<'a> {
    pub cycle: &'a [&'a str],
}

impl Display for CyclicTreeDetected<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Cyclic node graph detected: {}", self.cycle.join(" -> "))
    }
}

impl StructuredLog for CyclicTreeDetected<'_> {
    fn log(&self) {
        tracing::error!(
            cycle = self.cycle.join(" -> "),
            cycle_length = self.cycle.len(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "span_name",
            name = name,
            cycle = self.cycle.join(" -> "),
            cycle_length = self.cycle.len(),
        )
    }
}

/// A transition names a node that was never declared.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct UnresolvedTarget<'a> {
    pub node_id: &'a str,
    pub missing_target: &'a str,
}

impl Display for UnresolvedTarget<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Node '{}' transitions to missing node '{}'",
            self.node_id, self.missing_target
        )
    }
}

impl StructuredLog for UnresolvedTarget<'_> {
    fn log(&self) {
        tracing::error!(
            node_id = self.node_id,
            missing_target = self.missing_target,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "span_name",
            name = name,
            node_id = self.node_id,
            missing_target = self.missing_target,
        )
    }
}

/// Duplicate node ID detected in a rule-set.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct DuplicateNodeId<'a> {
    pub node_id: &'a str,
}

impl Display for DuplicateNodeId<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Duplicate node ID: '{}'", self.node_id)
    }
}

impl StructuredLog for DuplicateNodeId<'_> {
    fn log(&self) {
        tracing::error!(node_id = self.node_id, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "span_name",
            name = name,
            node_id = self.node_id,
        )
    }
}

/// A node whose declared shape can't be built as written.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct MalformedNode<'a> {
    pub node_id: &'a str,
    pub reason: &'a str,
}

impl Display for MalformedNode<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Node '{}' is malformed: {}", self.node_id, self.reason)
    }
}

impl StructuredLog for MalformedNode<'_> {
    fn log(&self) {
        tracing::error!(node_id = self.node_id, reason = self.reason, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "span_name",
            name = name,
            node_id = self.node_id,
            reason = self.reason,
        )
    }
}

/// A declared leaf has no rules bound to it; it will never produce events.
///
/// # Log Level
/// `warn!` - Potential issue
pub struct LeafWithoutRules<'a> {
    pub leaf_id: &'a str,
}

impl Display for LeafWithoutRules<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Leaf '{}' has no rules and will never emit", self.leaf_id)
    }
}

impl StructuredLog for LeafWithoutRules<'_> {
    fn log(&self) {
        tracing::warn!(leaf_id = self.leaf_id, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::WARN,
            "span_name",
            name = name,
            leaf_id = self.leaf_id,
        )
    }
}

/// Rule-set validation completed.
///
/// # Log Level
/// `info!` - Important operational event
///
/// # Example
/// ```
/// use event_arbor::observability::messages::validation::ValidationCompleted;
///
/// let msg = ValidationCompleted {
///     node_count: 5,
///     rule_count: 2,
///     warning_count: 1,
/// };
///
/// assert!(msg.to_string().contains("1 warnings"));
/// ```
pub struct ValidationCompleted {
    pub node_count: usize,
    pub rule_count: usize,
    pub warning_count: usize,
}

impl Display for ValidationCompleted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        if self.warning_count > 0 {
            write!(
                f,
                "Rule-set validation completed for {} nodes and {} rules with {} warnings",
                self.node_count, self.rule_count, self.warning_count
            )
        } else {
            write!(
                f,
                "Rule-set validation completed successfully for {} nodes and {} rules",
                self.node_count, self.rule_count
            )
        }
    }
}

impl StructuredLog for ValidationCompleted {
    fn log(&self) {
        tracing::info!(
            node_count = self.node_count,
            rule_count = self.rule_count,
            warning_count = self.warning_count,
            has_warnings = self.warning_count > 0,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::INFO,
            "span_name",
            name = name,
            node_count = self.node_count,
            rule_count = self.rule_count,
            warning_count = self.warning_count,
        )
    }
}

/// Rule-set validation failed.
///
/// # Log Level
/// `error!` - Failure requiring attention
pub struct ValidationFailed {
    pub error_count: usize,
}

impl Display for ValidationFailed {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Rule-set validation failed with {} errors",
            self.error_count
        )
    }
}

impl StructuredLog for ValidationFailed {
    fn log(&self) {
        tracing::error!(error_count = self.error_count, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::span!(
            tracing::Level::ERROR,
            "span_name",
            name = name,
            error_count = self.error_count,
        )
    }
}
