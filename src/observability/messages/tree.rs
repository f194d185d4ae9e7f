// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for state tree traversal and leaf rule resolution.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A dynamic leaf loaded its rules from the repository (first use only).
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct LeafRulesResolved<'a> {
    pub leaf_id: &'a str,
    pub rule_count: usize,
}

impl Display for LeafRulesResolved<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Leaf '{}' resolved {} rules",
            self.leaf_id, self.rule_count
        )
    }
}

impl StructuredLog for LeafRulesResolved<'_> {
    fn log(&self) {
        tracing::debug!(
            leaf_id = self.leaf_id,
            rule_count = self.rule_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "leaf_rules",
            span_name = name,
            leaf_id = self.leaf_id,
            rule_count = self.rule_count,
        )
    }
}

/// A branch transition accepted an event.
///
/// # Log Level
/// `trace!` - Traversal detail
pub struct TransitionTaken<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub kind: &'a str,
}

impl Display for TransitionTaken<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "'{}' -> '{}' on '{}'", self.from, self.to, self.kind)
    }
}

impl StructuredLog for TransitionTaken<'_> {
    fn log(&self) {
        tracing::trace!(
            from = self.from,
            to = self.to,
            kind = self.kind,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "transition",
            span_name = name,
            from = self.from,
            to = self.to,
            kind = self.kind,
        )
    }
}

/// A leaf rule was appended to a repository.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct LeafRuleRegistered<'a> {
    pub leaf_id: &'a str,
    pub trigger: &'a str,
    pub action_count: usize,
}

impl Display for LeafRuleRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Registered rule on leaf '{}' for '{}' with {} actions",
            self.leaf_id, self.trigger, self.action_count
        )
    }
}

impl StructuredLog for LeafRuleRegistered<'_> {
    fn log(&self) {
        tracing::debug!(
            leaf_id = self.leaf_id,
            trigger = self.trigger,
            action_count = self.action_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "leaf_rule",
            span_name = name,
            leaf_id = self.leaf_id,
            trigger = self.trigger,
        )
    }
}
