// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Structural validation for rule-set files.
//!
//! Nodes in a built tree are shared `Arc`s assembled bottom-up, so a cyclic
//! or dangling node graph has to be rejected before building starts. The
//! checks run in a fixed order:
//!
//! 1. **Uniqueness**: node ids are unique
//! 2. **Root**: the configured root id is declared
//! 3. **References**: every transition target is declared
//! 4. **Node shape**: leaves declare no transitions and every transition
//!    names a non-empty event kind
//! 5. **Rule placement**: every rule is bound to a declared leaf
//! 6. **Budget**: `max_events`, when set, is at least 1
//! 7. **Cycle detection**: DFS over transitions with a recursion stack
//!
//! Cycle detection needs a graph whose edges all resolve, so it only runs
//! when the earlier checks found nothing. Leaves that no rule addresses are
//! legal (they never produce anything) and are only logged as warnings.
//!
//! # Example
//!
//! ```rust
//! use event_arbor::config::{parse_ruleset, validate_ruleset};
//! use event_arbor::errors::ValidationError;
//!
//! let cfg = parse_ruleset(r#"
//! root: root
//! nodes:
//!   - id: root
//!     type: branch
//!     transitions:
//!       - { on: skill.on_hit, target: loop }
//!   - id: loop
//!     type: branch
//!     transitions:
//!       - { on: skill.on_hit, target: root }
//! "#).unwrap();
//!
//! let errors = validate_ruleset(&cfg).unwrap_err();
//! assert!(matches!(errors[0], ValidationError::CyclicTree { .. }));
//! ```

use std::collections::{HashMap, HashSet};

use crate::config::{NodeType, RuleSetConfig};
use crate::errors::ValidationError;
use crate::observability::messages::validation::{
    CyclicTreeDetected, DuplicateNodeId, LeafWithoutRules, MalformedNode, UnresolvedTarget,
    ValidationCompleted, ValidationFailed,
};
use crate::observability::messages::StructuredLog;

/// Validate a rule-set's node graph and rule bindings.
///
/// Accumulates every error it can find rather than stopping at the first.
pub fn validate_ruleset(cfg: &RuleSetConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(duplicate_errors) = validate_unique_node_ids(cfg) {
        errors.extend(duplicate_errors);
    }

    if cfg.node(&cfg.root).is_none() {
        errors.push(ValidationError::MissingRoot {
            root_id: cfg.root.clone(),
        });
    }

    if let Err(unresolved_errors) = validate_transition_targets(cfg) {
        errors.extend(unresolved_errors);
    }

    if let Err(shape_errors) = validate_node_shapes(cfg) {
        errors.extend(shape_errors);
    }

    if let Err(rule_errors) = validate_rule_leaves(cfg) {
        errors.extend(rule_errors);
    }

    if cfg.max_events == Some(0) {
        errors.push(ValidationError::ZeroEventBudget);
    }

    if errors.is_empty() {
        if let Err(cycle_errors) = validate_acyclic_tree(cfg) {
            errors.extend(cycle_errors);
        }
    }

    if errors.is_empty() {
        let warning_count = warn_leaves_without_rules(cfg);
        ValidationCompleted {
            node_count: cfg.nodes.len(),
            rule_count: cfg.rules.len(),
            warning_count,
        }
        .log();
        Ok(())
    } else {
        ValidationFailed {
            error_count: errors.len(),
        }
        .log();
        Err(errors)
    }
}

fn validate_unique_node_ids(cfg: &RuleSetConfig) -> Result<(), Vec<ValidationError>> {
    let mut seen_ids = HashSet::new();
    let mut errors = Vec::new();

    for node in &cfg.nodes {
        if !seen_ids.insert(node.id.as_str()) {
            DuplicateNodeId { node_id: &node.id }.log();
            errors.push(ValidationError::DuplicateNodeId {
                node_id: node.id.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_transition_targets(cfg: &RuleSetConfig) -> Result<(), Vec<ValidationError>> {
    let node_ids: HashSet<&str> = cfg.nodes.iter().map(|n| n.id.as_str()).collect();
    let mut errors = Vec::new();

    for node in &cfg.nodes {
        for transition in &node.transitions {
            if !node_ids.contains(transition.target.as_str()) {
                UnresolvedTarget {
                    node_id: &node.id,
                    missing_target: &transition.target,
                }
                .log();
                errors.push(ValidationError::UnresolvedTarget {
                    node_id: node.id.clone(),
                    missing_target: transition.target.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_node_shapes(cfg: &RuleSetConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    for node in &cfg.nodes {
        if node.node_type == NodeType::Leaf && !node.transitions.is_empty() {
            MalformedNode {
                node_id: &node.id,
                reason: "leaf declares transitions",
            }
            .log();
            errors.push(ValidationError::LeafWithTransitions {
                node_id: node.id.clone(),
            });
            continue;
        }

        for transition in &node.transitions {
            if transition.on.trim().is_empty() {
                MalformedNode {
                    node_id: &node.id,
                    reason: "transition with an empty event kind",
                }
                .log();
                errors.push(ValidationError::EmptyTransitionKind {
                    node_id: node.id.clone(),
                    target: transition.target.clone(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_rule_leaves(cfg: &RuleSetConfig) -> Result<(), Vec<ValidationError>> {
    let leaf_ids: HashSet<&str> = cfg.leaf_ids().collect();
    let mut reported = HashSet::new();
    let mut errors = Vec::new();

    for rule in &cfg.rules {
        if !leaf_ids.contains(rule.leaf.as_str()) && reported.insert(rule.leaf.as_str()) {
            errors.push(ValidationError::UnknownLeaf {
                leaf_id: rule.leaf.clone(),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// DFS with a recursion stack over branch → target edges.
///
/// A neighbour found on the current recursion stack closes a cycle; the
/// reported path runs from that neighbour back to itself.
fn validate_acyclic_tree(cfg: &RuleSetConfig) -> Result<(), Vec<ValidationError>> {
    let mut graph: HashMap<&str, Vec<&str>> = HashMap::new();
    for node in &cfg.nodes {
        let targets = graph.entry(node.id.as_str()).or_default();
        if node.node_type == NodeType::Branch {
            targets.extend(node.transitions.iter().map(|t| t.target.as_str()));
        }
    }

    let mut visited = HashSet::new();
    let mut rec_stack = HashSet::new();
    let mut path = Vec::new();

    for node in &cfg.nodes {
        if !visited.contains(node.id.as_str()) {
            if let Some(cycle) = dfs_cycle_detection(
                node.id.as_str(),
                &graph,
                &mut visited,
                &mut rec_stack,
                &mut path,
            ) {
                CyclicTreeDetected { cycle: &cycle }.log();
                return Err(vec![ValidationError::CyclicTree {
                    cycle: cycle.iter().map(|id| id.to_string()).collect(),
                }]);
            }
        }
    }

    Ok(())
}

fn dfs_cycle_detection<'a>(
    node: &'a str,
    graph: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    rec_stack: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
) -> Option<Vec<&'a str>> {
    visited.insert(node);
    rec_stack.insert(node);
    path.push(node);

    if let Some(neighbors) = graph.get(node) {
        for &neighbor in neighbors {
            if !visited.contains(neighbor) {
                if let Some(cycle) = dfs_cycle_detection(neighbor, graph, visited, rec_stack, path) {
                    return Some(cycle);
                }
            } else if rec_stack.contains(neighbor) {
                let cycle_start = path.iter().position(|id| *id == neighbor).unwrap_or(0);
                let mut cycle = path[cycle_start..].to_vec();
                cycle.push(neighbor);
                return Some(cycle);
            }
        }
    }

    rec_stack.remove(node);
    path.pop();
    None
}

fn warn_leaves_without_rules(cfg: &RuleSetConfig) -> usize {
    let addressed: HashSet<&str> = cfg.rules.iter().map(|r| r.leaf.as_str()).collect();
    let mut warnings = 0;
    for leaf_id in cfg.leaf_ids() {
        if !addressed.contains(leaf_id) {
            LeafWithoutRules { leaf_id }.log();
            warnings += 1;
        }
    }
    warnings
}
