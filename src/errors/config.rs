// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use thiserror::Error;

/// Structural problems found while validating a rule-set's node graph.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// The node graph reaches itself again through transitions
    CyclicTree {
        /// The cycle path, first node repeated at the end
        cycle: Vec<String>,
    },
    /// A transition names a node that is not declared
    UnresolvedTarget {
        /// The branch owning the transition
        node_id: String,
        /// The target that couldn't be resolved
        missing_target: String,
    },
    /// Two nodes share an id
    DuplicateNodeId { node_id: String },
    /// The configured root id is not declared
    MissingRoot { root_id: String },
    /// A rule is bound to an id that is not a declared leaf
    UnknownLeaf { leaf_id: String },
    /// A leaf declares transitions, which only branches can follow
    LeafWithTransitions { node_id: String },
    /// A transition has an empty `on` kind and could never be taken
    EmptyTransitionKind { node_id: String, target: String },
    /// `max_events: 0` would reject every seed event
    ZeroEventBudget,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::CyclicTree { cycle } => {
                write!(f, "Cyclic node graph detected: {}", cycle.join(" -> "))
            }
            ValidationError::UnresolvedTarget {
                node_id,
                missing_target,
            } => {
                write!(
                    f,
                    "Node '{}' transitions to '{}' which does not exist",
                    node_id, missing_target
                )
            }
            ValidationError::DuplicateNodeId { node_id } => {
                write!(f, "Duplicate node ID: '{}'", node_id)
            }
            ValidationError::MissingRoot { root_id } => {
                write!(f, "Root node '{}' is not declared", root_id)
            }
            ValidationError::UnknownLeaf { leaf_id } => {
                write!(f, "Rule targets '{}' which is not a declared leaf node", leaf_id)
            }
            ValidationError::LeafWithTransitions { node_id } => {
                write!(f, "Leaf '{}' declares transitions; only branches may", node_id)
            }
            ValidationError::EmptyTransitionKind { node_id, target } => {
                write!(
                    f,
                    "Node '{}' has a transition to '{}' with an empty event kind",
                    node_id, target
                )
            }
            ValidationError::ZeroEventBudget => {
                write!(f, "max_events must be at least 1")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Configuration-shape errors, raised at registration or build time.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("leaf configuration registered with an empty leaf id")]
    EmptyLeafId,

    #[error("leaf configuration for '{leaf_id}' has an empty trigger kind")]
    EmptyTriggerKind { leaf_id: String },

    #[error("unknown action '{action}' referenced by leaf '{leaf_id}'")]
    UnknownAction { leaf_id: String, action: String },

    /// `owner` is the leaf or branch the condition is attached to
    #[error("invalid condition on '{owner}': {reason}")]
    InvalidCondition { owner: String, reason: String },

    #[error("Configuration validation failed:\n{}", join_lines(.0))]
    Validation(Vec<ValidationError>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

fn join_lines(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}
