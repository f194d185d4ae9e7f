// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::conditions::ConditionSpec;
use crate::errors::ConfigError;
use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A complete routing setup: the node graph, the leaf rules and the ambient
/// attributes events are emitted with by default.
///
/// It is typically loaded from a YAML rule-set file.
///
/// # Fields
/// * `root` - Id of the node every traversal starts at
/// * `attributes` - Default context attributes (optional, defaults empty)
/// * `max_events` - Per-`emit` processing budget (optional, defaults unbounded)
/// * `nodes` - Branch and leaf node declarations
/// * `rules` - Leaf rules, stored in the repository leaves load from
///
/// # Example
/// ```yaml
/// root: root
/// attributes:
///   damage_threshold: 100
/// nodes:
///   - id: root
///     type: branch
///     transitions:
///       - on: skill.on_hit
///         target: skill.damage
///   - id: skill.damage
///     type: leaf
/// rules:
///   - leaf: skill.damage
///     trigger: skill.on_hit
///     actions: [emit_health_change]
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct RuleSetConfig {
    pub root: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
    #[serde(default)]
    pub max_events: Option<usize>,
    pub nodes: Vec<NodeConfig>,
    #[serde(default)]
    pub rules: Vec<RuleConfig>,
}

impl RuleSetConfig {
    pub fn node(&self, id: &str) -> Option<&NodeConfig> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// Ids of every node declared as a leaf, in declaration order.
    pub fn leaf_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes
            .iter()
            .filter(|node| node.node_type == NodeType::Leaf)
            .map(|node| node.id.as_str())
    }
}

/// A single node in the state tree.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeConfig {
    pub id: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    #[serde(default)]
    pub transitions: Vec<TransitionConfig>, // branches only
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NodeType {
    Branch,
    Leaf,
}

/// An edge out of a branch, taken for events of kind `on` when `condition`
/// holds.
#[derive(Debug, Clone, Deserialize)]
pub struct TransitionConfig {
    pub on: String,
    pub target: String,
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub condition: ConditionSpec,
}

/// One leaf rule: when `leaf` receives `trigger` and `condition` holds, run
/// the named `actions` in order.
#[derive(Debug, Clone, Deserialize)]
pub struct RuleConfig {
    pub leaf: String,
    pub trigger: String,
    #[serde(default, with = "serde_yaml::with::singleton_map_recursive")]
    pub condition: ConditionSpec,
    #[serde(default)]
    pub actions: Vec<String>,
}

/// Load a rule-set from a YAML file
pub fn load_ruleset<P: AsRef<Path>>(path: P) -> Result<RuleSetConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_ruleset(&content)
}

/// Parse a rule-set from YAML text
pub fn parse_ruleset(content: &str) -> Result<RuleSetConfig, ConfigError> {
    let cfg: RuleSetConfig = serde_yaml::from_str(content)?;
    Ok(cfg)
}

/// Load and validate a rule-set from a YAML file
///
/// Every structural problem is reported at once through
/// [`ConfigError::Validation`].
pub fn load_and_validate_ruleset<P: AsRef<Path>>(path: P) -> Result<RuleSetConfig, ConfigError> {
    let cfg = load_ruleset(path)?;
    crate::config::validate_ruleset(&cfg).map_err(ConfigError::Validation)?;
    Ok(cfg)
}
