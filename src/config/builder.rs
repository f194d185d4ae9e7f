// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use crate::config::{validate_ruleset, ActionCatalog, NodeType, RuleSetConfig};
use crate::errors::{ConfigError, ValidationError};
use crate::events::EventKind;
use crate::repository::{ConfigRepository, InMemoryConfigRepository, LeafConfiguration};
use crate::tree::{BranchNode, DynamicLeafNode, EventNode, EventStateTree, Transition};

/// Turns a [`RuleSetConfig`] into a live state tree.
///
/// Rules go into an [`InMemoryConfigRepository`] that every leaf of the tree
/// loads from. Nodes are built bottom-up from the root, so a node reachable
/// along several paths becomes one shared `Arc` rather than a copy.
pub struct TreeBuilder<'a> {
    cfg: &'a RuleSetConfig,
    catalog: &'a ActionCatalog,
}

impl<'a> TreeBuilder<'a> {
    pub fn new(cfg: &'a RuleSetConfig, catalog: &'a ActionCatalog) -> Self {
        Self { cfg, catalog }
    }

    /// Validate, populate a fresh repository and build the tree.
    pub fn build(&self) -> Result<(EventStateTree, Arc<InMemoryConfigRepository>), ConfigError> {
        validate_ruleset(self.cfg).map_err(ConfigError::Validation)?;

        let repository = Arc::new(InMemoryConfigRepository::new());
        self.populate(&repository)?;

        let tree = self.build_tree(repository.clone())?;
        Ok((tree, repository))
    }

    /// Register every rule into `repository`.
    pub fn populate(&self, repository: &InMemoryConfigRepository) -> Result<(), ConfigError> {
        for rule in &self.cfg.rules {
            let condition = rule.condition.compile(&rule.leaf)?;
            let actions = rule
                .actions
                .iter()
                .map(|name| self.catalog.resolve(&rule.leaf, name))
                .collect::<Result<Vec<_>, _>>()?;

            repository.register(
                rule.leaf.as_str(),
                LeafConfiguration::new(EventKind::new(rule.trigger.as_str()), condition, actions),
            )?;
        }
        Ok(())
    }

    /// Build the node graph only, with leaves reading from `repository`.
    pub fn build_tree(&self, repository: Arc<dyn ConfigRepository>) -> Result<EventStateTree, ConfigError> {
        let mut built = HashMap::new();
        let mut in_progress = HashSet::new();
        let root = self.build_node(&self.cfg.root, &repository, &mut built, &mut in_progress)?;
        Ok(EventStateTree::new(root))
    }

    fn build_node(
        &self,
        id: &str,
        repository: &Arc<dyn ConfigRepository>,
        built: &mut HashMap<String, Arc<dyn EventNode>>,
        in_progress: &mut HashSet<String>,
    ) -> Result<Arc<dyn EventNode>, ConfigError> {
        if let Some(node) = built.get(id) {
            return Ok(node.clone());
        }
        if !in_progress.insert(id.to_string()) {
            return Err(ConfigError::Validation(vec![ValidationError::CyclicTree {
                cycle: vec![id.to_string(), id.to_string()],
            }]));
        }

        let node_cfg = self.cfg.node(id).ok_or_else(|| {
            ConfigError::Validation(vec![ValidationError::MissingRoot {
                root_id: id.to_string(),
            }])
        })?;

        let node: Arc<dyn EventNode> = match node_cfg.node_type {
            NodeType::Leaf => Arc::new(DynamicLeafNode::new(id, repository.clone())),
            NodeType::Branch => {
                let mut branch = BranchNode::new(id);
                for transition in &node_cfg.transitions {
                    let target = self.build_node(&transition.target, repository, built, in_progress)?;
                    let condition = transition.condition.compile(id)?;
                    branch.add_transition(
                        EventKind::new(transition.on.as_str()),
                        Transition::new(condition, target),
                    );
                }
                Arc::new(branch)
            }
        };

        in_progress.remove(id);
        built.insert(id.to_string(), node.clone());
        Ok(node)
    }
}
