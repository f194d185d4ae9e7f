// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::{Arc, OnceLock};

use crate::errors::RuleError;
use crate::events::{Event, EventContext};
use crate::observability::messages::{tree::LeafRulesResolved, StructuredLog};
use crate::repository::{ConfigRepository, LeafConfiguration};
use crate::tree::{EventNode, RoutedEvent};

/// Leaf whose rules come from a [`ConfigRepository`], looked up by the leaf's
/// own id.
///
/// Rules are fetched on first use and kept for the node's lifetime. There is
/// no invalidation: build a new node to pick up repository changes.
pub struct DynamicLeafNode {
    id: String,
    repository: Arc<dyn ConfigRepository>,
    rules: OnceLock<Vec<LeafConfiguration>>,
}

impl DynamicLeafNode {
    pub fn new(id: impl Into<String>, repository: Arc<dyn ConfigRepository>) -> Self {
        Self {
            id: id.into(),
            repository,
            rules: OnceLock::new(),
        }
    }

    /// The cached rule set, loading it on first access.
    pub fn rules(&self) -> &[LeafConfiguration] {
        self.rules.get_or_init(|| {
            let rules = self.repository.load_leaf_config(&self.id);
            LeafRulesResolved {
                leaf_id: &self.id,
                rule_count: rules.len(),
            }
            .log();
            rules
        })
    }

    pub fn is_resolved(&self) -> bool {
        self.rules.get().is_some()
    }
}

impl EventNode for DynamicLeafNode {
    fn id(&self) -> &str {
        &self.id
    }

    fn resolve(&self, event: &Event, node_context: &EventContext) -> Result<Vec<RoutedEvent>, RuleError> {
        let mut routed = Vec::new();
        for rule in self.rules() {
            if rule.trigger() != event.kind() {
                continue;
            }
            if !rule.condition().evaluate(event, node_context)? {
                continue;
            }
            for action in rule.actions() {
                let produced = action.produce(event, node_context)?;
                routed.extend(
                    produced
                        .into_iter()
                        .map(|next| RoutedEvent::new(next, node_context.clone())),
                );
            }
        }
        Ok(routed)
    }
}

impl fmt::Debug for DynamicLeafNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicLeafNode")
            .field("id", &self.id)
            .field("resolved", &self.is_resolved())
            .finish()
    }
}
