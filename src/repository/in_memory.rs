// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::errors::ConfigError;
use crate::observability::messages::{tree::LeafRuleRegistered, StructuredLog};
use crate::repository::{ConfigRepository, LeafConfiguration};

/// Repository backed by a map held in memory, standing in for rows that
/// would otherwise come from a database or file.
///
/// Registration takes `&self` so the repository can keep accepting rules
/// after it has been shared with leaf nodes. Leaves that already loaded
/// their rules do not see later registrations.
#[derive(Debug, Default)]
pub struct InMemoryConfigRepository {
    snapshot: RwLock<HashMap<String, Vec<LeafConfiguration>>>,
}

impl InMemoryConfigRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: HashMap<String, Vec<LeafConfiguration>>) -> Result<Self, ConfigError> {
        let repository = Self::new();
        for (leaf_id, configurations) in snapshot {
            for configuration in configurations {
                repository.register(leaf_id.clone(), configuration)?;
            }
        }
        Ok(repository)
    }

    /// Append a rule for `leaf_id`.
    pub fn register(
        &self,
        leaf_id: impl Into<String>,
        configuration: LeafConfiguration,
    ) -> Result<&Self, ConfigError> {
        let leaf_id = leaf_id.into();
        if leaf_id.trim().is_empty() {
            return Err(ConfigError::EmptyLeafId);
        }
        if configuration.trigger().is_empty() {
            return Err(ConfigError::EmptyTriggerKind { leaf_id });
        }

        LeafRuleRegistered {
            leaf_id: &leaf_id,
            trigger: configuration.trigger().as_str(),
            action_count: configuration.actions().len(),
        }
        .log();

        self.snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(leaf_id)
            .or_default()
            .push(configuration);
        Ok(self)
    }

    pub fn leaf_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect();
        ids.sort();
        ids
    }
}

impl ConfigRepository for InMemoryConfigRepository {
    fn load_leaf_config(&self, leaf_id: &str) -> Vec<LeafConfiguration> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(leaf_id)
            .cloned()
            .unwrap_or_default()
    }
}
