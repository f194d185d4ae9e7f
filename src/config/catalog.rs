// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::errors::ConfigError;
use crate::traits::EventAction;

/// Named actions a rule-set file can refer to.
///
/// Rule files only carry action names; the catalog maps each name to the
/// code that runs. Which actions exist is decided by the program embedding
/// the engine (see `demo::action_catalog` for the bundled ones).
#[derive(Clone, Default)]
pub struct ActionCatalog {
    actions: HashMap<String, Arc<dyn EventAction>>,
}

impl ActionCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace the action stored under `name`.
    pub fn register(&mut self, name: impl Into<String>, action: Arc<dyn EventAction>) -> &mut Self {
        self.actions.insert(name.into(), action);
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn EventAction>> {
        self.actions.get(name).cloned()
    }

    /// Look up `name` on behalf of a rule bound to `leaf_id`.
    pub fn resolve(&self, leaf_id: &str, name: &str) -> Result<Arc<dyn EventAction>, ConfigError> {
        self.get(name).ok_or_else(|| ConfigError::UnknownAction {
            leaf_id: leaf_id.to_string(),
            action: name.to_string(),
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.actions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }
}

impl fmt::Debug for ActionCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionCatalog")
            .field("names", &self.names())
            .finish()
    }
}
