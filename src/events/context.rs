// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Ambient key/value parameters (thresholds, simulation inputs).
pub type Attributes = BTreeMap<String, Value>;

/// Immutable value carried alongside an event through one traversal.
///
/// `state_path` grows by one node id each time a tree node accepts the event.
/// `attributes` is shared by reference: every context derived from this one
/// (path extensions and path resets alike) points at the same map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventContext {
    state_path: Vec<String>,
    attributes: Arc<Attributes>,
}

impl EventContext {
    pub fn new(attributes: Attributes) -> Self {
        Self {
            state_path: Vec::new(),
            attributes: Arc::new(attributes),
        }
    }

    pub fn from_pairs<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        Self::new(pairs.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn state_path(&self) -> &[String] {
        &self.state_path
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Numeric attribute, `None` when absent or not a number.
    pub fn attribute_f64(&self, key: &str) -> Option<f64> {
        self.attribute(key).and_then(Value::as_f64)
    }

    /// A new context whose path has `node_id` appended.
    pub fn with_state(&self, node_id: &str) -> Self {
        let mut state_path = Vec::with_capacity(self.state_path.len() + 1);
        state_path.extend_from_slice(&self.state_path);
        state_path.push(node_id.to_string());
        Self {
            state_path,
            attributes: Arc::clone(&self.attributes),
        }
    }

    /// A new context with an empty path and the same attribute map.
    pub fn with_reset_path(&self) -> Self {
        Self {
            state_path: Vec::new(),
            attributes: Arc::clone(&self.attributes),
        }
    }

    /// True when both contexts point at the same attribute map.
    pub fn shares_attributes_with(&self, other: &EventContext) -> bool {
        Arc::ptr_eq(&self.attributes, &other.attributes)
    }
}
