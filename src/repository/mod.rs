// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Lookup contract for dynamic leaf rules and an in-memory implementation.

mod in_memory;
mod leaf_config;

pub use in_memory::InMemoryConfigRepository;
pub use leaf_config::LeafConfiguration;

/// Source of leaf rules, keyed by leaf node id.
///
/// An unknown id yields an empty list, never an error.
pub trait ConfigRepository: Send + Sync {
    fn load_leaf_config(&self, leaf_id: &str) -> Vec<LeafConfiguration>;
}
