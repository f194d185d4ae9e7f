// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Hierarchical, condition-gated state tree.
//!
//! A tree is made of [`BranchNode`]s, which route by event kind through
//! conditional [`Transition`]s, and [`DynamicLeafNode`]s, which run rules
//! loaded from a [`ConfigRepository`](crate::repository::ConfigRepository).
//!
//! ```text
//! root ──skill.on_hit──▶ skill_flow ──skill.on_hit──▶ [skill.damage]
//!   └──player.health_changed──▶ player_flow ──▶ [player.health]
//! ```
//!
//! Each node appends its id to the context's `state_path` before resolving,
//! and every event a node's rules produce carries that node's context.
//! Nodes are shared through `Arc`, so the same target may sit under several
//! branches; children must exist before the branch that points at them.

mod branch;
mod leaf;
mod node;
mod state_tree;

#[cfg(test)]
mod tests;

pub use branch::{BranchNode, Transition};
pub use leaf::DynamicLeafNode;
pub use node::{EventNode, RoutedEvent};
pub use state_tree::EventStateTree;
