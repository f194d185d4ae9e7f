// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! A small player/skill simulation exercising the engine end to end.
//!
//! None of this is needed to use the engine; it is what the binary runs and
//! what the rule-set files under `configs/` refer to.

pub mod actions;
pub mod handlers;
pub mod messages;
pub mod tree;

pub use actions::action_catalog;
pub use handlers::{register_default_handlers, GameStats, GameStatsHandler, PlayerHealthLogger};
pub use tree::{build_state_tree, populate_repository};
