// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod builder;
mod catalog;
pub mod conditions;
mod loader;
mod runtime;
mod validation;

pub mod consts;

pub use builder::TreeBuilder;
pub use catalog::ActionCatalog;
pub use conditions::{CompareOp, CompareSpec, ConditionSpec};
pub use loader::{
    load_and_validate_ruleset, load_ruleset, parse_ruleset, NodeConfig, NodeType, RuleConfig,
    RuleSetConfig, TransitionConfig,
};
pub use runtime::RuntimeBuilder;
pub use validation::validate_ruleset;
