// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod dispatch;
mod rule;

pub use config::{ConfigError, ValidationError};
pub use dispatch::DispatchError;
pub use rule::RuleError;
