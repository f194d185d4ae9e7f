// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod action;
pub mod condition;
pub mod handler;

pub use action::{EventAction, FnAction};
pub use condition::{EventCondition, FnCondition};
pub use handler::EventHandler;
