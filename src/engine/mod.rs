// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod dispatcher;
#[cfg(test)]
mod integration_tests;

pub use dispatcher::{DispatchOptions, EventDispatcher};
