// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Kind-indexed handler registry.
//!
//! There is no global registry: callers own a [`HandlerRegistry`], fill it at
//! startup with explicit `register` calls and hand it to the dispatcher.

mod function;
mod registry;

pub use function::FnHandler;
pub use registry::HandlerRegistry;
