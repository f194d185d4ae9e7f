// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;        // rule-set files, validation, builders
pub mod demo;          // player/skill simulation
pub mod engine;        // breadth-first dispatcher
pub mod errors;        // error handling
pub mod events;        // event model
pub mod handlers;      // kind-indexed handler registry
pub mod observability;
pub mod repository;    // leaf rule storage
pub mod traits;        // condition, action, handler capabilities
pub mod tree;          // state tree nodes
