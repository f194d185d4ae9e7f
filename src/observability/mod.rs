// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! This module provides centralized message types for all diagnostic and
//! operational logging in the routing engine. Message types follow a
//! struct-based pattern with a `Display` implementation so that log text lives
//! in one place instead of being scattered through the engine as literals.
//!
//! # Architecture
//!
//! Messages are organized by subsystem:
//! * `messages::dispatch` - propagation loop lifecycle and progress
//! * `messages::tree` - tree traversal and leaf rule resolution
//! * `messages::registry` - handler registration
//! * `messages::validation` - rule-set validation warnings and errors
//!
//! # Usage
//!
//! ```rust
//! use event_arbor::observability::messages::tree::LeafRulesResolved;
//!
//! let msg = LeafRulesResolved {
//!     leaf_id: "skill.damage",
//!     rule_count: 1,
//! };
//!
//! tracing::debug!("{}", msg);
//! ```
//!
//! Subscribers are installed by the binary only; library code never
//! initializes one.

pub mod messages;
