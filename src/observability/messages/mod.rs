// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for human-readable output and
//! [`StructuredLog`] for emitting the same event with structured fields.
//!
//! # Organization
//!
//! * `dispatch` - propagation loop lifecycle and per-event progress
//! * `tree` - state tree traversal and leaf rule resolution
//! * `registry` - handler registration
//! * `validation` - rule-set validation warnings and errors
//!
//! # Usage Pattern
//!
//! ```rust
//! use event_arbor::observability::messages::dispatch::EmitStarted;
//! use event_arbor::observability::messages::StructuredLog;
//!
//! let msg = EmitStarted {
//!     kind: "skill.on_hit",
//!     attribute_count: 2,
//! };
//!
//! msg.log();
//! ```

use tracing::Span;

pub mod dispatch;
pub mod registry;
pub mod tree;
pub mod validation;

/// A log message that knows its own level and structured fields.
pub trait StructuredLog {
    /// Emit the message at its level with structured fields.
    fn log(&self);

    /// A span carrying the same fields, for scoping nested work.
    fn span(&self, name: &str) -> Span;
}
