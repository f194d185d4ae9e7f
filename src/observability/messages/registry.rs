// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for handler registration.

use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A handler was appended under a kind.
///
/// # Log Level
/// `debug!` - Diagnostic detail
pub struct HandlerRegistered<'a> {
    pub kind: &'a str,
    pub handler: &'a str,
    pub position: usize,
}

impl Display for HandlerRegistered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Registered handler '{}' for '{}' at position {}",
            self.handler, self.kind, self.position
        )
    }
}

impl StructuredLog for HandlerRegistered<'_> {
    fn log(&self) {
        tracing::debug!(
            kind = self.kind,
            handler = self.handler,
            position = self.position,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "handler_registered",
            span_name = name,
            kind = self.kind,
            handler = self.handler,
        )
    }
}

/// The registry was reset.
///
/// # Log Level
/// `info!` - Important operational event
pub struct RegistryCleared {
    pub removed: usize,
}

impl Display for RegistryCleared {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Handler registry cleared ({} handlers removed)", self.removed)
    }
}

impl StructuredLog for RegistryCleared {
    fn log(&self) {
        tracing::info!(removed = self.removed, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!("registry_cleared", span_name = name, removed = self.removed)
    }
}
