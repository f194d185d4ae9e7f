// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

/// A condition, action or handler failed while an event was being routed.
///
/// None of these are caught inside the engine; the first one aborts `emit`.
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("rule '{rule}' failed: {message}")]
    Evaluation { rule: String, message: String },

    #[error("field '{field}' expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("payload error: {0}")]
    Payload(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RuleError {
    pub fn evaluation(rule: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Evaluation {
            rule: rule.into(),
            message: message.into(),
        }
    }
}
