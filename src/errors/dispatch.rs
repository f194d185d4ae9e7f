// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use thiserror::Error;

use crate::errors::RuleError;

/// Why an `emit` call did not run to completion.
#[derive(Error, Debug)]
pub enum DispatchError {
    #[error(transparent)]
    Rule(#[from] RuleError),

    /// Only raised when a dispatch budget is configured.
    #[error("dispatch budget of {limit} events exceeded after processing {processed}")]
    BudgetExceeded { limit: usize, processed: usize },
}
