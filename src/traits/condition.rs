// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

use crate::errors::RuleError;
use crate::events::{Event, EventContext};

/// Predicate over an event and its context.
///
/// Implementations should be pure; the engine does not check.
pub trait EventCondition: Send + Sync {
    fn evaluate(&self, event: &Event, context: &EventContext) -> Result<bool, RuleError>;
}

type ConditionFn = dyn Fn(&Event, &EventContext) -> Result<bool, RuleError> + Send + Sync;

/// Adapter turning a plain function into an [`EventCondition`].
pub struct FnCondition {
    name: String,
    func: Box<ConditionFn>,
}

impl FnCondition {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Event, &EventContext) -> bool + Send + Sync + 'static,
    {
        Self::fallible(name, move |event, context| Ok(func(event, context)))
    }

    pub fn fallible<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(&Event, &EventContext) -> Result<bool, RuleError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Box::new(func),
        }
    }

    /// Matches every event.
    pub fn always() -> Self {
        Self::new("always", |_, _| true)
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl EventCondition for FnCondition {
    fn evaluate(&self, event: &Event, context: &EventContext) -> Result<bool, RuleError> {
        (self.func)(event, context)
    }
}

impl fmt::Debug for FnCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnCondition").field("name", &self.name).finish()
    }
}
