// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;
use std::sync::Arc;

use crate::events::EventKind;
use crate::traits::{EventAction, EventCondition};

/// One dynamic rule bound to a leaf: when an event of `trigger` kind satisfies
/// `condition`, run `actions` in order.
#[derive(Clone)]
pub struct LeafConfiguration {
    trigger: EventKind,
    condition: Arc<dyn EventCondition>,
    actions: Vec<Arc<dyn EventAction>>,
}

impl LeafConfiguration {
    pub fn new(
        trigger: EventKind,
        condition: Arc<dyn EventCondition>,
        actions: Vec<Arc<dyn EventAction>>,
    ) -> Self {
        Self {
            trigger,
            condition,
            actions,
        }
    }

    pub fn trigger(&self) -> &EventKind {
        &self.trigger
    }

    pub fn condition(&self) -> &dyn EventCondition {
        self.condition.as_ref()
    }

    pub fn actions(&self) -> &[Arc<dyn EventAction>] {
        &self.actions
    }
}

impl fmt::Debug for LeafConfiguration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LeafConfiguration")
            .field("trigger", &self.trigger)
            .field("action_count", &self.actions.len())
            .finish()
    }
}
