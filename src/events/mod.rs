// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Event data model: kinds, immutable events and the propagation context.

mod context;
mod event;
mod kind;

pub use context::{Attributes, EventContext};
pub(crate) use event::json_type_name;
pub use event::{Event, Payload};
pub use kind::{kinds, EventKind};
