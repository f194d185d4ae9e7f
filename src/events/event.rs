// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::errors::RuleError;
use crate::events::EventKind;

/// Structurally-typed event payload: a flat record of named JSON values.
pub type Payload = Map<String, Value>;

/// An immutable (kind, payload) pair.
///
/// Events are never modified after construction. [`Event::copy_with`] builds a
/// new event from an existing one. Payloads are usually produced from a typed
/// message with [`Event::from_message`] and read back with [`Event::message`],
/// while declarative conditions address individual fields with [`Event::field`].
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    kind: EventKind,
    payload: Payload,
}

impl Event {
    pub fn new(kind: EventKind, payload: Payload) -> Self {
        Self { kind, payload }
    }

    /// An event with an empty payload.
    pub fn bare(kind: EventKind) -> Self {
        Self::new(kind, Payload::new())
    }

    /// Serialize a typed message into the payload.
    ///
    /// The message must serialize to a map (a struct with named fields).
    pub fn from_message<T: Serialize>(kind: EventKind, message: &T) -> Result<Self, RuleError> {
        match serde_json::to_value(message)? {
            Value::Object(payload) => Ok(Self::new(kind, payload)),
            other => Err(RuleError::TypeMismatch {
                field: "<payload>".to_string(),
                expected: "object",
                found: json_type_name(&other),
            }),
        }
    }

    pub fn kind(&self) -> &EventKind {
        &self.kind
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn field(&self, name: &str) -> Option<&Value> {
        self.payload.get(name)
    }

    /// Deserialize the payload as a typed message.
    pub fn message<T: DeserializeOwned>(&self) -> Result<T, RuleError> {
        Ok(serde_json::from_value(Value::Object(self.payload.clone()))?)
    }

    /// Like [`Event::message`], but `None` when the payload has a different shape.
    pub fn try_message<T: DeserializeOwned>(&self) -> Option<T> {
        self.message().ok()
    }

    /// Build a new event, optionally with a different kind, whose payload is
    /// this event's payload with `updates` merged over it.
    pub fn copy_with<I, K>(&self, kind: Option<EventKind>, updates: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let mut payload = self.payload.clone();
        for (key, value) in updates {
            payload.insert(key.into(), value);
        }
        Self::new(kind.unwrap_or_else(|| self.kind.clone()), payload)
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
