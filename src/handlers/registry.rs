// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::collections::HashMap;
use std::sync::Arc;

use crate::errors::RuleError;
use crate::events::{Event, EventContext, EventKind};
use crate::observability::messages::registry::{HandlerRegistered, RegistryCleared};
use crate::observability::messages::StructuredLog;
use crate::traits::EventHandler;

/// Handlers grouped by event kind, in registration order.
///
/// Registration is append-only and does not de-duplicate: the same handler
/// registered twice under one kind runs twice per matching event.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<EventKind, Vec<Arc<dyn EventHandler>>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, kind: EventKind, handler: Arc<dyn EventHandler>) -> &mut Self {
        HandlerRegistered {
            kind: kind.as_str(),
            handler: handler.name(),
            position: self.handlers_for(&kind).len(),
        }
        .log();

        self.handlers.entry(kind).or_default().push(handler);
        self
    }

    /// Handlers registered under the event's kind that also accept it.
    pub fn iter_matching<'a>(&'a self, event: &'a Event) -> impl Iterator<Item = &'a Arc<dyn EventHandler>> + 'a {
        self.handlers_for(event.kind())
            .iter()
            .filter(move |handler| handler.supports(event))
    }

    /// Run every matching handler in order and concatenate their outputs.
    pub fn handle(&self, event: &Event, context: &EventContext) -> Result<Vec<Event>, RuleError> {
        let mut produced = Vec::new();
        for handler in self.iter_matching(event) {
            produced.extend(handler.handle(event, context)?);
        }
        Ok(produced)
    }

    pub fn handlers_for(&self, kind: &EventKind) -> &[Arc<dyn EventHandler>] {
        self.handlers.get(kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Registered kinds, sorted.
    pub fn registered_kinds(&self) -> Vec<&EventKind> {
        let mut kinds: Vec<&EventKind> = self.handlers.keys().collect();
        kinds.sort();
        kinds
    }

    /// Total number of registrations across all kinds.
    pub fn len(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop every registration.
    pub fn clear(&mut self) {
        let removed = self.len();
        self.handlers.clear();
        RegistryCleared { removed }.log();
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handler_count", &self.len())
            .field("kinds", &self.registered_kinds())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::kinds;
    use crate::handlers::FnHandler;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Counts calls; only accepts events whose payload carries `player_id`.
    struct PlayerOnly {
        calls: AtomicUsize,
    }

    impl EventHandler for PlayerOnly {
        fn supports(&self, event: &Event) -> bool {
            event.field("player_id").is_some()
        }

        fn handle(&self, _event: &Event, _context: &EventContext) -> Result<Vec<Event>, RuleError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![])
        }

        fn name(&self) -> &str {
            "player_only"
        }
    }

    fn emitting(name: &'static str, kind: EventKind, emits: EventKind) -> Arc<dyn EventHandler> {
        Arc::new(FnHandler::new(name, kind, move |_, _| Ok(vec![Event::bare(emits.clone())])))
    }

    #[test]
    fn handle_runs_matching_handlers_in_registration_order() {
        let mut registry = HandlerRegistry::new();
        registry
            .register(kinds::SKILL_ON_HIT, emitting("first", kinds::SKILL_ON_HIT, kinds::SYSTEM_TICK))
            .register(kinds::SKILL_ON_HIT, emitting("second", kinds::SKILL_ON_HIT, kinds::SKILL_ON_END))
            .register(kinds::SYSTEM_TICK, emitting("tick", kinds::SYSTEM_TICK, kinds::DEFAULT));

        let produced = registry
            .handle(&Event::bare(kinds::SKILL_ON_HIT), &EventContext::default())
            .unwrap();

        let produced_kinds: Vec<&str> = produced.iter().map(|e| e.kind().as_str()).collect();
        assert_eq!(produced_kinds, vec!["system.tick", "skill.on_end"]);
    }

    #[test]
    fn supports_can_narrow_a_registered_kind() {
        let handler = Arc::new(PlayerOnly {
            calls: AtomicUsize::new(0),
        });
        let mut registry = HandlerRegistry::new();
        registry.register(kinds::PLAYER_HEALTH_CHANGED, handler.clone());

        let anonymous = Event::bare(kinds::PLAYER_HEALTH_CHANGED);
        let known = anonymous.copy_with(None, [("player_id", json!("player-001"))]);

        assert_eq!(registry.iter_matching(&anonymous).count(), 0);
        assert_eq!(registry.iter_matching(&known).count(), 1);

        registry.handle(&anonymous, &EventContext::default()).unwrap();
        registry.handle(&known, &EventContext::default()).unwrap();
        assert_eq!(handler.calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn duplicate_registration_runs_twice() {
        let handler = Arc::new(PlayerOnly {
            calls: AtomicUsize::new(0),
        });
        let mut registry = HandlerRegistry::new();
        registry
            .register(kinds::PLAYER_CREATED, handler.clone())
            .register(kinds::PLAYER_CREATED, handler.clone());

        let event = Event::bare(kinds::PLAYER_CREATED).copy_with(None, [("player_id", json!("p"))]);
        registry.handle(&event, &EventContext::default()).unwrap();

        assert_eq!(handler.calls.load(Ordering::SeqCst), 2);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn unregistered_kind_is_empty_not_an_error() {
        let registry = HandlerRegistry::new();
        let produced = registry
            .handle(&Event::bare(kinds::SYSTEM_TICK), &EventContext::default())
            .unwrap();
        assert!(produced.is_empty());
        assert!(registry.handlers_for(&kinds::SYSTEM_TICK).is_empty());
    }

    #[test]
    fn failing_handler_stops_later_handlers() {
        let later = Arc::new(PlayerOnly {
            calls: AtomicUsize::new(0),
        });
        let mut registry = HandlerRegistry::new();
        registry
            .register(
                kinds::PLAYER_CREATED,
                Arc::new(FnHandler::new("fails", kinds::PLAYER_CREATED, |_, _| {
                    Err(RuleError::evaluation("fails", "bad payload"))
                })),
            )
            .register(kinds::PLAYER_CREATED, later.clone());

        let event = Event::bare(kinds::PLAYER_CREATED).copy_with(None, [("player_id", json!("p"))]);
        assert!(registry.handle(&event, &EventContext::default()).is_err());
        assert_eq!(later.calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn clear_resets_everything() {
        let mut registry = HandlerRegistry::new();
        registry
            .register(kinds::SYSTEM_TICK, emitting("a", kinds::SYSTEM_TICK, kinds::DEFAULT))
            .register(kinds::PLAYER_CREATED, emitting("b", kinds::PLAYER_CREATED, kinds::DEFAULT));
        assert_eq!(registry.registered_kinds(), vec![&kinds::PLAYER_CREATED, &kinds::SYSTEM_TICK]);

        registry.clear();

        assert!(registry.is_empty());
        assert!(registry.registered_kinds().is_empty());
    }
}
