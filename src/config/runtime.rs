// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::{ActionCatalog, RuleSetConfig, TreeBuilder};
use crate::engine::{DispatchOptions, EventDispatcher};
use crate::errors::ConfigError;
use crate::events::EventContext;
use crate::handlers::HandlerRegistry;

/// Runtime builder - assembles a ready-to-use dispatcher from a rule-set.
///
/// # Examples
///
/// ```
/// use event_arbor::config::{parse_ruleset, ActionCatalog, RuntimeBuilder};
/// use event_arbor::events::{kinds, Event};
/// use event_arbor::handlers::HandlerRegistry;
///
/// let cfg = parse_ruleset(r#"
/// root: root
/// attributes: { damage_threshold: 100 }
/// nodes:
///   - { id: root, type: branch }
/// "#).unwrap();
///
/// let (dispatcher, context) =
///     RuntimeBuilder::from_config(&cfg, &ActionCatalog::new(), HandlerRegistry::new()).unwrap();
///
/// assert_eq!(context.attribute_f64("damage_threshold"), Some(100.0));
/// let processed = dispatcher.emit(Event::bare(kinds::SYSTEM_TICK), Some(context)).unwrap();
/// assert_eq!(processed.len(), 1);
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Build the dispatcher and the default context.
    ///
    /// Creates and returns:
    /// - `EventDispatcher`: the built tree plus `registry`, with the
    ///   rule-set's `max_events` budget
    /// - `EventContext`: empty path, the rule-set's `attributes`
    pub fn from_config(
        cfg: &RuleSetConfig,
        catalog: &ActionCatalog,
        registry: HandlerRegistry,
    ) -> Result<(EventDispatcher, EventContext), ConfigError> {
        let (tree, _repository) = TreeBuilder::new(cfg, catalog).build()?;
        let options = DispatchOptions {
            max_events: cfg.max_events,
        };
        let dispatcher = EventDispatcher::with_options(tree, registry, options);
        Ok((dispatcher, EventContext::new(cfg.attributes.clone())))
    }
}
