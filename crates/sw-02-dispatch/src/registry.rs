//! Handler Registry
//!
//! Maps each [`ActionKind`] to its handler. Built once at startup and
//! read-only afterwards.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

use crate::domain::ActionKind;
use crate::ports::outbound::ActionHandler;

/// Immutable dispatch table.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<ActionKind, Arc<dyn ActionHandler>>,
}

impl HandlerRegistry {
    /// Start building a registry.
    pub fn builder() -> HandlerRegistryBuilder {
        HandlerRegistryBuilder::default()
    }

    /// Handler for `kind`.
    pub fn get(&self, kind: ActionKind) -> Option<&Arc<dyn ActionHandler>> {
        self.handlers.get(&kind)
    }

    /// Resolve a wire action name to its kind and handler.
    ///
    /// `None` for unknown names and for known kinds without a handler.
    pub fn resolve(&self, name: &str) -> Option<(ActionKind, &Arc<dyn ActionHandler>)> {
        let kind = ActionKind::from_wire(name)?;
        self.get(kind).map(|handler| (kind, handler))
    }

    /// Whether `kind` has a handler.
    pub fn contains(&self, kind: ActionKind) -> bool {
        self.handlers.contains_key(&kind)
    }

    /// Kinds with no registered handler, in declaration order.
    pub fn missing_kinds(&self) -> Vec<ActionKind> {
        ActionKind::ALL
            .iter()
            .copied()
            .filter(|kind| !self.contains(*kind))
            .collect()
    }

    /// Registered kinds, sorted.
    pub fn kinds(&self) -> Vec<ActionKind> {
        let mut kinds: Vec<_> = self.handlers.keys().copied().collect();
        kinds.sort();
        kinds
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl std::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("kinds", &self.kinds())
            .finish()
    }
}

/// Builder for [`HandlerRegistry`].
#[derive(Default)]
pub struct HandlerRegistryBuilder {
    handlers: HashMap<ActionKind, Arc<dyn ActionHandler>>,
}

impl HandlerRegistryBuilder {
    /// Register `handler` for `kind`. A later registration for the same kind
    /// replaces the earlier one.
    pub fn register<H>(self, kind: ActionKind, handler: H) -> Self
    where
        H: ActionHandler + 'static,
    {
        self.register_arc(kind, Arc::new(handler))
    }

    /// Register a shared handler for `kind`.
    pub fn register_arc(mut self, kind: ActionKind, handler: Arc<dyn ActionHandler>) -> Self {
        if self.handlers.insert(kind, handler).is_some() {
            warn!(action = %kind, "Handler registered twice, keeping the latest");
        }
        self
    }

    /// Freeze the table.
    pub fn build(self) -> HandlerRegistry {
        HandlerRegistry {
            handlers: self.handlers,
        }
    }
}
