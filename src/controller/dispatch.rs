use std::collections::HashMap;

use crate::controller::Controller;
use crate::event::{Action, ActionKind};
use crate::host::Host;
use crate::session::request::GenerationRequest;

pub type Handler<H> = fn(&mut Controller<H>, &Action) -> Vec<GenerationRequest>;

/// Maps each action kind to the controller function that handles it.
pub struct DispatchTable<H: Host> {
    handlers: HashMap<ActionKind, Handler<H>>,
}

impl<H: Host> DispatchTable<H> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Register a handler. Returns the one it replaced, if any.
    pub fn register(&mut self, kind: ActionKind, handler: Handler<H>) -> Option<Handler<H>> {
        self.handlers.insert(kind, handler)
    }

    pub fn get(&self, kind: ActionKind) -> Option<Handler<H>> {
        self.handlers.get(&kind).copied()
    }

    pub fn clear(&mut self) {
        self.handlers.clear();
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl<H: Host> Default for DispatchTable<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    fn noop(_: &mut Controller<MemoryHost>, _: &Action) -> Vec<GenerationRequest> {
        Vec::new()
    }

    #[test]
    fn test_register_and_clear() {
        let mut table: DispatchTable<MemoryHost> = DispatchTable::new();
        assert!(table.is_empty());
        assert!(table.register(ActionKind::Retry, noop).is_none());
        assert!(table.register(ActionKind::Retry, noop).is_some());
        assert_eq!(table.len(), 1);
        assert!(table.get(ActionKind::Retry).is_some());
        assert!(table.get(ActionKind::StartChat).is_none());

        table.clear();
        assert!(table.get(ActionKind::Retry).is_none());
    }
}
