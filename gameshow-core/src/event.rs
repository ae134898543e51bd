use serde::Serialize;

/// An event emitted by one of the ledger contracts.
pub trait ContractEvent: Serialize {
    /// Event name, e.g. `NewGame` or `Transfer`.
    fn name(&self) -> &'static str;
}

/// Append-only list of events, drained by whoever persists or prints them.
#[derive(Debug, Clone)]
pub struct EventLog<E> {
    entries: Vec<E>,
}

impl<E> Default for EventLog<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<E: ContractEvent> EventLog<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: E) {
        tracing::debug!("Emitted event {}", event.name());
        self.entries.push(event);
    }

    pub fn entries(&self) -> &[E] {
        &self.entries
    }

    pub fn take(&mut self) -> Vec<E> {
        std::mem::take(&mut self.entries)
    }
}
