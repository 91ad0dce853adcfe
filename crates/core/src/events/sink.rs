//! Where services send their domain events.

use super::DomainEvent;

/// Receives events after a mutation has been committed.
///
/// `emit` runs on the caller's thread and cannot fail, so implementations
/// must not block on I/O.
pub trait DomainEventSink: Send + Sync {
    fn emit(&self, event: DomainEvent);

    /// Emits `events` in order.
    fn emit_batch(&self, events: Vec<DomainEvent>) {
        events.into_iter().for_each(|event| self.emit(event));
    }
}

#[cfg(test)]
pub use recording::MockDomainEventSink;
