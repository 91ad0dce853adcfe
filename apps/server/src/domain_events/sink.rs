use focusgoals_core::events::{DomainEvent, DomainEventSink};

/// Logs every domain event; level-ups at `info`, everything else at `debug`.
#[derive(Clone, Default)]
pub struct TracingDomainEventSink;

impl TracingDomainEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl DomainEventSink for TracingDomainEventSink {
    fn emit(&self, event: DomainEvent) {
        match &event {
            DomainEvent::LevelUp {
                old_level,
                new_level,
                unlocked_badges,
            } => tracing::info!(
                old_level,
                new_level,
                ?unlocked_badges,
                "Level up"
            ),
            _ => tracing::debug!(?event, "Domain event"),
        }
    }
}
