//! Domain events bridge for the web server.
//!
//! Events emitted by the core services are written to the tracing log.

mod sink;

pub use sink::TracingDomainEventSink;
