//! Observability: adaptation events, counters, and sink abstractions.

mod metrics;
mod sink;

// re-exports
pub use metrics::{AdaptMetrics, EventReport};
pub use sink::{AdaptEvent, AdaptSink, TracingSink};
