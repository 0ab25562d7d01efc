//! Adaptation event sink boundary.
//!
//! The engine MUST NOT depend on a concrete sink. All instrumentation flows
//! through `AdaptEvent` and `AdaptSink`; recording never changes results.

use crate::value::ValueTag;

///
/// AdaptEvent
///
/// `depth` is the nesting level the decision was taken at; `target` is the
/// label of the expected raw type at that level.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AdaptEvent {
    Start {
        tag: ValueTag,
    },
    FastPath {
        tag: ValueTag,
    },
    Resolve {
        depth: usize,
    },
    Terminated {
        depth: usize,
    },
    Unwrapped {
        depth: usize,
        present: bool,
    },
    WrapperConverted {
        depth: usize,
        target: &'static str,
    },
    DirectConverted {
        depth: usize,
        target: &'static str,
    },
    ReactiveAdapted {
        depth: usize,
        target: &'static str,
    },
    Converted {
        depth: usize,
        target: &'static str,
    },
    Bypassed {
        depth: usize,
        target: &'static str,
    },
    Passthrough {
        depth: usize,
    },
    MapDefaulted {
        depth: usize,
    },
    NullResult {
        depth: usize,
    },
}

///
/// AdaptSink
///

pub trait AdaptSink: Send + Sync {
    fn record(&self, event: AdaptEvent);
}

///
/// TracingSink
///
/// Forwards adaptation events to `tracing`: entry and terminal decisions at
/// `debug`, per-level bookkeeping at `trace`.
///

#[derive(Clone, Copy, Debug, Default)]
pub struct TracingSink;

impl AdaptSink for TracingSink {
    fn record(&self, event: AdaptEvent) {
        match event {
            AdaptEvent::Start { tag } => {
                tracing::debug!(value = tag.label(), "adapting query result");
            }
            AdaptEvent::FastPath { tag } => {
                tracing::debug!(value = tag.label(), "result already matches declared type");
            }
            AdaptEvent::Resolve { depth } => {
                tracing::trace!(depth, "resolving nested type");
            }
            AdaptEvent::Terminated { depth } => {
                tracing::trace!(depth, "no further nesting");
            }
            AdaptEvent::Unwrapped { depth, present } => {
                tracing::trace!(depth, present, "unwrapped nullable container");
            }
            AdaptEvent::WrapperConverted { depth, target } => {
                tracing::debug!(depth, expected = target, "built wrapper from nullable value");
            }
            AdaptEvent::DirectConverted { depth, target } => {
                tracing::debug!(depth, expected = target, "converted inner value to wrapper");
            }
            AdaptEvent::ReactiveAdapted { depth, target } => {
                tracing::debug!(depth, expected = target, "adapted value to reactive wrapper");
            }
            AdaptEvent::Converted { depth, target } => {
                tracing::debug!(depth, expected = target, "converted value");
            }
            AdaptEvent::Bypassed { depth, target } => {
                tracing::trace!(depth, expected = target, "conversion is a no-op");
            }
            AdaptEvent::Passthrough { depth } => {
                tracing::trace!(depth, "no conversion available, value kept");
            }
            AdaptEvent::MapDefaulted { depth } => {
                tracing::debug!(depth, "null result replaced by empty map");
            }
            AdaptEvent::NullResult { depth } => {
                tracing::trace!(depth, "null result");
            }
        }
    }
}
