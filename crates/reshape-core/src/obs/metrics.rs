use crate::obs::sink::{AdaptEvent, AdaptSink};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

///
/// AdaptMetrics
/// In-memory counters for adaptation decisions.
///
/// Counters are atomic so one instance can back an adapter shared across
/// threads.
///

#[derive(Debug, Default)]
pub struct AdaptMetrics {
    adapt_calls: AtomicU64,
    fast_paths: AtomicU64,
    resolves: AtomicU64,
    terminations: AtomicU64,
    unwrapped_present: AtomicU64,
    unwrapped_absent: AtomicU64,
    wrapper_conversions: AtomicU64,
    direct_conversions: AtomicU64,
    reactive_adaptations: AtomicU64,
    conversions: AtomicU64,
    bypasses: AtomicU64,
    passthroughs: AtomicU64,
    map_defaults: AtomicU64,
    null_results: AtomicU64,
}

impl AdaptMetrics {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Point-in-time snapshot of every counter.
    #[must_use]
    pub fn report(&self) -> EventReport {
        let load = |counter: &AtomicU64| counter.load(Ordering::Relaxed);

        EventReport {
            adapt_calls: load(&self.adapt_calls),
            fast_paths: load(&self.fast_paths),
            resolves: load(&self.resolves),
            terminations: load(&self.terminations),
            unwrapped_present: load(&self.unwrapped_present),
            unwrapped_absent: load(&self.unwrapped_absent),
            wrapper_conversions: load(&self.wrapper_conversions),
            direct_conversions: load(&self.direct_conversions),
            reactive_adaptations: load(&self.reactive_adaptations),
            conversions: load(&self.conversions),
            bypasses: load(&self.bypasses),
            passthroughs: load(&self.passthroughs),
            map_defaults: load(&self.map_defaults),
            null_results: load(&self.null_results),
        }
    }

    /// Reset all counters (useful in tests).
    pub fn reset(&self) {
        for counter in self.counters() {
            counter.store(0, Ordering::Relaxed);
        }
    }

    const fn counters(&self) -> [&AtomicU64; 14] {
        [
            &self.adapt_calls,
            &self.fast_paths,
            &self.resolves,
            &self.terminations,
            &self.unwrapped_present,
            &self.unwrapped_absent,
            &self.wrapper_conversions,
            &self.direct_conversions,
            &self.reactive_adaptations,
            &self.conversions,
            &self.bypasses,
            &self.passthroughs,
            &self.map_defaults,
            &self.null_results,
        ]
    }
}

impl AdaptSink for AdaptMetrics {
    fn record(&self, event: AdaptEvent) {
        let counter = match event {
            AdaptEvent::Start { .. } => &self.adapt_calls,
            AdaptEvent::FastPath { .. } => &self.fast_paths,
            AdaptEvent::Resolve { .. } => &self.resolves,
            AdaptEvent::Terminated { .. } => &self.terminations,
            AdaptEvent::Unwrapped { present: true, .. } => &self.unwrapped_present,
            AdaptEvent::Unwrapped { present: false, .. } => &self.unwrapped_absent,
            AdaptEvent::WrapperConverted { .. } => &self.wrapper_conversions,
            AdaptEvent::DirectConverted { .. } => &self.direct_conversions,
            AdaptEvent::ReactiveAdapted { .. } => &self.reactive_adaptations,
            AdaptEvent::Converted { .. } => &self.conversions,
            AdaptEvent::Bypassed { .. } => &self.bypasses,
            AdaptEvent::Passthrough { .. } => &self.passthroughs,
            AdaptEvent::MapDefaulted { .. } => &self.map_defaults,
            AdaptEvent::NullResult { .. } => &self.null_results,
        };

        counter.fetch_add(1, Ordering::Relaxed);
    }
}

///
/// EventReport
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct EventReport {
    // Entrypoints
    pub adapt_calls: u64,
    pub fast_paths: u64,

    // Nesting
    pub resolves: u64,
    pub terminations: u64,
    pub unwrapped_present: u64,
    pub unwrapped_absent: u64,

    // Outcomes
    pub wrapper_conversions: u64,
    pub direct_conversions: u64,
    pub reactive_adaptations: u64,
    pub conversions: u64,
    pub bypasses: u64,
    pub passthroughs: u64,
    pub map_defaults: u64,
    pub null_results: u64,
}
