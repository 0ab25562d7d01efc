//! ## Crate layout
//! - `core`: value and type model, conversion and wrapper registries,
//!   configuration, observability, and the result adapter.
//!
//! The `prelude` module carries the vocabulary needed to adapt a result:
//! build a [`ResultAdapter`](prelude::ResultAdapter), describe the declared
//! type, and hand it a [`Value`](prelude::Value).

pub use reshape_core as core;

//
// Consts
//

/// Workspace version re-export for downstream tooling/tests.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//
// Re-exports
//

pub use crate::core::{Error, adapt::needs_processing};

///
/// Prelude
///

pub mod prelude {
    pub use crate::core::{
        adapt::{ResultAdapter, ResultAdapterBuilder},
        config::AdapterConfig,
        method::QueryMethod,
        obs::{AdaptMetrics, TracingSink},
        types::{RawType, ReactiveKind, TypeDescriptor, WrapperKind},
        value::Value,
    };
}
