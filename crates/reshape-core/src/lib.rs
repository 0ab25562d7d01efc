//! Core runtime for reshape: the value and type model, collaborator
//! registries, configuration, observability, and the result adapter.
#![warn(unreachable_pub)]

pub mod adapt;
pub mod config;
pub mod convert;
pub mod error;
pub mod method;
pub mod obs;
pub mod registry;
pub mod shape;
pub mod types;
pub mod value;

// test
#[cfg(test)]
pub(crate) mod test_support;

// re-exports
pub use error::Error;

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No errors, registries, sinks, or helpers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        adapt::ResultAdapter,
        method::QueryMethod,
        types::{RawType, ReactiveKind, TypeDescriptor, WrapperKind},
        value::Value,
    };
}
