//! Module: convert
//! Responsibility: the conversion registry contract and its default rule-table
//! implementation.
//! Does not own: wrapper/reactive classification or nesting resolution.
//! Boundary: the engine only asks `can_convert`, `can_bypass_convert`, and
//! `convert`; rule internals never leak past this module.

mod rule;
mod service;


use crate::{
    error::{ErrorClass, ErrorOrigin},
    types::TypeDescriptor,
    value::Value,
};
use derive_more::Deref;
use thiserror::Error as ThisError;

// re-exports
pub use rule::ConversionId;
pub use service::DefaultConversionService;

///
/// ConversionError
///
/// Raised when a value that was reported convertible cannot actually be
/// converted at call time.
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum ConversionError {
    #[error("no conversion from {from} to {to}")]
    Unsupported { from: String, to: String },

    #[error("{value} is out of range for {to}")]
    OutOfRange { value: String, to: &'static str },

    #[error("cannot parse '{text}' as {to}")]
    Parse { text: String, to: &'static str },

    #[error("element {index}: {source}")]
    Element {
        index: usize,
        #[source]
        source: Box<Self>,
    },
}

impl ConversionError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        ErrorClass::Conversion
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        ErrorOrigin::Conversion
    }

    pub(crate) fn unsupported(from: impl ToString, to: &TypeDescriptor) -> Self {
        Self::Unsupported {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}

///
/// NullableWrapper
///
/// "A value or its absence", handed to the registry so a wrapper type can be
/// built uniformly from present and absent results.
///
/// Derefs to the inner `Option`; there is no `DerefMut`, a wrapper is
/// immutable once built.
///

#[repr(transparent)]
#[derive(Clone, Debug, Deref, PartialEq)]
pub struct NullableWrapper(Option<Value>);

impl NullableWrapper {
    /// Wrap `value`; `Value::Null` becomes absent.
    #[must_use]
    pub fn new(value: Value) -> Self {
        match value {
            Value::Null => Self(None),
            other => Self(Some(other)),
        }
    }

    #[must_use]
    pub const fn is_present(&self) -> bool {
        self.0.is_some()
    }

    #[must_use]
    pub const fn get(&self) -> Option<&Value> {
        self.0.as_ref()
    }

    #[must_use]
    pub fn into_inner(self) -> Option<Value> {
        self.0
    }
}

///
/// Convertible
///
/// Input to [`ConversionRegistry::convert`].
///

#[derive(Clone, Debug, PartialEq)]
pub enum Convertible {
    Value(Value),
    Wrapped(NullableWrapper),
}

impl Convertible {
    /// Descriptor the registry routes on: the runtime type of a plain value,
    /// or the nullable-wrapper marker. `None` for a null plain value.
    #[must_use]
    pub fn source_descriptor(&self) -> Option<TypeDescriptor> {
        match self {
            Self::Value(value) => TypeDescriptor::for_value(value),
            Self::Wrapped(_) => Some(TypeDescriptor::nullable_wrapper()),
        }
    }
}

impl From<Value> for Convertible {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<NullableWrapper> for Convertible {
    fn from(wrapper: NullableWrapper) -> Self {
        Self::Wrapped(wrapper)
    }
}

///
/// ConversionRegistry
///
/// Read-only registry of conversion rules. Implementations must be safe for
/// concurrent reads; the engine never registers rules.
///

pub trait ConversionRegistry: Send + Sync {
    /// Whether `source` can be converted to `target`. No side effects.
    fn can_convert(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> bool;

    /// Whether converting `source` to `target` would be a no-op.
    /// Only meaningful when `can_convert` is true.
    fn can_bypass_convert(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> bool;

    /// Convert `input` to `target`.
    fn convert(&self, input: Convertible, target: &TypeDescriptor)
    -> Result<Value, ConversionError>;
}

/// True when `registry` can convert `source` to `target` and the conversion
/// is not a no-op.
#[must_use]
pub fn requires_conversion(
    registry: &dyn ConversionRegistry,
    source: &TypeDescriptor,
    target: &TypeDescriptor,
) -> bool {
    registry.can_convert(source, target) && !registry.can_bypass_convert(source, target)
}
