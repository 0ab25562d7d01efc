use crate::{
    error::{ErrorClass, ErrorOrigin},
    types::{RawType, ReactiveKind},
    value::{ReactiveValue, Value},
};
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// ReactiveError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ReactiveError {
    #[error("'{0}' is not a registered reactive wrapper type")]
    Unsupported(String),

    #[error("a {kind} source cannot be built from a null value")]
    NullSource { kind: &'static str },

    #[error("a {kind} source emits at most one item, found {count}")]
    TooManyItems { kind: &'static str, count: usize },
}

impl ReactiveError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        ErrorClass::Adaptation
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        ErrorOrigin::Reactive
    }
}

///
/// ReactiveWrapperRegistry
///
/// Classifies reactive wrapper types and adapts materialized values into
/// instances of them.
///

pub trait ReactiveWrapperRegistry: Send + Sync {
    fn is_reactive_wrapper_type(&self, raw: &RawType) -> bool;

    /// Adapt `value` into an instance of the reactive type `raw`.
    fn to_wrapper(&self, value: Value, raw: &RawType) -> Result<Value, ReactiveError>;
}

///
/// ReactiveWrappers
///
/// Default registry over the built-in reactive kinds.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ReactiveWrappers {
    kinds: BTreeSet<ReactiveKind>,
}

impl ReactiveWrappers {
    #[must_use]
    pub fn new(kinds: impl IntoIterator<Item = ReactiveKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn all() -> Self {
        Self::new(ReactiveKind::ALL)
    }

    #[must_use]
    pub const fn none() -> Self {
        Self {
            kinds: BTreeSet::new(),
        }
    }

    pub fn kinds(&self) -> impl Iterator<Item = ReactiveKind> + '_ {
        self.kinds.iter().copied()
    }

    fn registered_kind(&self, raw: &RawType) -> Option<ReactiveKind> {
        match raw {
            RawType::Reactive(kind) if self.kinds.contains(kind) => Some(*kind),
            _ => None,
        }
    }
}

impl Default for ReactiveWrappers {
    fn default() -> Self {
        Self::all()
    }
}

impl ReactiveWrapperRegistry for ReactiveWrappers {
    fn is_reactive_wrapper_type(&self, raw: &RawType) -> bool {
        self.registered_kind(raw).is_some()
    }

    fn to_wrapper(&self, value: Value, raw: &RawType) -> Result<Value, ReactiveError> {
        let kind = self
            .registered_kind(raw)
            .ok_or_else(|| ReactiveError::Unsupported(raw.to_string()))?;

        let items = match value {
            Value::Null => {
                return Err(ReactiveError::NullSource { kind: kind.label() });
            }
            Value::Reactive(source) if source.kind == kind => {
                return Ok(Value::Reactive(source));
            }
            Value::Reactive(source) => source.items,
            Value::List(items) | Value::Set(items) | Value::Streamable(items)
                if kind == ReactiveKind::Multi =>
            {
                items
            }
            other => vec![other],
        };

        if kind == ReactiveKind::Single && items.len() > 1 {
            return Err(ReactiveError::TooManyItems {
                kind: kind.label(),
                count: items.len(),
            });
        }

        Ok(Value::Reactive(ReactiveValue { kind, items }))
    }
}
