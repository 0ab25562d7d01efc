//! Module: types
//! Responsibility: raw type identities and generic type descriptors.
//! Does not own: classification of wrapper/reactive types (see `registry`).
//! Boundary: consumed by the resolver, the conversion service, and the engine.

mod descriptor;
mod parse;


use crate::value::Value;
use serde::{Deserialize, Serialize};
use std::fmt;

// re-exports
pub use descriptor::TypeDescriptor;
pub use parse::{MAX_NESTING, TypeParseError};

///
/// WrapperKind
///
/// Built-in single-value and iterable wrapper shapes.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapperKind {
    Optional,
    Future,
    Lazy,
    Streamable,
}

impl WrapperKind {
    pub const ALL: [Self; 4] = [Self::Optional, Self::Future, Self::Lazy, Self::Streamable];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Optional => "Optional",
            Self::Future => "Future",
            Self::Lazy => "Lazy",
            Self::Streamable => "Streamable",
        }
    }
}

///
/// ReactiveKind
///
/// Reactive stream shapes: `Single` emits at most one item, `Multi` any number.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReactiveKind {
    Single,
    Multi,
}

impl ReactiveKind {
    pub const ALL: [Self; 2] = [Self::Single, Self::Multi];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::Multi => "Multi",
        }
    }
}

///
/// RawType
///
/// Type identity without generic parameters.
///
/// `Any` and `Collection` are abstractions: they accept values of several
/// concrete types. `Map` is the generic mapping abstraction. `NullableWrapper`
/// is a marker used only for conversion lookups; no runtime value is ever an
/// instance of it.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum RawType {
    Any,
    Blob,
    Bool,
    Collection,
    Float64,
    Int,
    List,
    Map,
    NullableWrapper,
    Reactive(ReactiveKind),
    Record(String),
    Set,
    Text,
    Uint,
    Wrapper(WrapperKind),
}

impl RawType {
    /// Build a record type for the given entity path.
    #[must_use]
    pub fn record(path: impl Into<String>) -> Self {
        Self::Record(path.into())
    }

    /// Stable human-readable label for diagnostics.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Any => "Any",
            Self::Blob => "Blob",
            Self::Bool => "Bool",
            Self::Collection => "Collection",
            Self::Float64 => "Float64",
            Self::Int => "Int",
            Self::List => "List",
            Self::Map => "Map",
            Self::NullableWrapper => "NullableWrapper",
            Self::Reactive(kind) => kind.label(),
            Self::Record(_) => "Record",
            Self::Set => "Set",
            Self::Text => "Text",
            Self::Uint => "Uint",
            Self::Wrapper(kind) => kind.label(),
        }
    }

    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Int | Self::Uint | Self::Float64)
    }

    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Blob | Self::Bool | Self::Float64 | Self::Int | Self::Text | Self::Uint
        )
    }

    /// Returns true for concrete and abstract collection types.
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::Collection | Self::List | Self::Set)
    }

    /// Returns true when a value of type `other` can be used where `self`
    /// is expected without any conversion.
    #[must_use]
    pub fn is_assignable_from(&self, other: &Self) -> bool {
        match self {
            Self::Any => true,
            Self::Collection => other.is_collection(),
            _ => self == other,
        }
    }

    /// Returns true when `value` is a non-null instance of this type.
    #[must_use]
    pub fn is_instance(&self, value: &Value) -> bool {
        value
            .raw_type()
            .is_some_and(|runtime| self.is_assignable_from(&runtime))
    }

    /// Resolve a type name to a built-in raw type. Unknown names are
    /// treated as record paths by the descriptor parser, not here.
    #[must_use]
    pub(crate) fn builtin(name: &str) -> Option<Self> {
        let raw = match name {
            "Any" => Self::Any,
            "Blob" => Self::Blob,
            "Bool" => Self::Bool,
            "Collection" => Self::Collection,
            "Float64" => Self::Float64,
            "Int" => Self::Int,
            "List" => Self::List,
            "Map" => Self::Map,
            "NullableWrapper" => Self::NullableWrapper,
            "Set" => Self::Set,
            "Text" => Self::Text,
            "Uint" => Self::Uint,
            "Optional" => Self::Wrapper(WrapperKind::Optional),
            "Future" => Self::Wrapper(WrapperKind::Future),
            "Lazy" => Self::Wrapper(WrapperKind::Lazy),
            "Streamable" => Self::Wrapper(WrapperKind::Streamable),
            "Single" => Self::Reactive(ReactiveKind::Single),
            "Multi" => Self::Reactive(ReactiveKind::Multi),
            _ => return None,
        };

        Some(raw)
    }

    /// Maximum number of generic parameters this type accepts.
    #[must_use]
    pub(crate) const fn max_generics(&self) -> usize {
        match self {
            Self::Map => 2,
            Self::Collection
            | Self::List
            | Self::Set
            | Self::Reactive(_)
            | Self::Wrapper(_)
            | Self::Record(_) => 1,
            _ => 0,
        }
    }
}

impl fmt::Display for RawType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Record(path) => write!(f, "{path}"),
            other => write!(f, "{}", other.label()),
        }
    }
}
