//! Module: value
//! Responsibility: the dynamic runtime values queries produce and adapters return.
//! Does not own: type descriptors or conversion rules (see `types`, `convert`).
//! Boundary: the currency passed between the engine and its registries.

mod tag;


use crate::types::{RawType, ReactiveKind, WrapperKind};
use serde::Serialize;

// re-exports
pub use tag::ValueTag;

///
/// Value
///
/// Dynamic value produced by query execution and consumed by the adapter.
///
/// Null        → no result (SQL NULL / absent row).
/// Optional    → nullable container; unwrapped once per nesting level.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub enum Value {
    Blob(Vec<u8>),
    Bool(bool),
    Float64(f64),
    /// Completed future holding a value or `Null`.
    Future(Box<Self>),
    Int(i64),
    /// Deferred holder; the value is already materialized.
    Lazy(Box<Self>),
    /// Ordered list of values.
    List(Vec<Self>),
    /// Ordered key/value entries.
    Map(Vec<(Self, Self)>),
    Null,
    /// Nullable container: `Some` is present, `None` is absent.
    Optional(Option<Box<Self>>),
    Reactive(ReactiveValue),
    Record(Record),
    /// Duplicate-free list; insertion order is kept.
    Set(Vec<Self>),
    Streamable(Vec<Self>),
    Text(String),
    Uint(u64),
}

impl Value {
    ///
    /// CONSTRUCTION
    ///

    /// Build a `Value::List` from owned items.
    pub fn from_list<T>(items: Vec<T>) -> Self
    where
        T: Into<Self>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Build a `Value::Set`, dropping later duplicates.
    #[must_use]
    pub fn set(items: Vec<Self>) -> Self {
        let mut unique: Vec<Self> = Vec::with_capacity(items.len());
        for item in items {
            if !unique.contains(&item) {
                unique.push(item);
            }
        }

        Self::Set(unique)
    }

    /// Nullable container holding `value`; `Null` becomes absent.
    #[must_use]
    pub fn optional(value: Self) -> Self {
        match value {
            Self::Null => Self::Optional(None),
            other => Self::Optional(Some(Box::new(other))),
        }
    }

    /// Empty nullable container.
    #[must_use]
    pub const fn absent() -> Self {
        Self::Optional(None)
    }

    #[must_use]
    pub fn future(value: Self) -> Self {
        Self::Future(Box::new(value))
    }

    #[must_use]
    pub fn lazy(value: Self) -> Self {
        Self::Lazy(Box::new(value))
    }

    #[must_use]
    pub const fn reactive(kind: ReactiveKind, items: Vec<Self>) -> Self {
        Self::Reactive(ReactiveValue { kind, items })
    }

    #[must_use]
    pub fn record(path: impl Into<String>, fields: Vec<(String, Self)>) -> Self {
        Self::Record(Record::new(path, fields))
    }

    ///
    /// TYPES
    ///

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns true for `List` and `Set` instances.
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::List(_) | Self::Set(_))
    }

    #[must_use]
    pub const fn tag(&self) -> ValueTag {
        tag::canonical_tag(self)
    }

    /// Runtime raw type of this value. `Null` has none.
    #[must_use]
    pub fn raw_type(&self) -> Option<RawType> {
        let raw = match self {
            Self::Blob(_) => RawType::Blob,
            Self::Bool(_) => RawType::Bool,
            Self::Float64(_) => RawType::Float64,
            Self::Future(_) => RawType::Wrapper(WrapperKind::Future),
            Self::Int(_) => RawType::Int,
            Self::Lazy(_) => RawType::Wrapper(WrapperKind::Lazy),
            Self::List(_) => RawType::List,
            Self::Map(_) => RawType::Map,
            Self::Null => return None,
            Self::Optional(_) => RawType::Wrapper(WrapperKind::Optional),
            Self::Reactive(reactive) => RawType::Reactive(reactive.kind),
            Self::Record(record) => RawType::Record(record.path.clone()),
            Self::Set(_) => RawType::Set,
            Self::Streamable(_) => RawType::Wrapper(WrapperKind::Streamable),
            Self::Text(_) => RawType::Text,
            Self::Uint(_) => RawType::Uint,
        };

        Some(raw)
    }

    ///
    /// ACCESS
    ///

    /// Borrow the items of an iterable value (`List`, `Set`, `Streamable`).
    #[must_use]
    pub fn as_items(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) | Self::Set(items) | Self::Streamable(items) => Some(items),
            _ => None,
        }
    }

    /// Take the items of an iterable value, or give the value back.
    pub fn into_items(self) -> Result<Vec<Self>, Self> {
        match self {
            Self::List(items) | Self::Set(items) | Self::Streamable(items) => Ok(items),
            other => Err(other),
        }
    }

    /// Replace a nullable container with its content (present) or `Null`
    /// (absent). Any other value is returned as-is.
    #[must_use]
    pub fn unwrap_optional(self) -> Self {
        match self {
            Self::Optional(Some(inner)) => *inner,
            Self::Optional(None) => Self::Null,
            other => other,
        }
    }
}

macro_rules! impl_from_for {
    ( $( $type:ty => $variant:ident ),* $(,)? ) => {
        $(
            impl From<$type> for Value {
                fn from(v: $type) -> Self {
                    Self::$variant(v.into())
                }
            }
        )*
    };
}

impl_from_for! {
    bool    => Bool,
    f32     => Float64,
    f64     => Float64,
    i8      => Int,
    i16     => Int,
    i32     => Int,
    i64     => Int,
    &str    => Text,
    String  => Text,
    u8      => Uint,
    u16     => Uint,
    u32     => Uint,
    u64     => Uint,
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        Self::Record(record)
    }
}

impl From<ReactiveValue> for Value {
    fn from(reactive: ReactiveValue) -> Self {
        Self::Reactive(reactive)
    }
}

impl From<Vec<Self>> for Value {
    fn from(vec: Vec<Self>) -> Self {
        Self::List(vec)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

///
/// ReactiveValue
///
/// Materialized reactive source: its declared kind and the items it emits.
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReactiveValue {
    pub kind: ReactiveKind,
    pub items: Vec<Value>,
}

///
/// Record
/// entity-shaped value identified by its path
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Record {
    pub path: String,
    pub fields: Vec<(String, Value)>,
}

impl Record {
    #[must_use]
    pub fn new(path: impl Into<String>, fields: Vec<(String, Value)>) -> Self {
        Self {
            path: path.into(),
            fields,
        }
    }

    /// Look up a field value by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find_map(|(field, value)| (field == name).then_some(value))
    }
}
