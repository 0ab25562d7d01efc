use crate::value::Value;

///
/// ValueTag
///
/// Stable value-variant tag used by diagnostics and observability events.
///

#[repr(u8)]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ValueTag {
    Blob = 1,
    Bool = 2,
    Float64 = 3,
    Future = 4,
    Int = 5,
    Lazy = 6,
    List = 7,
    Map = 8,
    Null = 9,
    Optional = 10,
    Reactive = 11,
    Record = 12,
    Set = 13,
    Streamable = 14,
    Text = 15,
    Uint = 16,
}

impl ValueTag {
    #[must_use]
    pub const fn to_u8(self) -> u8 {
        self as u8
    }

    /// Stable human-readable value kind label for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Blob => "Blob",
            Self::Bool => "Bool",
            Self::Float64 => "Float64",
            Self::Future => "Future",
            Self::Int => "Int",
            Self::Lazy => "Lazy",
            Self::List => "List",
            Self::Map => "Map",
            Self::Null => "Null",
            Self::Optional => "Optional",
            Self::Reactive => "Reactive",
            Self::Record => "Record",
            Self::Set => "Set",
            Self::Streamable => "Streamable",
            Self::Text => "Text",
            Self::Uint => "Uint",
        }
    }
}

#[must_use]
pub(super) const fn canonical_tag(value: &Value) -> ValueTag {
    match value {
        Value::Blob(_) => ValueTag::Blob,
        Value::Bool(_) => ValueTag::Bool,
        Value::Float64(_) => ValueTag::Float64,
        Value::Future(_) => ValueTag::Future,
        Value::Int(_) => ValueTag::Int,
        Value::Lazy(_) => ValueTag::Lazy,
        Value::List(_) => ValueTag::List,
        Value::Map(_) => ValueTag::Map,
        Value::Null => ValueTag::Null,
        Value::Optional(_) => ValueTag::Optional,
        Value::Reactive(_) => ValueTag::Reactive,
        Value::Record(_) => ValueTag::Record,
        Value::Set(_) => ValueTag::Set,
        Value::Streamable(_) => ValueTag::Streamable,
        Value::Text(_) => ValueTag::Text,
        Value::Uint(_) => ValueTag::Uint,
    }
}
