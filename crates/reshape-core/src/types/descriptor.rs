use crate::{
    types::{RawType, ReactiveKind, WrapperKind},
    value::Value,
};
use std::fmt;

///
/// TypeDescriptor
///
/// A raw type plus its generic parameter descriptors, e.g.
/// `Future<Optional<List<Int>>>`. Immutable once built.
///

#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct TypeDescriptor {
    raw: RawType,
    generics: Vec<Self>,
}

impl TypeDescriptor {
    //
    // Construction
    //

    /// Descriptor for a type without generic parameters.
    #[must_use]
    pub const fn of(raw: RawType) -> Self {
        Self {
            raw,
            generics: Vec::new(),
        }
    }

    /// Descriptor for a generic type with the given parameters.
    #[must_use]
    pub fn generic(raw: RawType, generics: impl IntoIterator<Item = Self>) -> Self {
        Self {
            raw,
            generics: generics.into_iter().collect(),
        }
    }

    /// The synthetic "value or absence" marker used for wrapper conversions.
    #[must_use]
    pub const fn nullable_wrapper() -> Self {
        Self::of(RawType::NullableWrapper)
    }

    /// Runtime descriptor of a value: its raw type, no generic information.
    /// Returns `None` for `Value::Null`.
    #[must_use]
    pub fn for_value(value: &Value) -> Option<Self> {
        value.raw_type().map(Self::of)
    }

    #[must_use]
    pub fn record(path: impl Into<String>) -> Self {
        Self::of(RawType::record(path))
    }

    #[must_use]
    pub fn list_of(element: Self) -> Self {
        Self::generic(RawType::List, [element])
    }

    #[must_use]
    pub fn set_of(element: Self) -> Self {
        Self::generic(RawType::Set, [element])
    }

    #[must_use]
    pub fn collection_of(element: Self) -> Self {
        Self::generic(RawType::Collection, [element])
    }

    #[must_use]
    pub fn map_of(key: Self, value: Self) -> Self {
        Self::generic(RawType::Map, [key, value])
    }

    #[must_use]
    pub fn wrapper_of(kind: WrapperKind, inner: Self) -> Self {
        Self::generic(RawType::Wrapper(kind), [inner])
    }

    #[must_use]
    pub fn optional_of(inner: Self) -> Self {
        Self::wrapper_of(WrapperKind::Optional, inner)
    }

    #[must_use]
    pub fn future_of(inner: Self) -> Self {
        Self::wrapper_of(WrapperKind::Future, inner)
    }

    #[must_use]
    pub fn lazy_of(inner: Self) -> Self {
        Self::wrapper_of(WrapperKind::Lazy, inner)
    }

    #[must_use]
    pub fn streamable_of(inner: Self) -> Self {
        Self::wrapper_of(WrapperKind::Streamable, inner)
    }

    #[must_use]
    pub fn reactive_of(kind: ReactiveKind, inner: Self) -> Self {
        Self::generic(RawType::Reactive(kind), [inner])
    }

    //
    // Accessors
    //

    #[must_use]
    pub const fn raw(&self) -> &RawType {
        &self.raw
    }

    #[must_use]
    pub fn generics(&self) -> &[Self] {
        &self.generics
    }

    /// The descriptor one nesting level down: the last generic parameter
    /// (the value type of a map, the only parameter otherwise).
    #[must_use]
    pub fn nested(&self) -> Option<&Self> {
        self.generics.last()
    }

    /// Element type of a collection-like descriptor, if declared.
    #[must_use]
    pub fn element_type(&self) -> Option<&Self> {
        match self.raw {
            RawType::Collection
            | RawType::List
            | RawType::Set
            | RawType::Reactive(_)
            | RawType::Wrapper(WrapperKind::Streamable) => self.generics.first(),
            RawType::Map => self.generics.get(1),
            _ => None,
        }
    }

    /// Key type of a map descriptor, if declared.
    #[must_use]
    pub fn key_type(&self) -> Option<&Self> {
        match self.raw {
            RawType::Map if self.generics.len() == 2 => self.generics.first(),
            _ => None,
        }
    }

    /// Number of generic nesting levels below this descriptor.
    #[must_use]
    pub fn nesting_depth(&self) -> usize {
        let mut depth = 0;
        let mut current = self;
        while let Some(next) = current.nested() {
            depth += 1;
            current = next;
        }

        depth
    }

    //
    // Assignability
    //

    /// Returns true when a value described by `self` can be used where
    /// `target` is expected without conversion.
    ///
    /// Element and key types only participate when both sides declare them.
    #[must_use]
    pub fn is_assignable_to(&self, target: &Self) -> bool {
        if !target.raw.is_assignable_from(&self.raw) {
            return false;
        }

        let elements = match (self.element_type(), target.element_type()) {
            (Some(source), Some(target)) => source.is_assignable_to(target),
            _ => true,
        };
        let keys = match (self.key_type(), target.key_type()) {
            (Some(source), Some(target)) => source.is_assignable_to(target),
            _ => true,
        };

        elements && keys
    }
}

impl From<RawType> for TypeDescriptor {
    fn from(raw: RawType) -> Self {
        Self::of(raw)
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)?;

        if !self.generics.is_empty() {
            write!(f, "<")?;
            for (index, generic) in self.generics.iter().enumerate() {
                if index > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{generic}")?;
            }
            write!(f, ">")?;
        }

        Ok(())
    }
}
