use crate::types::{RawType, WrapperKind};
use std::collections::BTreeSet;

///
/// WrapperTypeRegistry
///
/// Classifies raw types whose instances are built through a registered
/// "value or absence" conversion.
///

pub trait WrapperTypeRegistry: Send + Sync {
    fn is_wrapper_type(&self, raw: &RawType) -> bool;
}

///
/// WrapperTypes
///
/// Default registry over the built-in wrapper kinds.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct WrapperTypes {
    kinds: BTreeSet<WrapperKind>,
}

impl WrapperTypes {
    #[must_use]
    pub fn new(kinds: impl IntoIterator<Item = WrapperKind>) -> Self {
        Self {
            kinds: kinds.into_iter().collect(),
        }
    }

    /// Registry classifying every built-in wrapper kind.
    #[must_use]
    pub fn all() -> Self {
        Self::new(WrapperKind::ALL)
    }

    /// Registry that classifies nothing as a wrapper.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            kinds: BTreeSet::new(),
        }
    }

    pub fn kinds(&self) -> impl Iterator<Item = WrapperKind> + '_ {
        self.kinds.iter().copied()
    }
}

impl Default for WrapperTypes {
    fn default() -> Self {
        Self::all()
    }
}

impl WrapperTypeRegistry for WrapperTypes {
    fn is_wrapper_type(&self, raw: &RawType) -> bool {
        match raw {
            RawType::Wrapper(kind) => self.kinds.contains(kind),
            _ => false,
        }
    }
}
