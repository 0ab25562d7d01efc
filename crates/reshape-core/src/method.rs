use crate::types::{TypeDescriptor, TypeParseError};

///
/// QueryMethod
///
/// A query call site: its name and the return type it declares.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct QueryMethod {
    name: String,
    return_type: TypeDescriptor,
}

impl QueryMethod {
    #[must_use]
    pub fn new(name: impl Into<String>, return_type: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            return_type,
        }
    }

    /// Build a call site from a textual return type such as
    /// `Future<Optional<demo::User>>`.
    pub fn parse(name: impl Into<String>, return_type: &str) -> Result<Self, TypeParseError> {
        Ok(Self::new(name, return_type.parse()?))
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn return_type(&self) -> &TypeDescriptor {
        &self.return_type
    }
}
