use crate::{
    config::ConfigError, convert::ConversionError, registry::ReactiveError, types::TypeParseError,
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Structured error surfaced by the adaptation engine and its default
/// collaborators. The originating leaf error is kept in `detail` untouched so
/// callers can match on exactly what the collaborator raised.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct Error {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,

    /// Optional structured error detail.
    /// The variant (if present) must correspond to `origin`.
    pub detail: Option<ErrorDetail>,
}

impl Error {
    /// Construct an error without a structured detail payload.
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: None,
        }
    }

    /// Construct an error carrying the originating leaf error.
    pub(crate) fn with_detail(
        class: ErrorClass,
        origin: ErrorOrigin,
        message: impl Into<String>,
        detail: ErrorDetail,
    ) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
            detail: Some(detail),
        }
    }

    #[must_use]
    pub const fn is_conversion(&self) -> bool {
        matches!(self.class, ErrorClass::Conversion)
    }

    #[must_use]
    pub const fn is_adaptation(&self) -> bool {
        matches!(self.class, ErrorClass::Adaptation)
    }

    /// Borrow the conversion error this error was raised from, if any.
    #[must_use]
    pub const fn as_conversion(&self) -> Option<&ConversionError> {
        match &self.detail {
            Some(ErrorDetail::Conversion(err)) => Some(err),
            _ => None,
        }
    }

    /// Borrow the reactive adaptation error this error was raised from, if any.
    #[must_use]
    pub const fn as_reactive(&self) -> Option<&ReactiveError> {
        match &self.detail {
            Some(ErrorDetail::Reactive(err)) => Some(err),
            _ => None,
        }
    }

    #[must_use]
    pub fn display_with_class(&self) -> String {
        format!("{}:{}: {}", self.origin, self.class, self.message)
    }
}

impl From<ConversionError> for Error {
    fn from(err: ConversionError) -> Self {
        Self::with_detail(
            err.class(),
            err.origin(),
            err.to_string(),
            ErrorDetail::Conversion(err),
        )
    }
}

impl From<ReactiveError> for Error {
    fn from(err: ReactiveError) -> Self {
        Self::with_detail(
            err.class(),
            err.origin(),
            err.to_string(),
            ErrorDetail::Reactive(err),
        )
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::with_detail(
            err.class(),
            err.origin(),
            err.to_string(),
            ErrorDetail::Config(err),
        )
    }
}

impl From<TypeParseError> for Error {
    fn from(err: TypeParseError) -> Self {
        Self::with_detail(
            err.class(),
            err.origin(),
            err.to_string(),
            ErrorDetail::Type(err),
        )
    }
}

///
/// ErrorClass
///
/// Coarse classification of what went wrong.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Conversion,
    Adaptation,
    Config,
    Parse,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Conversion => "conversion",
            Self::Adaptation => "adaptation",
            Self::Config => "config",
            Self::Parse => "parse",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///
/// Which collaborator or surface raised the error.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Conversion,
    Reactive,
    Config,
    Type,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Conversion => "conversion",
            Self::Reactive => "reactive",
            Self::Config => "config",
            Self::Type => "type",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorDetail
///
/// Structured, origin-specific error detail carried by [`Error`].
///

#[derive(Debug, ThisError)]
pub enum ErrorDetail {
    #[error("{0}")]
    Conversion(ConversionError),

    #[error("{0}")]
    Reactive(ReactiveError),

    #[error("{0}")]
    Config(ConfigError),

    #[error("{0}")]
    Type(TypeParseError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leaf_errors_keep_their_detail() {
        let err = Error::from(ReactiveError::NullSource { kind: "Single" });

        assert!(err.is_adaptation());
        assert_eq!(err.origin, ErrorOrigin::Reactive);
        assert_eq!(
            err.as_reactive(),
            Some(&ReactiveError::NullSource { kind: "Single" })
        );
        assert_eq!(err.as_conversion(), None);
    }

    #[test]
    fn display_with_class_prefixes_origin_and_class() {
        let err = Error::from(TypeParseError::Empty);

        assert_eq!(err.display_with_class(), "type:parse: type shape is empty");
        assert_eq!(err.to_string(), "type shape is empty");
    }

    #[test]
    fn plain_errors_have_no_detail() {
        let err = Error::new(ErrorClass::Config, ErrorOrigin::Config, "bad");

        assert!(err.detail.is_none());
        assert!(!err.is_conversion());
    }
}
