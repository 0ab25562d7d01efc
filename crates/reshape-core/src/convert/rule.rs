//! Module: convert::rule
//! Responsibility: conversion identifiers and the declarative routing table.
//! Does not own: conversion behavior (see `convert::service`).
//! Boundary: consumed by the default conversion service and configuration.

use crate::types::{RawType, WrapperKind};
use serde::{Deserialize, Serialize};

///
/// ConversionId
///
/// Identifier for one registrable conversion rule.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversionId {
    NumberToNumber,
    ScalarToText,
    TextToScalar,
    CollectionToCollection,
    ObjectToCollection,
    ObjectToOptional,
    NullableWrapperToOptional,
    NullableWrapperToFuture,
    NullableWrapperToLazy,
    IterableToStreamable,
}

impl ConversionId {
    pub const ALL: [Self; 10] = [
        Self::NumberToNumber,
        Self::ScalarToText,
        Self::TextToScalar,
        Self::CollectionToCollection,
        Self::ObjectToCollection,
        Self::ObjectToOptional,
        Self::NullableWrapperToOptional,
        Self::NullableWrapperToFuture,
        Self::NullableWrapperToLazy,
        Self::IterableToStreamable,
    ];

    /// Stable configuration name of this rule.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::NumberToNumber => "number_to_number",
            Self::ScalarToText => "scalar_to_text",
            Self::TextToScalar => "text_to_scalar",
            Self::CollectionToCollection => "collection_to_collection",
            Self::ObjectToCollection => "object_to_collection",
            Self::ObjectToOptional => "object_to_optional",
            Self::NullableWrapperToOptional => "nullable_wrapper_to_optional",
            Self::NullableWrapperToFuture => "nullable_wrapper_to_future",
            Self::NullableWrapperToLazy => "nullable_wrapper_to_lazy",
            Self::IterableToStreamable => "iterable_to_streamable",
        }
    }
}

///
/// RuleFamily
///
/// Rule-side matcher over raw types.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum RuleFamily {
    /// Int, Uint, Float64
    Numeric,
    /// Bool and the numeric types
    Primitive,
    Text,
    /// List, Set, Collection
    Collection,
    /// Scalars, records, and maps: anything that is neither a collection,
    /// a wrapper, a reactive type, nor the marker.
    Object,
    /// `Object` plus collections.
    Plain,
    NullableWrapper,
    Wrapper(WrapperKind),
}

impl RuleFamily {
    pub(crate) fn matches(self, raw: &RawType) -> bool {
        match self {
            Self::Numeric => raw.is_numeric(),
            Self::Primitive => raw.is_numeric() || matches!(raw, RawType::Bool),
            Self::Text => matches!(raw, RawType::Text),
            Self::Collection => raw.is_collection(),
            Self::Object => raw.is_scalar() || matches!(raw, RawType::Record(_) | RawType::Map),
            Self::Plain => Self::Object.matches(raw) || raw.is_collection(),
            Self::NullableWrapper => matches!(raw, RawType::NullableWrapper),
            Self::Wrapper(kind) => matches!(raw, RawType::Wrapper(k) if *k == kind),
        }
    }
}

///
/// ConversionRule
///
/// Declarative conversion routing rule between raw type families.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct ConversionRule {
    pub source: RuleFamily,
    pub target: RuleFamily,
    pub id: ConversionId,
}

/// Rules are matched in table order; the first enabled match wins.
pub(crate) const CONVERSION_TABLE: &[ConversionRule] = &[
    ConversionRule {
        source: RuleFamily::Numeric,
        target: RuleFamily::Numeric,
        id: ConversionId::NumberToNumber,
    },
    ConversionRule {
        source: RuleFamily::Primitive,
        target: RuleFamily::Text,
        id: ConversionId::ScalarToText,
    },
    ConversionRule {
        source: RuleFamily::Text,
        target: RuleFamily::Primitive,
        id: ConversionId::TextToScalar,
    },
    ConversionRule {
        source: RuleFamily::Collection,
        target: RuleFamily::Collection,
        id: ConversionId::CollectionToCollection,
    },
    ConversionRule {
        source: RuleFamily::Object,
        target: RuleFamily::Collection,
        id: ConversionId::ObjectToCollection,
    },
    ConversionRule {
        source: RuleFamily::NullableWrapper,
        target: RuleFamily::Wrapper(WrapperKind::Optional),
        id: ConversionId::NullableWrapperToOptional,
    },
    ConversionRule {
        source: RuleFamily::NullableWrapper,
        target: RuleFamily::Wrapper(WrapperKind::Future),
        id: ConversionId::NullableWrapperToFuture,
    },
    ConversionRule {
        source: RuleFamily::NullableWrapper,
        target: RuleFamily::Wrapper(WrapperKind::Lazy),
        id: ConversionId::NullableWrapperToLazy,
    },
    ConversionRule {
        source: RuleFamily::Plain,
        target: RuleFamily::Wrapper(WrapperKind::Optional),
        id: ConversionId::ObjectToOptional,
    },
    ConversionRule {
        source: RuleFamily::Collection,
        target: RuleFamily::Wrapper(WrapperKind::Streamable),
        id: ConversionId::IterableToStreamable,
    },
];

/// Returns the first rule in `enabled` routing `source` to `target`.
#[must_use]
pub(crate) fn find_rule(
    enabled: &[ConversionId],
    source: &RawType,
    target: &RawType,
) -> Option<ConversionId> {
    CONVERSION_TABLE
        .iter()
        .find(|rule| {
            enabled.contains(&rule.id) && rule.source.matches(source) && rule.target.matches(target)
        })
        .map(|rule| rule.id)
}
