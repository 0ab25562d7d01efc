//! Module: config
//! Responsibility: the explicit registration set an adapter is built from.
//! Does not own: registry behavior; it only enumerates what gets registered.
//! Boundary: parsed once, turned into read-only registries at construction.

use crate::{
    convert::{ConversionId, DefaultConversionService},
    error::{ErrorClass, ErrorOrigin},
    registry::{ReactiveWrappers, WrapperTypes},
    types::{ReactiveKind, WrapperKind},
};
use serde::Deserialize;
use std::fmt::Debug;
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, ThisError)]
pub enum ConfigError {
    #[error("invalid adapter config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("duplicate entry '{entry}' in [{section}]")]
    DuplicateEntry {
        section: &'static str,
        entry: String,
    },
}

impl ConfigError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        ErrorClass::Config
    }

    #[must_use]
    pub const fn origin(&self) -> ErrorOrigin {
        ErrorOrigin::Config
    }
}

///
/// AdapterConfig
///
/// Every section defaults to "all built-in entries" when omitted.
///
/// ```toml
/// [conversions]
/// enabled = ["number_to_number", "nullable_wrapper_to_optional"]
///
/// [wrappers]
/// types = ["optional", "future"]
///
/// [reactive]
/// types = ["single"]
/// ```
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AdapterConfig {
    pub conversions: ConversionsConfig,
    pub wrappers: WrappersConfig,
    pub reactive: ReactiveConfig,
}

impl AdapterConfig {
    /// Parse and validate a TOML configuration document.
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;

        Ok(config)
    }

    /// Reject duplicate entries in any section.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unique("conversions", &self.conversions.enabled, |id| {
            id.name().to_string()
        })?;
        check_unique("wrappers", &self.wrappers.types, |kind| {
            kind.label().to_lowercase()
        })?;
        check_unique("reactive", &self.reactive.types, |kind| {
            kind.label().to_lowercase()
        })?;

        Ok(())
    }

    #[must_use]
    pub fn conversion_service(&self) -> DefaultConversionService {
        DefaultConversionService::new(self.conversions.enabled.iter().copied())
    }

    #[must_use]
    pub fn wrapper_types(&self) -> WrapperTypes {
        WrapperTypes::new(self.wrappers.types.iter().copied())
    }

    #[must_use]
    pub fn reactive_wrappers(&self) -> ReactiveWrappers {
        ReactiveWrappers::new(self.reactive.types.iter().copied())
    }
}

///
/// ConversionsConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ConversionsConfig {
    pub enabled: Vec<ConversionId>,
}

impl Default for ConversionsConfig {
    fn default() -> Self {
        Self {
            enabled: ConversionId::ALL.to_vec(),
        }
    }
}

///
/// WrappersConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct WrappersConfig {
    pub types: Vec<WrapperKind>,
}

impl Default for WrappersConfig {
    fn default() -> Self {
        Self {
            types: WrapperKind::ALL.to_vec(),
        }
    }
}

///
/// ReactiveConfig
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ReactiveConfig {
    pub types: Vec<ReactiveKind>,
}

impl Default for ReactiveConfig {
    fn default() -> Self {
        Self {
            types: ReactiveKind::ALL.to_vec(),
        }
    }
}

fn check_unique<T: PartialEq + Debug>(
    section: &'static str,
    entries: &[T],
    name: impl Fn(&T) -> String,
) -> Result<(), ConfigError> {
    for (index, entry) in entries.iter().enumerate() {
        if entries[..index].contains(entry) {
            return Err(ConfigError::DuplicateEntry {
                section,
                entry: name(entry),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_enables_everything() {
        let config = AdapterConfig::from_toml_str("").unwrap();

        assert_eq!(config, AdapterConfig::default());
        assert_eq!(config.conversions.enabled.len(), ConversionId::ALL.len());
        assert_eq!(config.wrappers.types, WrapperKind::ALL.to_vec());
        assert_eq!(config.reactive.types, ReactiveKind::ALL.to_vec());
    }

    #[test]
    fn sections_narrow_the_registration_set() {
        let config = AdapterConfig::from_toml_str(
            r#"
            [conversions]
            enabled = ["number_to_number", "nullable_wrapper_to_optional"]

            [wrappers]
            types = ["optional"]

            [reactive]
            types = []
            "#,
        )
        .unwrap();

        let service = config.conversion_service();
        assert!(service.is_enabled(ConversionId::NumberToNumber));
        assert!(service.is_enabled(ConversionId::NullableWrapperToOptional));
        assert!(!service.is_enabled(ConversionId::ScalarToText));
        assert_eq!(
            config.wrapper_types().kinds().collect::<Vec<_>>(),
            vec![WrapperKind::Optional]
        );
        assert_eq!(config.reactive_wrappers().kinds().count(), 0);
    }

    #[test]
    fn unknown_entries_are_rejected() {
        let err = AdapterConfig::from_toml_str(
            r#"
            [wrappers]
            types = ["promise"]
            "#,
        )
        .unwrap_err();

        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn unknown_sections_are_rejected() {
        let err = AdapterConfig::from_toml_str("[metrics]\nenabled = true\n").unwrap_err();

        assert!(matches!(err, ConfigError::Toml(_)));
    }

    #[test]
    fn duplicate_entries_are_rejected() {
        let err = AdapterConfig::from_toml_str(
            r#"
            [reactive]
            types = ["single", "multi", "single"]
            "#,
        )
        .unwrap_err();

        match err {
            ConfigError::DuplicateEntry { section, entry } => {
                assert_eq!(section, "reactive");
                assert_eq!(entry, "single");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
