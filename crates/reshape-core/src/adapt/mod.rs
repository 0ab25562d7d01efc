//! Module: adapt
//! Responsibility: turn a raw query result into the shape of a declared
//! return type, level by level.
//! Does not own: conversion rules, wrapper/reactive classification, or
//! nesting resolution; those are injected collaborators.
//! Boundary: stateless; every call owns its intermediate values.

mod builder;


use crate::{
    config::AdapterConfig,
    convert::{ConversionRegistry, Convertible, NullableWrapper, requires_conversion},
    error::Error,
    method::QueryMethod,
    obs::{AdaptEvent, AdaptSink},
    registry::{ReactiveWrapperRegistry, WrapperTypeRegistry},
    shape::TypeShapeResolver,
    types::{RawType, TypeDescriptor},
    value::Value,
};
use std::sync::Arc;

// re-exports
pub use builder::ResultAdapterBuilder;

///
/// ResultAdapter
///
/// Adapts query results to declared return types. Collaborators are fixed at
/// construction and only read afterwards, so one adapter can serve
/// concurrent callers.
///

#[derive(Clone)]
pub struct ResultAdapter {
    conversions: Arc<dyn ConversionRegistry>,
    wrappers: Arc<dyn WrapperTypeRegistry>,
    reactive: Arc<dyn ReactiveWrapperRegistry>,
    resolver: Arc<dyn TypeShapeResolver>,
    sink: Option<Arc<dyn AdaptSink>>,
}

impl ResultAdapter {
    #[must_use]
    pub fn builder() -> ResultAdapterBuilder {
        ResultAdapterBuilder::new()
    }

    /// Build an adapter whose default registries are populated from `config`.
    pub fn from_config(config: &AdapterConfig) -> Result<Self, Error> {
        config.validate()?;

        Ok(Self::builder()
            .conversions(Arc::new(config.conversion_service()))
            .wrappers(Arc::new(config.wrapper_types()))
            .reactive(Arc::new(config.reactive_wrappers()))
            .build())
    }

    /// Parse a TOML configuration and build an adapter from it.
    pub fn from_toml_str(input: &str) -> Result<Self, Error> {
        let config = AdapterConfig::from_toml_str(input)?;

        Self::from_config(&config)
    }

    //
    // Entry points
    //

    /// Adapt `result` to `declared`.
    ///
    /// Results that already are non-collection instances of the declared raw
    /// type are returned untouched; everything else goes through
    /// [`adapt_at`](Self::adapt_at) from depth 0.
    pub fn adapt(&self, result: Value, declared: &TypeDescriptor) -> Result<Value, Error> {
        self.record(AdaptEvent::Start { tag: result.tag() });

        if !needs_processing(&result, declared.raw()) {
            self.record(AdaptEvent::FastPath { tag: result.tag() });
            return Ok(result);
        }

        self.adapt_at(result, 0, declared)
    }

    /// Adapt the result of invoking `method` to its declared return type.
    pub fn post_process_invocation_result(
        &self,
        result: Value,
        method: &QueryMethod,
    ) -> Result<Value, Error> {
        self.adapt(result, method.return_type())
    }

    /// Adapt `result` to the level of `declared` found at `depth`.
    ///
    /// Returns `result` unchanged when `declared` has no such level.
    pub fn adapt_at(
        &self,
        result: Value,
        depth: usize,
        declared: &TypeDescriptor,
    ) -> Result<Value, Error> {
        self.record(AdaptEvent::Resolve { depth });

        let Some(descriptor) = self.resolver.resolve(declared, depth) else {
            self.record(AdaptEvent::Terminated { depth });
            return Ok(result);
        };
        let expected = descriptor.raw();
        let target = expected.label();

        let mut result = self.unwrap_optional(result, depth);

        // wrapper types may need to absorb a null, so they go first
        if self.wrappers.is_wrapper_type(expected) {
            result = self.adapt_at(result, depth + 1, declared)?;

            if self.requires_conversion(&TypeDescriptor::nullable_wrapper(), descriptor) {
                let wrapped = NullableWrapper::new(result);
                let converted = self
                    .conversions
                    .convert(Convertible::Wrapped(wrapped), descriptor)?;
                self.record(AdaptEvent::WrapperConverted { depth, target });

                return Ok(converted);
            }

            if let Some(source) = TypeDescriptor::for_value(&result)
                && self.requires_conversion(&source, descriptor)
            {
                let converted = self
                    .conversions
                    .convert(Convertible::Value(result), descriptor)?;
                self.record(AdaptEvent::DirectConverted { depth, target });

                return Ok(converted);
            }
        }

        let Some(source) = TypeDescriptor::for_value(&result) else {
            return Ok(self.null_result(expected, depth));
        };

        if self.reactive.is_reactive_wrapper_type(expected) {
            let adapted = self.reactive.to_wrapper(result, expected)?;
            self.record(AdaptEvent::ReactiveAdapted { depth, target });

            return Ok(adapted);
        }

        if !self.conversions.can_convert(&source, descriptor) {
            self.record(AdaptEvent::Passthrough { depth });
            return Ok(result);
        }

        if self.conversions.can_bypass_convert(&source, descriptor) {
            self.record(AdaptEvent::Bypassed { depth, target });
            return Ok(result);
        }

        let converted = self
            .conversions
            .convert(Convertible::Value(result), descriptor)?;
        self.record(AdaptEvent::Converted { depth, target });

        Ok(converted)
    }

    //
    // Helpers
    //

    fn requires_conversion(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> bool {
        requires_conversion(self.conversions.as_ref(), source, target)
    }

    fn unwrap_optional(&self, result: Value, depth: usize) -> Value {
        if let Value::Optional(inner) = &result {
            self.record(AdaptEvent::Unwrapped {
                depth,
                present: inner.is_some(),
            });
        }

        result.unwrap_optional()
    }

    // Null stays null, except for the plain mapping type.
    fn null_result(&self, expected: &RawType, depth: usize) -> Value {
        if *expected == RawType::Map {
            self.record(AdaptEvent::MapDefaulted { depth });
            Value::Map(Vec::new())
        } else {
            self.record(AdaptEvent::NullResult { depth });
            Value::Null
        }
    }

    fn record(&self, event: AdaptEvent) {
        if let Some(sink) = &self.sink {
            sink.record(event);
        }
    }
}

impl Default for ResultAdapter {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Whether `result` has to go through adaptation for a declared raw type.
///
/// Only non-null, non-collection instances of `declared` may skip it.
#[must_use]
pub fn needs_processing(result: &Value, declared: &RawType) -> bool {
    result.is_null() || result.is_collection() || !declared.is_instance(result)
}
