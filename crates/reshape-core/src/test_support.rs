//! Spy collaborators shared by unit tests.

use crate::{
    convert::{ConversionError, ConversionRegistry, Convertible, DefaultConversionService},
    registry::{ReactiveError, ReactiveWrapperRegistry, ReactiveWrappers},
    shape::{NestedTypeResolver, TypeShapeResolver},
    types::{RawType, TypeDescriptor},
    value::Value,
};
use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

///
/// CallLog
///

#[derive(Debug, Default)]
pub(crate) struct CallLog(Mutex<Vec<String>>);

impl CallLog {
    pub(crate) fn push(&self, entry: impl Into<String>) {
        self.0.lock().expect("call log poisoned").push(entry.into());
    }

    pub(crate) fn entries(&self) -> Vec<String> {
        self.0.lock().expect("call log poisoned").clone()
    }

    pub(crate) fn count_prefix(&self, prefix: &str) -> usize {
        self.entries()
            .iter()
            .filter(|entry| entry.starts_with(prefix))
            .count()
    }
}

///
/// SpyConversions
///
/// Delegates to the default service and logs every call as
/// `op(source->target)`.
///

#[derive(Debug, Default)]
pub(crate) struct SpyConversions {
    inner: DefaultConversionService,
    pub(crate) log: CallLog,
}

impl SpyConversions {
    pub(crate) fn convert_calls(&self) -> usize {
        self.log.count_prefix("convert(")
    }
}

impl ConversionRegistry for SpyConversions {
    fn can_convert(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> bool {
        self.log.push(format!("can_convert({source}->{target})"));
        self.inner.can_convert(source, target)
    }

    fn can_bypass_convert(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> bool {
        self.log
            .push(format!("can_bypass_convert({source}->{target})"));
        self.inner.can_bypass_convert(source, target)
    }

    fn convert(
        &self,
        input: Convertible,
        target: &TypeDescriptor,
    ) -> Result<Value, ConversionError> {
        let source = input
            .source_descriptor()
            .map_or_else(|| "Null".to_string(), |source| source.to_string());
        self.log.push(format!("convert({source}->{target})"));
        self.inner.convert(input, target)
    }
}

///
/// BypassEverything
///
/// Claims every conversion is possible and a no-op; counts `convert` calls.
///

#[derive(Debug, Default)]
pub(crate) struct BypassEverything {
    pub(crate) converts: AtomicUsize,
}

impl ConversionRegistry for BypassEverything {
    fn can_convert(&self, _: &TypeDescriptor, _: &TypeDescriptor) -> bool {
        true
    }

    fn can_bypass_convert(&self, _: &TypeDescriptor, _: &TypeDescriptor) -> bool {
        true
    }

    fn convert(&self, input: Convertible, _: &TypeDescriptor) -> Result<Value, ConversionError> {
        self.converts.fetch_add(1, Ordering::SeqCst);
        match input {
            Convertible::Value(value) => Ok(value),
            Convertible::Wrapped(wrapper) => Ok(wrapper.into_inner().unwrap_or(Value::Null)),
        }
    }
}

///
/// FailingConversions
///
/// Claims every conversion is required, then fails it.
///

#[derive(Debug, Default)]
pub(crate) struct FailingConversions;

impl ConversionRegistry for FailingConversions {
    fn can_convert(&self, _: &TypeDescriptor, _: &TypeDescriptor) -> bool {
        true
    }

    fn can_bypass_convert(&self, _: &TypeDescriptor, _: &TypeDescriptor) -> bool {
        false
    }

    fn convert(&self, _: Convertible, target: &TypeDescriptor) -> Result<Value, ConversionError> {
        Err(ConversionError::OutOfRange {
            value: "test".to_string(),
            to: target.raw().label(),
        })
    }
}

///
/// CountingResolver
///

#[derive(Debug, Default)]
pub(crate) struct CountingResolver {
    pub(crate) calls: AtomicUsize,
    pub(crate) log: CallLog,
}

impl CountingResolver {
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl TypeShapeResolver for CountingResolver {
    fn resolve<'a>(
        &self,
        declared: &'a TypeDescriptor,
        depth: usize,
    ) -> Option<&'a TypeDescriptor> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.log.push(format!("resolve({depth})"));
        NestedTypeResolver.resolve(declared, depth)
    }
}

///
/// SpyReactive
///

#[derive(Debug, Default)]
pub(crate) struct SpyReactive {
    inner: ReactiveWrappers,
    pub(crate) to_wrapper_calls: AtomicUsize,
}

impl SpyReactive {
    pub(crate) fn to_wrapper_calls(&self) -> usize {
        self.to_wrapper_calls.load(Ordering::SeqCst)
    }
}

impl ReactiveWrapperRegistry for SpyReactive {
    fn is_reactive_wrapper_type(&self, raw: &RawType) -> bool {
        self.inner.is_reactive_wrapper_type(raw)
    }

    fn to_wrapper(&self, value: Value, raw: &RawType) -> Result<Value, ReactiveError> {
        self.to_wrapper_calls.fetch_add(1, Ordering::SeqCst);
        self.inner.to_wrapper(value, raw)
    }
}

/// Parse a declared type shape.
pub(crate) fn ty(shape: &str) -> TypeDescriptor {
    shape.parse().expect("test type shape should parse")
}
