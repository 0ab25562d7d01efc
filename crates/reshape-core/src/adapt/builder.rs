use crate::{
    adapt::ResultAdapter,
    convert::{ConversionRegistry, DefaultConversionService},
    obs::AdaptSink,
    registry::{ReactiveWrapperRegistry, ReactiveWrappers, WrapperTypeRegistry, WrapperTypes},
    shape::{NestedTypeResolver, TypeShapeResolver},
};
use std::sync::Arc;

///
/// ResultAdapterBuilder
///
/// Collaborators left unset fall back to the built-in defaults with every
/// rule and kind registered.
///

#[derive(Default)]
pub struct ResultAdapterBuilder {
    conversions: Option<Arc<dyn ConversionRegistry>>,
    wrappers: Option<Arc<dyn WrapperTypeRegistry>>,
    reactive: Option<Arc<dyn ReactiveWrapperRegistry>>,
    resolver: Option<Arc<dyn TypeShapeResolver>>,
    sink: Option<Arc<dyn AdaptSink>>,
}

impl ResultAdapterBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn conversions(mut self, conversions: Arc<dyn ConversionRegistry>) -> Self {
        self.conversions = Some(conversions);
        self
    }

    #[must_use]
    pub fn wrappers(mut self, wrappers: Arc<dyn WrapperTypeRegistry>) -> Self {
        self.wrappers = Some(wrappers);
        self
    }

    #[must_use]
    pub fn reactive(mut self, reactive: Arc<dyn ReactiveWrapperRegistry>) -> Self {
        self.reactive = Some(reactive);
        self
    }

    #[must_use]
    pub fn resolver(mut self, resolver: Arc<dyn TypeShapeResolver>) -> Self {
        self.resolver = Some(resolver);
        self
    }

    #[must_use]
    pub fn sink(mut self, sink: Arc<dyn AdaptSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    #[must_use]
    pub fn build(self) -> ResultAdapter {
        ResultAdapter {
            conversions: self
                .conversions
                .unwrap_or_else(|| Arc::new(DefaultConversionService::with_defaults())),
            wrappers: self
                .wrappers
                .unwrap_or_else(|| Arc::new(WrapperTypes::all())),
            reactive: self
                .reactive
                .unwrap_or_else(|| Arc::new(ReactiveWrappers::all())),
            resolver: self
                .resolver
                .unwrap_or_else(|| Arc::new(NestedTypeResolver)),
            sink: self.sink,
        }
    }
}
