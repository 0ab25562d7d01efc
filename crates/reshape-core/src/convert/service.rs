use crate::{
    convert::{
        ConversionError, ConversionRegistry, Convertible,
        rule::{ConversionId, find_rule},
    },
    types::{RawType, TypeDescriptor},
    value::Value,
};

///
/// CONSTANTS
///

// Integers beyond this magnitude do not round-trip through f64.
const F64_SAFE_U64: u64 = 1u64 << 53;

// Exclusive upper bounds of the integer ranges, exactly representable in f64.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;
const U64_BOUND: f64 = 18_446_744_073_709_551_616.0;

///
/// DefaultConversionService
///
/// Rule-table conversion registry. The enabled rule set is fixed at
/// construction; assignable conversions are always available, and are
/// no-ops unless a declared element type has to be checked per element.
///

#[derive(Clone, Debug)]
pub struct DefaultConversionService {
    enabled: Vec<ConversionId>,
}

impl DefaultConversionService {
    /// Build a service with exactly the given rules enabled.
    #[must_use]
    pub fn new(enabled: impl IntoIterator<Item = ConversionId>) -> Self {
        let mut ids: Vec<ConversionId> = Vec::new();
        for id in enabled {
            if !ids.contains(&id) {
                ids.push(id);
            }
        }

        Self { enabled: ids }
    }

    /// Build a service with every built-in rule enabled.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ConversionId::ALL)
    }

    #[must_use]
    pub fn is_enabled(&self, id: ConversionId) -> bool {
        self.enabled.contains(&id)
    }

    #[must_use]
    pub fn enabled(&self) -> &[ConversionId] {
        &self.enabled
    }

    fn rule_for(&self, source: &RawType, target: &RawType) -> Option<ConversionId> {
        find_rule(&self.enabled, source, target)
    }

    fn convert_value(
        &self,
        value: Value,
        target: &TypeDescriptor,
    ) -> Result<Value, ConversionError> {
        let Some(source) = TypeDescriptor::for_value(&value) else {
            return Ok(Value::Null);
        };
        if source.is_assignable_to(target) {
            if needs_element_check(&source, target) {
                return self.rebuild_collection(value, target);
            }

            return Ok(value);
        }

        let id = self
            .rule_for(source.raw(), target.raw())
            .ok_or_else(|| ConversionError::unsupported(&source, target))?;

        match id {
            ConversionId::NumberToNumber => convert_number(&value, target),
            ConversionId::ScalarToText => Ok(Value::Text(scalar_to_text(&value, target)?)),
            ConversionId::TextToScalar => match value {
                Value::Text(text) => parse_scalar(text, target),
                other => Err(ConversionError::unsupported(other.tag().label(), target)),
            },
            ConversionId::CollectionToCollection => self.rebuild_collection(value, target),
            ConversionId::ObjectToCollection => {
                let element = self.convert_element(value, target.element_type(), 0)?;

                Ok(build_collection(target.raw(), vec![element], false))
            }
            ConversionId::ObjectToOptional => {
                let inner = self.convert_element(value, target.nested(), 0)?;

                Ok(Value::optional(inner))
            }
            ConversionId::IterableToStreamable => {
                let items = value
                    .into_items()
                    .map_err(|other| ConversionError::unsupported(other.tag().label(), target))?;

                Ok(Value::Streamable(
                    self.convert_elements(items, target.element_type())?,
                ))
            }
            ConversionId::NullableWrapperToOptional
            | ConversionId::NullableWrapperToFuture
            | ConversionId::NullableWrapperToLazy => {
                Err(ConversionError::unsupported(&source, target))
            }
        }
    }

    fn convert_wrapped(
        &self,
        inner: Option<Value>,
        target: &TypeDescriptor,
    ) -> Result<Value, ConversionError> {
        let id = self
            .rule_for(&RawType::NullableWrapper, target.raw())
            .ok_or_else(|| ConversionError::unsupported(RawType::NullableWrapper, target))?;
        let inner = inner.unwrap_or(Value::Null);

        match id {
            ConversionId::NullableWrapperToOptional => Ok(Value::optional(inner)),
            ConversionId::NullableWrapperToFuture => Ok(Value::future(inner)),
            ConversionId::NullableWrapperToLazy => Ok(Value::lazy(inner)),
            _ => Err(ConversionError::unsupported(RawType::NullableWrapper, target)),
        }
    }

    // Rebuild a collection as `target`, converting elements that are not
    // already assignable to the declared element type.
    fn rebuild_collection(
        &self,
        value: Value,
        target: &TypeDescriptor,
    ) -> Result<Value, ConversionError> {
        let source_is_set = matches!(value, Value::Set(_));
        let items = value
            .into_items()
            .map_err(|other| ConversionError::unsupported(other.tag().label(), target))?;
        let items = self.convert_elements(items, target.element_type())?;

        Ok(build_collection(target.raw(), items, source_is_set))
    }

    // Convert one element to the declared element type, if there is one.
    fn convert_element(
        &self,
        value: Value,
        element_type: Option<&TypeDescriptor>,
        index: usize,
    ) -> Result<Value, ConversionError> {
        match element_type {
            Some(element_type) if !value.is_null() => self
                .convert_value(value, element_type)
                .map_err(|err| ConversionError::Element {
                    index,
                    source: Box::new(err),
                }),
            _ => Ok(value),
        }
    }

    fn convert_elements(
        &self,
        items: Vec<Value>,
        element_type: Option<&TypeDescriptor>,
    ) -> Result<Vec<Value>, ConversionError> {
        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| self.convert_element(item, element_type, index))
            .collect()
    }
}

impl Default for DefaultConversionService {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ConversionRegistry for DefaultConversionService {
    fn can_convert(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> bool {
        source.is_assignable_to(target) || self.rule_for(source.raw(), target.raw()).is_some()
    }

    fn can_bypass_convert(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> bool {
        source.is_assignable_to(target) && !needs_element_check(source, target)
    }

    fn convert(
        &self,
        input: Convertible,
        target: &TypeDescriptor,
    ) -> Result<Value, ConversionError> {
        match input {
            Convertible::Value(value) => self.convert_value(value, target),
            Convertible::Wrapped(wrapper) => self.convert_wrapped(wrapper.into_inner(), target),
        }
    }
}

///
/// HELPERS
///

// A collection target declaring an element type cannot be matched by a
// source that declares none; its elements have to be looked at.
fn needs_element_check(source: &TypeDescriptor, target: &TypeDescriptor) -> bool {
    target.raw().is_collection()
        && target.element_type().is_some()
        && source.element_type().is_none()
}

fn build_collection(target: &RawType, items: Vec<Value>, source_is_set: bool) -> Value {
    match target {
        RawType::Set => Value::set(items),
        RawType::Collection if source_is_set => Value::set(items),
        _ => Value::List(items),
    }
}

#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::float_cmp
)]
fn convert_number(value: &Value, target: &TypeDescriptor) -> Result<Value, ConversionError> {
    let converted = match (value, target.raw()) {
        (Value::Int(v), RawType::Uint) => u64::try_from(*v).ok().map(Value::Uint),
        (Value::Uint(v), RawType::Int) => i64::try_from(*v).ok().map(Value::Int),
        (Value::Int(v), RawType::Float64) => {
            (v.unsigned_abs() <= F64_SAFE_U64).then(|| Value::Float64(*v as f64))
        }
        (Value::Uint(v), RawType::Float64) => {
            (*v <= F64_SAFE_U64).then(|| Value::Float64(*v as f64))
        }
        (Value::Float64(v), RawType::Int) => {
            (v.is_finite() && v.fract() == 0.0 && *v >= -I64_BOUND && *v < I64_BOUND)
                .then(|| Value::Int(*v as i64))
        }
        (Value::Float64(v), RawType::Uint) => {
            (v.is_finite() && v.fract() == 0.0 && *v >= 0.0 && *v < U64_BOUND)
                .then(|| Value::Uint(*v as u64))
        }
        _ => return Err(ConversionError::unsupported(value.tag().label(), target)),
    };

    converted.ok_or_else(|| ConversionError::OutOfRange {
        value: format!("{value:?}"),
        to: target.raw().label(),
    })
}

fn scalar_to_text(value: &Value, target: &TypeDescriptor) -> Result<String, ConversionError> {
    match value {
        Value::Bool(v) => Ok(v.to_string()),
        Value::Int(v) => Ok(v.to_string()),
        Value::Uint(v) => Ok(v.to_string()),
        Value::Float64(v) => Ok(v.to_string()),
        other => Err(ConversionError::unsupported(other.tag().label(), target)),
    }
}

fn parse_scalar(text: String, target: &TypeDescriptor) -> Result<Value, ConversionError> {
    let trimmed = text.trim();
    let parsed = match target.raw() {
        RawType::Bool => trimmed.parse::<bool>().ok().map(Value::Bool),
        RawType::Int => trimmed.parse::<i64>().ok().map(Value::Int),
        RawType::Uint => trimmed.parse::<u64>().ok().map(Value::Uint),
        RawType::Float64 => trimmed
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .map(Value::Float64),
        _ => return Err(ConversionError::unsupported(RawType::Text, target)),
    };

    parsed.ok_or_else(|| ConversionError::Parse {
        text,
        to: target.raw().label(),
    })
}
