use reshape::{
    core::{
        convert::{ConversionError, ConversionRegistry, Convertible, DefaultConversionService},
        error::{ErrorClass, ErrorOrigin},
        types::TypeParseError,
    },
    prelude::*,
};
use std::sync::Arc;

// ---- fixtures ----------------------------------------------------------

fn user(id: i64, name: &str) -> Value {
    Value::record(
        "demo::User",
        vec![("id".into(), Value::Int(id)), ("name".into(), name.into())],
    )
}

fn method(name: &str, return_type: &str) -> QueryMethod {
    QueryMethod::parse(name, return_type).expect("return type should parse")
}

fn run(adapter: &ResultAdapter, result: Value, name: &str, return_type: &str) -> Value {
    adapter
        .post_process_invocation_result(result, &method(name, return_type))
        .expect("adaptation should succeed")
}

///
/// UserNames
///
/// Extends the default conversions with `demo::User -> Text`, reading the
/// `name` field.
///

struct UserNames(DefaultConversionService);

impl UserNames {
    fn is_user_to_text(source: &TypeDescriptor, target: &TypeDescriptor) -> bool {
        *source.raw() == RawType::record("demo::User") && *target.raw() == RawType::Text
    }
}

impl ConversionRegistry for UserNames {
    fn can_convert(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> bool {
        Self::is_user_to_text(source, target) || self.0.can_convert(source, target)
    }

    fn can_bypass_convert(&self, source: &TypeDescriptor, target: &TypeDescriptor) -> bool {
        self.0.can_bypass_convert(source, target)
    }

    fn convert(
        &self,
        input: Convertible,
        target: &TypeDescriptor,
    ) -> Result<Value, ConversionError> {
        match input {
            Convertible::Value(Value::Record(record)) if record.path == "demo::User" => record
                .field("name")
                .cloned()
                .ok_or_else(|| ConversionError::Unsupported {
                    from: record.path.clone(),
                    to: target.to_string(),
                }),
            other => self.0.convert(other, target),
        }
    }
}

// ---- repository-style return types -------------------------------------

#[test]
fn single_entity_lookups() {
    let adapter = ResultAdapter::default();

    assert_eq!(
        run(&adapter, user(1, "ada"), "findById", "Optional<demo::User>"),
        Value::optional(user(1, "ada"))
    );
    assert_eq!(
        run(&adapter, Value::Null, "findById", "Optional<demo::User>"),
        Value::absent()
    );
    assert_eq!(
        run(&adapter, user(1, "ada"), "getById", "demo::User"),
        user(1, "ada")
    );
}

#[test]
fn collection_queries() {
    let adapter = ResultAdapter::default();
    let users = vec![user(1, "ada"), user(2, "grace")];

    assert_eq!(
        run(&adapter, Value::set(users.clone()), "findAll", "List<demo::User>"),
        Value::List(users.clone())
    );
    assert_eq!(
        run(&adapter, Value::List(users.clone()), "streamAll", "Streamable<demo::User>"),
        Value::Streamable(users.clone())
    );
    assert_eq!(
        run(&adapter, user(1, "ada"), "findAll", "Set<demo::User>"),
        Value::Set(vec![user(1, "ada")])
    );
}

#[test]
fn projections_are_converted() {
    let adapter = ResultAdapter::default();

    assert_eq!(
        run(&adapter, Value::Int(3), "count", "Uint"),
        Value::Uint(3)
    );
    assert_eq!(
        run(
            &adapter,
            Value::set(vec![Value::Int(1), Value::Int(2)]),
            "findIdsAsync",
            "Future<List<Text>>"
        ),
        Value::future(Value::List(vec![Value::Text("1".into()), Value::Text("2".into())]))
    );
    assert_eq!(
        run(
            &adapter,
            Value::List(vec![Value::Int(1), Value::Int(2)]),
            "findIds",
            "List<Text>"
        ),
        Value::List(vec![Value::Text("1".into()), Value::Text("2".into())])
    );
}

#[test]
fn null_maps_become_empty() {
    let adapter = ResultAdapter::default();

    assert_eq!(
        run(&adapter, Value::Null, "groupByName", "Map<Text, List<demo::User>>"),
        Value::Map(Vec::new())
    );
    assert_eq!(
        run(&adapter, Value::absent(), "groupLazily", "Lazy<Map<Text, Int>>"),
        Value::lazy(Value::Map(Vec::new()))
    );
}

#[test]
fn reactive_return_types() {
    let adapter = ResultAdapter::default();
    let users = vec![user(1, "ada"), user(2, "grace")];

    assert_eq!(
        run(&adapter, Value::List(users.clone()), "findAll", "Multi<demo::User>"),
        Value::reactive(ReactiveKind::Multi, users)
    );
    assert_eq!(
        run(&adapter, Value::Null, "findById", "Single<demo::User>"),
        Value::Null
    );
}

// ---- configuration -----------------------------------------------------

#[test]
fn toml_config_narrows_registrations() {
    let adapter = ResultAdapter::from_toml_str(
        r#"
        [conversions]
        enabled = ["nullable_wrapper_to_optional", "collection_to_collection"]

        [reactive]
        types = []
        "#,
    )
    .unwrap();
    let list = Value::List(vec![Value::Int(1)]);

    // without a registered reactive kind the list passes through
    assert_eq!(run(&adapter, list.clone(), "findAll", "Multi<Int>"), list);
    // no scalar-to-text rule
    assert_eq!(run(&adapter, Value::Int(1), "name", "Text"), Value::Int(1));
    assert_eq!(
        run(&adapter, Value::Int(1), "findById", "Optional<Int>"),
        Value::optional(Value::Int(1))
    );
}

#[test]
fn invalid_config_is_a_config_error() {
    let err = ResultAdapter::from_toml_str("[wrappers]\ntypes = [\"optional\", \"optional\"]\n")
        .err()
        .unwrap();

    assert_eq!(err.class, ErrorClass::Config);
    assert_eq!(err.origin, ErrorOrigin::Config);

    let err = ResultAdapter::from_toml_str("[conversions]\nenabled = [\"magic\"]\n")
        .err()
        .unwrap();
    assert_eq!(err.class, ErrorClass::Config);
}

// ---- errors ------------------------------------------------------------

#[test]
fn conversion_failures_surface_as_errors() {
    let err = ResultAdapter::default()
        .post_process_invocation_result(Value::Int(-1), &method("count", "Uint"))
        .unwrap_err();

    assert!(err.is_conversion());
    assert_eq!(err.origin, ErrorOrigin::Conversion);
    assert_eq!(err.to_string(), "Int(-1) is out of range for Uint");
}

#[test]
fn reactive_failures_surface_as_errors() {
    let err = ResultAdapter::default()
        .post_process_invocation_result(
            Value::reactive(ReactiveKind::Multi, vec![Value::Int(1), Value::Int(2)]),
            &method("findOne", "Single<Int>"),
        )
        .unwrap_err();

    assert!(err.is_adaptation());
    assert_eq!(err.origin, ErrorOrigin::Reactive);
}

#[test]
fn declared_types_are_validated() {
    let parse_error = QueryMethod::parse("findById", "Optional<demo::User").unwrap_err();
    assert!(matches!(parse_error, TypeParseError::UnexpectedEnd { .. }));

    let err = reshape::Error::from(parse_error);
    assert_eq!(err.class, ErrorClass::Parse);
    assert_eq!(err.origin, ErrorOrigin::Type);
}

// ---- extension ---------------------------------------------------------

#[test]
fn custom_registry_extends_the_defaults() {
    let adapter = ResultAdapter::builder()
        .conversions(Arc::new(UserNames(DefaultConversionService::default())))
        .build();

    assert_eq!(
        run(&adapter, user(1, "ada"), "findNameById", "Optional<Text>"),
        Value::optional(Value::Text("ada".into()))
    );
    assert_eq!(
        run(&adapter, Value::Int(7), "findNameById", "Text"),
        Value::Text("7".into())
    );
}

// ---- observability -----------------------------------------------------

#[test]
fn metrics_report_serializes() {
    let metrics = Arc::new(AdaptMetrics::new());
    let adapter = ResultAdapter::builder()
        .sink(metrics.clone())
        .build();

    run(&adapter, Value::Int(1), "count", "Int");
    run(&adapter, Value::Null, "groupByName", "Map");

    let report = serde_json::to_value(metrics.report()).unwrap();
    assert_eq!(report["adapt_calls"], 2);
    assert_eq!(report["fast_paths"], 1);
    assert_eq!(report["map_defaults"], 1);
    assert_eq!(report["conversions"], 0);
}

#[test]
fn tracing_sink_does_not_change_results() {
    let traced = ResultAdapter::builder().sink(Arc::new(TracingSink)).build();
    let plain = ResultAdapter::default();

    for (result, shape) in [
        (Value::Text("5".into()), "Future<Optional<Int>>"),
        (Value::Null, "Map"),
        (Value::List(vec![Value::Int(1)]), "Multi<Int>"),
    ] {
        assert_eq!(
            run(&traced, result.clone(), "q", shape),
            run(&plain, result, "q", shape)
        );
    }
}

#[test]
fn version_is_exported() {
    assert!(!reshape::VERSION.is_empty());
    assert!(reshape::needs_processing(&Value::Null, &RawType::Int));
}
