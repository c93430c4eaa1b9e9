use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use dto_framework::mock::MockResolver;
use dto_framework::{
    accessors, data, impl_object, Container, Dto, DtoError, Populatable, Resolver, Schema,
    SchemaBuilder, TypeKey, Value,
};
use serde_json::json;

// --- Test DTOs ---

#[derive(Debug, Clone, Default)]
struct Dummy {
    name: Option<String>,
    age: Option<i64>,
    revision: Option<i64>,
    resolver: Option<Arc<dyn Resolver>>,
}

impl Dto for Dummy {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: LazyLock<Schema<Dummy>> = LazyLock::new(|| {
            SchemaBuilder::<Dummy>::new()
                .field("name", |d| &d.name, |d| &mut d.name)
                .read_only("revision", |d| &d.revision)
                .field("age", |d| &d.age, |d| &mut d.age)
                .build()
        });
        &SCHEMA
    }

    fn resolver(&self) -> Option<&Arc<dyn Resolver>> {
        self.resolver.as_ref()
    }

    fn set_resolver(&mut self, resolver: Option<Arc<dyn Resolver>>) {
        self.resolver = resolver;
    }
}

impl_object!(dto Dummy);
accessors!(Dummy { name: String, age: i64 });

/// Serializes to JSON only when empty: map keys must be strings.
#[derive(Debug, Clone, Default, serde::Serialize)]
struct Tags {
    by_position: HashMap<(u8, u8), String>,
}

impl_object!(Tags);

#[derive(Debug, Clone, Default)]
struct Owner {
    label: Option<String>,
    pet: Option<Box<Dummy>>,
    tags: Option<Box<Tags>>,
    resolver: Option<Arc<dyn Resolver>>,
}

impl Dto for Owner {
    fn schema() -> &'static Schema<Self> {
        static SCHEMA: LazyLock<Schema<Owner>> = LazyLock::new(|| {
            SchemaBuilder::<Owner>::new()
                .field("label", |o| &o.label, |o| &mut o.label)
                .dto("pet", |o| &o.pet, |o| &mut o.pet)
                .object("tags", |o| &o.tags, |o| &mut o.tags)
                .build()
        });
        &SCHEMA
    }

    fn resolver(&self) -> Option<&Arc<dyn Resolver>> {
        self.resolver.as_ref()
    }

    fn set_resolver(&mut self, resolver: Option<Arc<dyn Resolver>>) {
        self.resolver = resolver;
    }
}

impl_object!(dto Owner);
accessors!(Owner { label: String } objects { pet: Dummy });

fn ann() -> Dummy {
    Dummy::with_data(data!({"name": "Ann", "age": 5}), None).unwrap()
}

// --- Primitive population and indexed access ---

#[test]
fn test_populatable_fields_are_declaration_ordered() {
    assert_eq!(Dummy::populatable_fields(), ["name", "age"]);
    assert_eq!(Dummy::populatable_fields(), Dummy::populatable_fields());
}

#[test]
fn test_repopulation_is_idempotent() {
    let mut dummy = ann();
    let before = dummy.to_exportable().unwrap();

    dummy.populate(data!({"name": "Ann", "age": 5})).unwrap();

    assert_eq!(dummy.to_exportable().unwrap(), before);
    assert_eq!(dummy.name().map(String::as_str), Some("Ann"));
    assert_eq!(dummy.age(), Some(&5));
}

#[test]
fn test_export_round_trip() {
    let dummy = ann();
    let exported = dummy.to_exportable().unwrap();
    assert_eq!(serde_json::Value::Object(exported.clone()), json!({"name": "Ann", "age": 5}));

    let decoded: serde_json::Value = serde_json::from_str(&dummy.to_json().unwrap()).unwrap();
    assert_eq!(decoded, serde_json::Value::Object(exported));
    assert_eq!(serde_json::to_string(&dummy).unwrap(), dummy.to_json().unwrap());
    assert_eq!(dummy.to_string(), r#"{"name":"Ann","age":5}"#);
}

#[test]
fn test_unset_fields_are_not_exported() {
    let mut dummy = ann();
    dummy.unset("age").unwrap();

    assert!(!dummy.has("age"));
    assert_eq!(dummy.get("age").unwrap(), Value::Null);
    assert_eq!(dummy.to_json().unwrap(), r#"{"name":"Ann"}"#);

    dummy.set("age", 6).unwrap();
    assert_eq!(dummy.to_json().unwrap(), r#"{"name":"Ann","age":6}"#);
}

#[test]
fn test_absent_keys_leave_fields_untouched() {
    let mut dummy = Dummy::default();
    dummy.populate(data!({"name": "Bob"})).unwrap();
    assert!(!dummy.has("age"));

    dummy.populate(data!({})).unwrap();
    assert_eq!(dummy.to_json().unwrap(), r#"{"name":"Bob"}"#);
}

#[test]
fn test_null_unsets_a_field() {
    let mut dummy = ann();
    dummy.populate(data!({"age": null})).unwrap();
    assert_eq!(dummy.age(), None);
    assert!(dummy.has("name"));
}

#[test]
fn test_undefined_field_access() {
    let mut dummy = ann();

    assert!(matches!(
        dummy.get("height"),
        Err(DtoError::UndefinedField { dto: "Dummy", .. })
    ));
    assert!(matches!(
        dummy.set("height", 180),
        Err(DtoError::UndefinedField { .. })
    ));
    assert!(matches!(dummy.unset("height"), Err(DtoError::UndefinedField { .. })));
    assert!(!dummy.has("height"));

    // Read-only fields are declared but not populatable.
    let err = Dummy::with_data(data!({"revision": 2}), None).unwrap_err();
    assert_eq!(err.to_string(), "Undefined field \"revision\" on Dummy");
}

#[test]
fn test_population_is_not_transactional() {
    let mut dummy = Dummy::default();
    let err = dummy
        .populate(data!({"name": "Cy", "age": "old", "unused": 1}))
        .unwrap_err();

    assert!(matches!(
        err,
        DtoError::InvalidValue { expected: "int", found: "string", .. }
    ));
    assert_eq!(dummy.name().map(String::as_str), Some("Cy"));
    assert_eq!(dummy.age(), None);
}

#[test]
fn test_from_json() {
    let dummy = Dummy::from_json(r#"{"age": 9, "name": "Di"}"#, None).unwrap();
    assert_eq!(dummy.get("name").unwrap(), Value::from("Di"));
    // Export follows declaration order, not input order.
    assert_eq!(dummy.to_json().unwrap(), r#"{"name":"Di","age":9}"#);

    assert!(matches!(Dummy::from_json("[1, 2]", None), Err(DtoError::Json(_))));
}

#[test]
fn test_typed_accessors_share_storage() {
    let mut dummy = Dummy::default();
    dummy.set_name("Eve").set_age(30);
    assert_eq!(dummy.get("age").unwrap(), Value::Int(30));

    dummy.unset_name();
    assert!(!dummy.has("name"));
    assert_eq!(
        dummy.to_json_pretty().unwrap(),
        serde_json::to_string_pretty(&json!({"age": 30})).unwrap()
    );
}

#[test]
fn test_descriptors() {
    let descriptor = Owner::schema().descriptor("pet").unwrap();
    assert_eq!(descriptor.reader_name.as_deref(), Some("pet"));
    assert_eq!(descriptor.writer_name.as_deref(), Some("set_pet"));
    assert_eq!(descriptor.expected, Some(TypeKey::of::<Dummy>()));
    assert_eq!(Owner::schema().descriptor("label").unwrap().expected, None);
}

// --- Nested population ---

#[test]
fn test_nested_dto_is_resolved_then_populated() {
    let mock = MockResolver::new();
    mock.expect_make::<Dummy>().return_blank();

    let owner = Owner::with_data(
        data!({"label": "home", "pet": {"name": "Rex", "age": 3}}),
        Some(mock.resolver()),
    )
    .unwrap();

    let pet = owner.pet().unwrap();
    assert_eq!(pet.name().map(String::as_str), Some("Rex"));
    // The nested DTO inherits the resolver handle.
    assert!(pet.resolver().is_some());
    assert_eq!(mock.calls(), [TypeKey::of::<Dummy>()]);
    assert_eq!(
        owner.to_json().unwrap(),
        r#"{"label":"home","pet":{"name":"Rex","age":3}}"#
    );
    mock.verify();
}

#[test]
fn test_nested_instance_is_kept_without_resolver() {
    let pet = ann();
    let owner = Owner::with_data(data!({"pet": null}), None).unwrap();
    assert!(owner.pet().is_none());

    let mut owner = owner;
    owner.set("pet", Value::object(pet.clone())).unwrap();
    assert_eq!(owner.pet().unwrap().to_json().unwrap(), pet.to_json().unwrap());
    assert_eq!(owner.get("pet").unwrap(), Value::object(pet));
}

#[test]
fn test_nested_mapping_without_resolver_fails() {
    let err = Owner::with_data(data!({"pet": {"name": "Rex"}}), None).unwrap_err();
    assert_eq!(
        err.to_string(),
        "No dependency resolver is available, cannot resolve field \"pet\" of the type \"Dummy\"; do not know how to populate with {\"name\":\"Rex\"}"
    );
}

#[test]
fn test_nested_errors_propagate() {
    let container = Container::new();
    let err = Owner::with_data(
        data!({"pet": {"name": "Rex", "colour": "brown"}}),
        Some(container.into_resolver()),
    )
    .unwrap_err();
    assert!(matches!(err, DtoError::UndefinedField { dto: "Dummy", field } if field == "colour"));
}

#[test]
fn test_wrong_object_type_is_rejected() {
    let mut owner = Owner::default();
    let other = Owner::default();
    let err = owner.set("pet", Value::object(other)).unwrap_err();
    assert!(matches!(err, DtoError::NoResolverAvailable { .. }));
}

/// With a resolver, a foreign instance is treated as raw data: a blank
/// `Dummy` is made and cannot be populated from it.
#[test]
fn test_wrong_object_type_is_rejected_with_resolver() {
    let mock = MockResolver::new();
    mock.expect_make::<Dummy>().return_blank();
    let mut owner = Owner::default();
    owner.set_resolver(Some(mock.resolver()));

    let err = owner.set("pet", Value::object(Owner::default())).unwrap_err();

    match err {
        DtoError::UnpopulatableTarget { field, expected, value } => {
            assert_eq!(field, "pet");
            assert_eq!(expected, "Dummy");
            assert_eq!(value, "{}");
        }
        other => panic!("unexpected error: {other}"),
    }
    assert!(owner.pet().is_none());
    assert_eq!(mock.calls(), [TypeKey::of::<Dummy>()]);
    mock.verify();
}

#[test]
fn test_display_falls_back_when_export_fails() {
    let mut tags = Tags::default();
    tags.by_position.insert((1, 2), "corner".to_string());
    let mut owner = Owner::default();
    owner.set("label", "Kim").unwrap();
    owner.set("tags", Value::object(tags)).unwrap();

    assert!(matches!(owner.to_json(), Err(DtoError::Json(_))));
    let shown = owner.to_string();
    assert!(shown.starts_with("Owner {"), "{shown}");
    assert!(shown.contains("corner"));
}

// --- Concurrency ---

#[tokio::test]
async fn test_concurrent_population_with_shared_container() {
    let resolver = Container::new().into_resolver();

    let mut handles = Vec::new();
    for i in 0..16i64 {
        let resolver = Arc::clone(&resolver);
        handles.push(tokio::task::spawn_blocking(move || {
            Owner::with_data(
                data!({"label": format!("owner-{i}"), "pet": {"name": "Rex", "age": i}}),
                Some(resolver),
            )
        }));
    }

    for (i, handle) in handles.into_iter().enumerate() {
        let owner = handle.await.unwrap().unwrap();
        assert_eq!(owner.label(), Some(&format!("owner-{i}")));
        assert_eq!(owner.pet().and_then(Dummy::age), Some(&(i as i64)));
    }
}
