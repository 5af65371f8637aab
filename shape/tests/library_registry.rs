//! End-to-end resolution over a registry document

#![allow(clippy::unwrap_used, reason = "tests")]

use json_shape::{
    AdapterPolicy, DefinitionKind, Error, Shape, ShapeResolver, TypeDefinitionRef, TypeMirror,
    TypeRegistry, describe_type,
};

const LIBRARY: &str = include_str!("fixtures/library.json");

fn registry() -> TypeRegistry {
    TypeRegistry::from_json_str(LIBRARY).unwrap()
}

fn resolve(registry: &TypeRegistry, source: &str) -> Shape {
    ShapeResolver::for_registry(registry)
        .resolve_shape(&source.parse::<TypeMirror>().unwrap())
        .unwrap()
}

fn book() -> Shape {
    Shape::named("com.example.library.Book")
}

#[test]
fn test_document_settings_are_loaded() {
    let registry = registry();
    assert_eq!(registry.config().max_depth, 32);
    assert_eq!(registry.config().adapter_policy, AdapterPolicy::SideEffectOnly);
    assert!(registry.get(&"java.util.List".into()).is_some());
}

#[test]
fn test_library_properties() {
    let registry = registry();
    let description = describe_type(&registry, &"com.example.library.Library".into()).unwrap();

    assert_eq!(description.shape, Shape::named("com.example.library.Library"));
    let shapes: Vec<(&str, &Shape)> = description
        .properties
        .iter()
        .map(|property| (property.name.as_str(), &property.shape))
        .collect();
    assert_eq!(
        shapes,
        vec![
            ("books", &Shape::array(book())),
            ("name", &Shape::STRING),
            ("opened", &Shape::STRING),
            (
                "shelves",
                &Shape::map(Shape::STRING, Shape::named("com.example.library.Shelf"))
            ),
        ]
    );
}

#[test]
fn test_book_properties() {
    let registry = registry();
    let description = describe_type(&registry, &"com.example.library.Book".into()).unwrap();

    let shape_of = |name: &str| {
        description
            .properties
            .iter()
            .find(|property| property.name == name)
            .map(|property| property.shape.clone())
            .unwrap()
    };

    assert_eq!(shape_of("isbn"), Shape::STRING);
    assert_eq!(shape_of("title"), Shape::STRING);
    assert_eq!(shape_of("pages"), Shape::INTEGER);
    assert_eq!(shape_of("cover"), Shape::STRING);
    assert_eq!(
        shape_of("genre"),
        Shape::NamedClass(TypeDefinitionRef {
            name: "com.example.library.Genre".into(),
            kind: DefinitionKind::Enum,
        })
    );
    assert_eq!(shape_of("sequel"), book());
    assert_eq!(shape_of("tags"), Shape::array(Shape::STRING));
    assert_eq!(shape_of("published"), Shape::INTEGER);
}

#[test]
fn test_array_of_lists() {
    assert_eq!(
        resolve(&registry(), "java.util.List<com.example.library.Book>[]"),
        Shape::array(Shape::array(book()))
    );
}

#[test]
fn test_adapter_policies() {
    let mut registry = registry();
    let location = "com.example.library.Location".parse::<TypeMirror>().unwrap();

    let resolution = ShapeResolver::for_registry(&registry)
        .resolve_with_report(&location)
        .unwrap();
    assert_eq!(
        resolution.shape,
        Shape::named("com.example.library.Location")
    );
    assert_eq!(resolution.adapters.len(), 1);
    assert_eq!(
        resolution.adapters[0].shape,
        Shape::named("com.example.library.Coordinates")
    );

    let config = registry
        .config()
        .clone()
        .with_adapter_policy(AdapterPolicy::UseAdaptingShape);
    registry.set_config(config).unwrap();
    assert_eq!(
        resolve(&registry, "com.example.library.Location"),
        Shape::named("com.example.library.Location")
    );
}

#[test]
fn test_bounded_catalog() {
    let registry = registry();
    assert_eq!(
        resolve(&registry, "com.example.library.Catalog"),
        Shape::array(book())
    );
    assert_eq!(
        resolve(
            &registry,
            "com.example.library.Catalog<com.example.library.Book>"
        ),
        Shape::array(book())
    );
}

#[test]
fn test_self_keyed_index_breaks_cycle() {
    assert_eq!(
        resolve(&registry(), "com.example.library.Index"),
        Shape::map(Shape::STRING, Shape::Object)
    );
}

#[test]
fn test_custom_serializer_is_opaque() {
    assert_eq!(
        resolve(&registry(), "com.example.library.Ledger"),
        Shape::Object
    );
}

#[test]
fn test_self_referential_chain_reports_depth() {
    let registry = registry();
    let resolver = ShapeResolver::for_registry(&registry);
    let error = resolver
        .resolve_shape(&"com.example.library.Chain".parse::<TypeMirror>().unwrap())
        .unwrap_err();

    assert_eq!(
        error.current_context(),
        &Error::RecursionLimitExceeded {
            type_name: "com.example.library.Chain".to_string(),
            depth:     33,
        }
    );
}

#[test]
fn test_invalid_settings_are_rejected() {
    let mut registry = registry();
    let config = registry.config().clone().with_max_depth(0);
    let error = registry.set_config(config).unwrap_err();

    assert!(matches!(error.current_context(), Error::InvalidArgument(..)));
    assert_eq!(registry.config().max_depth, 32);
}
