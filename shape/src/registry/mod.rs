//! Registry-backed `TypeEnvironment`
//!
//! A [`TypeRegistry`] holds [`Declaration`]s keyed by qualified name and answers every lookup
//! the resolver makes from them. Declarations are written in terms of their own type
//! parameters; each lookup binds those parameters to the arguments of the use being resolved.

mod builtins;
mod declaration;

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use error_stack::{Report, ResultExt};
use tracing::{debug, info, warn};

pub use declaration::{ContainerDeclaration, Declaration};

use self::builtins::builtin_declarations;
use self::declaration::RegistryDocument;
use crate::config::ResolverConfig;
use crate::constants::{SERIALIZE_AS_NONE, SERIALIZER_NONE, SERIALIZER_NONE_SOURCE};
use crate::environment::{AdapterType, ElementKind, MapType, SerializerRef, TypeEnvironment};
use crate::error::{Error, Result};
use crate::known_types;
use crate::shape::{DefinitionKind, Shape, TypeDefinitionRef};
use crate::type_mirror::{DeclaredType, OtherKind, TypeMirror, TypeName};

/// Declarations keyed by qualified name, plus the resolver settings loaded with them
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types:  HashMap<TypeName, Declaration>,
    config: ResolverConfig,
}

impl TypeRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the JDK collection, stream and map declarations
    #[must_use]
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (name, declaration) in builtin_declarations() {
            registry.register(name, declaration);
        }
        registry
    }

    /// Parse a registry document on top of the built-in declarations
    ///
    /// # Errors
    ///
    /// Returns [`Error::RegistryLoad`] when the document is malformed or its resolver settings are
    /// invalid.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut registry = Self::with_builtins();
        registry.load_json_str(json, "<string>")?;
        Ok(registry)
    }

    /// Read a registry document on top of the built-in declarations
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileOperation`] when the file cannot be read, otherwise as
    /// [`Self::from_json_str`].
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let mut registry = Self::with_builtins();
        registry.load_path(path)?;
        Ok(registry)
    }

    /// Overlay the declarations of a registry document onto this registry
    ///
    /// A `resolver` section in the document replaces the current settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RegistryLoad`] when the document is malformed or its resolver settings are
    /// invalid. Nothing is registered on failure.
    pub fn load_json_str(&mut self, json: &str, source_name: &str) -> Result<()> {
        let document: RegistryDocument = serde_json::from_str(json)
            .change_context(Error::registry_load_failed(source_name, "malformed document"))?;

        if let Some(config) = document.resolver {
            config
                .validate()
                .change_context(Error::registry_load_failed(source_name, "bad resolver settings"))?;
            self.config = config;
        }

        let count = document.types.len();
        for (name, declaration) in document.types {
            self.register(name, declaration);
        }

        info!("Loaded {count} type declarations from {source_name}");
        Ok(())
    }

    /// Overlay the declarations of a registry file onto this registry
    ///
    /// # Errors
    ///
    /// Returns [`Error::FileOperation`] when the file cannot be read, otherwise as
    /// [`Self::load_json_str`].
    pub fn load_path(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).change_context(Error::failed_to(
            "read registry",
            path.display(),
        ))?;
        self.load_json_str(&json, &path.display().to_string())
    }

    /// Add or replace a declaration, returning the one it replaced
    pub fn register(
        &mut self,
        name: impl Into<TypeName>,
        declaration: Declaration,
    ) -> Option<Declaration> {
        let name = name.into();
        let previous = self.types.insert(name.clone(), declaration);
        if previous.is_some() {
            debug!("Replaced declaration of {name}");
        }
        previous
    }

    /// Look up a declaration
    #[must_use]
    pub fn get(&self, name: &TypeName) -> Option<&Declaration> {
        self.types.get(name)
    }

    /// Look up a declaration, failing when the name is not registered
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeNotRegistered`] when `name` is not registered.
    pub fn require(&self, name: &TypeName) -> Result<&Declaration> {
        self.get(name)
            .ok_or_else(|| Report::new(Error::not_registered(name.as_str())))
    }

    /// Resolver settings loaded with the declarations
    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Replace the resolver settings
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when `config` fails validation. The current settings
    /// are kept.
    pub fn set_config(&mut self, config: ResolverConfig) -> Result<()> {
        config.validate()?;
        self.config = config;
        Ok(())
    }

    /// Registered names in sorted order
    #[must_use]
    pub fn names(&self) -> Vec<&TypeName> {
        let mut names: Vec<&TypeName> = self.types.keys().collect();
        names.sort();
        names
    }

    /// Number of registered declarations
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether nothing is registered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// The raw declared type of a registered name
    ///
    /// # Errors
    ///
    /// Returns [`Error::TypeNotRegistered`] when `name` is not registered.
    pub fn declared_type(&self, name: &TypeName) -> Result<DeclaredType> {
        self.require(name)?;
        Ok(DeclaredType::raw(name.clone()))
    }

    /// Declaration of `declared` with its parameters bound to the use's arguments
    fn instantiate(&self, declared: &DeclaredType) -> Option<Instantiation<'_>> {
        let declaration = self.types.get(&declared.name)?;
        let parameters = &declaration.type_parameters;

        let bindings = if parameters.is_empty() {
            HashMap::new()
        } else if parameters.len() == declared.arguments.len() {
            parameters
                .iter()
                .zip(&declared.arguments)
                .map(|(parameter, argument)| (parameter.name.clone(), argument.clone()))
                .collect()
        } else {
            if !declared.is_raw() {
                warn!(
                    "{} declares {} type parameters but was used with {} arguments, treating as raw",
                    declared.name,
                    parameters.len(),
                    declared.arguments.len()
                );
            }
            parameters
                .iter()
                .map(|parameter| (parameter.name.clone(), parameter.as_variable()))
                .collect()
        };

        Some(Instantiation {
            declaration,
            bindings,
        })
    }
}

/// A declaration together with the bindings of one use
struct Instantiation<'r> {
    declaration: &'r Declaration,
    bindings:    HashMap<String, TypeMirror>,
}

impl Instantiation<'_> {
    fn bind(&self, type_mirror: &TypeMirror) -> TypeMirror {
        type_mirror.substitute(&self.bindings)
    }
}

fn is_serializer_sentinel(serializer: &SerializerRef) -> bool {
    matches!(serializer.as_str(), SERIALIZER_NONE | SERIALIZER_NONE_SOURCE)
}

fn is_serialize_as_sentinel(target: &TypeMirror) -> bool {
    match target {
        TypeMirror::Declared(declared) => declared.name.as_str() == SERIALIZE_AS_NONE,
        TypeMirror::Other(OtherKind::Void) => true,
        _ => false,
    }
}

impl TypeEnvironment for TypeRegistry {
    fn element_kind(&self, declared: &DeclaredType) -> ElementKind {
        match self.types.get(&declared.name) {
            Some(declaration) => declaration.kind,
            None if known_types::is_known(&declared.name) => ElementKind::Class,
            None => ElementKind::Other,
        }
    }

    fn type_hint(&self, declared: &DeclaredType) -> Option<TypeMirror> {
        let instantiation = self.instantiate(declared)?;
        instantiation
            .declaration
            .type_hint
            .as_ref()
            .map(|hint| instantiation.bind(hint))
    }

    fn custom_serializer(&self, declared: &DeclaredType) -> Option<SerializerRef> {
        self.types
            .get(&declared.name)?
            .serialize_using
            .clone()
            .filter(|serializer| !is_serializer_sentinel(serializer))
    }

    fn serialize_as(&self, declared: &DeclaredType) -> Option<TypeMirror> {
        let instantiation = self.instantiate(declared)?;
        instantiation
            .declaration
            .serialize_as
            .as_ref()
            .filter(|target| !is_serialize_as_sentinel(target))
            .map(|target| instantiation.bind(target))
    }

    fn adapter(&self, declared: &DeclaredType) -> Option<AdapterType> {
        let instantiation = self.instantiate(declared)?;
        instantiation
            .declaration
            .adapter
            .as_ref()
            .map(|adapting_type| AdapterType {
                adapting_type: instantiation.bind(adapting_type),
            })
    }

    fn map_type(&self, declared: &DeclaredType) -> Option<MapType> {
        let instantiation = self.instantiate(declared)?;
        match &instantiation.declaration.container {
            Some(ContainerDeclaration::Map { key, value }) => Some(MapType {
                key_type:   instantiation.bind(key),
                value_type: instantiation.bind(value),
            }),
            _ => None,
        }
    }

    fn component_type(&self, declared: &DeclaredType) -> Option<TypeMirror> {
        let instantiation = self.instantiate(declared)?;
        match &instantiation.declaration.container {
            Some(
                ContainerDeclaration::Collection(element) | ContainerDeclaration::Stream(element),
            ) => Some(instantiation.bind(element)),
            _ => None,
        }
    }

    fn known_type(&self, declared: &DeclaredType) -> Option<Shape> {
        match self.types.get(&declared.name) {
            Some(Declaration {
                known: Some(shape), ..
            }) => Some(shape.clone()),
            _ => known_types::known_shape(&declared.name).cloned(),
        }
    }

    fn type_definition(&self, declared: &DeclaredType) -> Option<TypeDefinitionRef> {
        let declaration = self.types.get(&declared.name)?;
        if declaration.container.is_some() || declaration.known.is_some() {
            return None;
        }
        let kind = match declaration.kind {
            ElementKind::Class | ElementKind::Interface => DefinitionKind::Object,
            ElementKind::Enum => DefinitionKind::Enum,
            ElementKind::Annotation | ElementKind::Other => return None,
        };
        Some(TypeDefinitionRef {
            name: declared.name.clone(),
            kind,
        })
    }

    fn is_collection_or_stream(&self, declared: &DeclaredType) -> bool {
        self.types
            .get(&declared.name)
            .is_some_and(Declaration::is_collection_or_stream)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic, reason = "tests")]
mod tests {
    use std::io::Write;

    use serde_json::json;

    use super::*;
    use crate::config::AdapterPolicy;
    use crate::constants::{TYPE_LIST, TYPE_MAP, TYPE_STRING};

    fn parse(source: &str) -> DeclaredType {
        match source.parse::<TypeMirror>().unwrap() {
            TypeMirror::Declared(declared) => declared,
            other => panic!("expected a declared type, got {other}"),
        }
    }

    fn registry(document: &serde_json::Value) -> TypeRegistry {
        TypeRegistry::from_json_str(&document.to_string()).unwrap()
    }

    #[test]
    fn test_builtin_list_binds_element() {
        let registry = TypeRegistry::with_builtins();
        let list = parse("java.util.List<java.lang.String>");

        assert_eq!(registry.element_kind(&list), ElementKind::Interface);
        assert_eq!(
            registry.component_type(&list),
            Some(TypeMirror::declared(TYPE_STRING))
        );
        assert!(registry.is_collection_or_stream(&list));
        assert_eq!(registry.map_type(&list), None);
        assert_eq!(registry.type_definition(&list), None);
    }

    #[test]
    fn test_builtin_map_binds_key_and_value() {
        let registry = TypeRegistry::with_builtins();
        let map = parse("java.util.Map<java.lang.String, java.lang.Integer>");

        let map_type = registry.map_type(&map).unwrap();
        assert_eq!(map_type.key_type, TypeMirror::declared(TYPE_STRING));
        assert_eq!(map_type.value_type, TypeMirror::declared("java.lang.Integer"));
        assert!(!registry.is_collection_or_stream(&map));
        assert_eq!(registry.component_type(&map), None);
    }

    #[test]
    fn test_raw_use_binds_type_variables() {
        let registry = TypeRegistry::with_builtins();
        assert_eq!(
            registry.component_type(&DeclaredType::raw(TYPE_LIST)),
            Some(TypeMirror::variable("E", None))
        );
    }

    #[test]
    fn test_arity_mismatch_is_treated_as_raw() {
        let registry = TypeRegistry::with_builtins();
        let map = parse("java.util.Map<java.lang.String>");
        let map_type = registry.map_type(&map).unwrap();
        assert_eq!(map_type.key_type, TypeMirror::variable("K", None));
        assert_eq!(map_type.value_type, TypeMirror::variable("V", None));
    }

    #[test]
    fn test_bounded_parameter_keeps_bound_when_raw() {
        let registry = registry(&json!({
            "types": {
                "com.example.Box": {
                    "type_parameters": ["T extends java.lang.Number"],
                    "container": {"collection": "T"}
                }
            }
        }));
        assert_eq!(
            registry.component_type(&DeclaredType::raw("com.example.Box")),
            Some(TypeMirror::variable(
                "T",
                Some(TypeMirror::declared("java.lang.Number"))
            ))
        );
    }

    #[test]
    fn test_sentinels_count_as_absent() {
        let registry = registry(&json!({
            "types": {
                "com.example.Plain": {
                    "serialize_using": SERIALIZER_NONE,
                    "serialize_as": "java.lang.Void"
                },
                "com.example.SourceSpelling": {
                    "serialize_using": SERIALIZER_NONE_SOURCE,
                    "serialize_as": "void"
                },
                "com.example.Custom": {
                    "serialize_using": "com.example.CustomSerializer",
                    "serialize_as": "java.lang.String"
                }
            }
        }));

        for name in ["com.example.Plain", "com.example.SourceSpelling"] {
            let declared = DeclaredType::raw(name);
            assert_eq!(registry.custom_serializer(&declared), None);
            assert_eq!(registry.serialize_as(&declared), None);
        }

        let custom = DeclaredType::raw("com.example.Custom");
        assert_eq!(
            registry.custom_serializer(&custom),
            Some(SerializerRef::from("com.example.CustomSerializer"))
        );
        assert_eq!(
            registry.serialize_as(&custom),
            Some(TypeMirror::declared(TYPE_STRING))
        );
    }

    #[test]
    fn test_type_definitions() {
        let registry = registry(&json!({
            "types": {
                "com.example.Order": {"kind": "class"},
                "com.example.Status": {"kind": "enum"},
                "com.example.Marker": {"kind": "annotation"},
                "com.example.Money": {"known": {"primitive": "number"}}
            }
        }));

        assert_eq!(
            registry.type_definition(&DeclaredType::raw("com.example.Order")),
            Some(TypeDefinitionRef::object("com.example.Order"))
        );
        assert_eq!(
            registry.type_definition(&DeclaredType::raw("com.example.Status")),
            Some(TypeDefinitionRef::enumeration("com.example.Status"))
        );
        assert_eq!(
            registry.type_definition(&DeclaredType::raw("com.example.Marker")),
            None
        );

        let money = DeclaredType::raw("com.example.Money");
        assert_eq!(registry.type_definition(&money), None);
        assert_eq!(registry.known_type(&money), Some(Shape::NUMBER));
    }

    #[test]
    fn test_element_kind_of_unregistered_names() {
        let registry = TypeRegistry::new();
        assert_eq!(
            registry.element_kind(&DeclaredType::raw(TYPE_STRING)),
            ElementKind::Class
        );
        assert_eq!(
            registry.known_type(&DeclaredType::raw(TYPE_STRING)),
            Some(Shape::STRING)
        );
        assert_eq!(
            registry.element_kind(&DeclaredType::raw("com.example.Missing")),
            ElementKind::Other
        );
    }

    #[test]
    fn test_document_overlays_builtins_and_config() {
        let registry = registry(&json!({
            "resolver": {"max_depth": 8, "adapter_policy": "use_adapting_shape"},
            "types": {
                "java.util.List": {"kind": "class"}
            }
        }));

        assert_eq!(registry.config().max_depth, 8);
        assert_eq!(
            registry.config().adapter_policy,
            AdapterPolicy::UseAdaptingShape
        );
        let list = DeclaredType::raw(TYPE_LIST);
        assert_eq!(registry.component_type(&list), None);
        assert!(registry.get(&TYPE_MAP.into()).is_some());
    }

    #[test]
    fn test_malformed_document() {
        let error = TypeRegistry::from_json_str(r#"{"types": {"a.B": {"kind": "struct"}}}"#)
            .unwrap_err();
        assert!(matches!(error.current_context(), Error::RegistryLoad(_)));

        let error = TypeRegistry::from_json_str(r#"{"resolver": {"max_depth": 0}}"#).unwrap_err();
        assert!(matches!(error.current_context(), Error::RegistryLoad(_)));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "{}",
            json!({"types": {"com.example.Order": {"properties": {"id": "long"}}}})
        )
        .unwrap();

        let registry = TypeRegistry::from_path(file.path()).unwrap();
        assert!(registry.get(&"com.example.Order".into()).is_some());
        assert_eq!(registry.names().first().map(|name| name.as_str()), Some("com.example.Order"));
    }

    #[test]
    fn test_missing_file() {
        let error = TypeRegistry::from_path("/nonexistent/registry.json").unwrap_err();
        assert!(matches!(error.current_context(), Error::FileOperation(_)));
    }

    #[test]
    fn test_require_unregistered() {
        let error = TypeRegistry::new()
            .declared_type(&"com.example.Missing".into())
            .unwrap_err();
        assert!(matches!(
            error.current_context(),
            Error::TypeNotRegistered { .. }
        ));
    }
}
