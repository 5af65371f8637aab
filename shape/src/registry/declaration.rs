//! Declaration records stored in a `TypeRegistry`

use std::collections::BTreeMap;
use std::collections::HashMap;

use serde::Deserialize;

use crate::config::ResolverConfig;
use crate::environment::{ElementKind, SerializerRef};
use crate::shape::Shape;
use crate::type_mirror::{TypeMirror, TypeName, TypeParameter};

/// Structural container classification of a declaration
///
/// Element, key and value types are written in terms of the declaration's type parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields)]
pub enum ContainerDeclaration {
    /// A map-like type
    Map {
        /// Key type
        key:   TypeMirror,
        /// Value type
        value: TypeMirror,
    },
    /// A collection-like type with its element type
    Collection(TypeMirror),
    /// A stream-like type with its element type
    Stream(TypeMirror),
}

/// Everything the registry knows about one declared type
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Declaration {
    /// Kind of declaration
    pub kind:            ElementKind,
    /// Declared type parameters, bound by a use's type arguments
    pub type_parameters: Vec<TypeParameter>,
    /// Explicit "treat as this other type" directive
    pub type_hint:       Option<TypeMirror>,
    /// Custom serializer
    pub serialize_using: Option<SerializerRef>,
    /// Explicit serialization target type
    pub serialize_as:    Option<TypeMirror>,
    /// Adapting type of an adapter wrapping this declaration
    pub adapter:         Option<TypeMirror>,
    /// Container classification
    pub container:       Option<ContainerDeclaration>,
    /// Pre-classified leaf shape
    pub known:           Option<Shape>,
    /// Documented properties and their types
    pub properties:      BTreeMap<String, TypeMirror>,
}

impl Declaration {
    /// A declaration of the given kind with nothing else set
    #[must_use]
    pub fn of_kind(kind: ElementKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Add a type parameter
    #[must_use]
    pub fn with_type_parameter(mut self, parameter: TypeParameter) -> Self {
        self.type_parameters.push(parameter);
        self
    }

    /// Set the type hint
    #[must_use]
    pub fn with_type_hint(mut self, hint: TypeMirror) -> Self {
        self.type_hint = Some(hint);
        self
    }

    /// Set the custom serializer
    #[must_use]
    pub fn with_serializer(mut self, serializer: impl Into<SerializerRef>) -> Self {
        self.serialize_using = Some(serializer.into());
        self
    }

    /// Set the explicit serialization target
    #[must_use]
    pub fn with_serialize_as(mut self, target: TypeMirror) -> Self {
        self.serialize_as = Some(target);
        self
    }

    /// Set the adapting type
    #[must_use]
    pub fn with_adapter(mut self, adapting_type: TypeMirror) -> Self {
        self.adapter = Some(adapting_type);
        self
    }

    /// Set the container classification
    #[must_use]
    pub fn with_container(mut self, container: ContainerDeclaration) -> Self {
        self.container = Some(container);
        self
    }

    /// Set the known leaf shape
    #[must_use]
    pub fn with_known(mut self, shape: Shape) -> Self {
        self.known = Some(shape);
        self
    }

    /// Add a documented property
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, property_type: TypeMirror) -> Self {
        self.properties.insert(name.into(), property_type);
        self
    }

    /// Whether this declaration is collection-like or stream-like
    #[must_use]
    pub const fn is_collection_or_stream(&self) -> bool {
        matches!(
            self.container,
            Some(ContainerDeclaration::Collection(_) | ContainerDeclaration::Stream(_))
        )
    }
}

/// Top-level layout of a registry document
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct RegistryDocument {
    #[serde(default)]
    pub resolver: Option<ResolverConfig>,
    #[serde(default)]
    pub types:    HashMap<TypeName, Declaration>,
}
