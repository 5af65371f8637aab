//! Lookup services the resolver consults
//!
//! The resolver never inspects declarations itself. Everything it needs to know about a
//! declared type (annotations, adapters, container structure, well-known and documented
//! types) comes through [`TypeEnvironment`], so any metadata source can drive it and tests
//! can substitute small fakes.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::shape::{Shape, TypeDefinitionRef};
use crate::type_mirror::{DeclaredType, TypeMirror};

/// Kind of declaration behind a declared type
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Display,
    AsRefStr,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ElementKind {
    /// A class
    #[default]
    Class,
    /// An interface
    Interface,
    /// An enum
    Enum,
    /// An annotation type
    Annotation,
    /// Anything else, including unknown declarations
    Other,
}

impl ElementKind {
    /// Whether known-type and type-definition lookups apply to this kind
    #[must_use]
    pub const fn is_documentable(self) -> bool {
        matches!(self, Self::Class | Self::Interface | Self::Enum)
    }
}

/// A custom serializer named on a declaration
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SerializerRef(String);

impl SerializerRef {
    /// Get the serializer's qualified name
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SerializerRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SerializerRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for SerializerRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An adapter wrapping a declared type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdapterType {
    /// The type the adapter presents to the serializer
    pub adapting_type: TypeMirror,
}

/// Key and value types of a map-like type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapType {
    /// Key type
    pub key_type:   TypeMirror,
    /// Value type
    pub value_type: TypeMirror,
}

/// Metadata lookups for declared types
///
/// Every method is a pure query. The defaults answer "nothing known", so an implementation
/// only overrides what its metadata source can actually supply.
pub trait TypeEnvironment {
    /// Kind of the declaration behind `declared`
    fn element_kind(&self, _declared: &DeclaredType) -> ElementKind {
        ElementKind::Class
    }

    /// Explicit "treat as this other type" directive
    fn type_hint(&self, _declared: &DeclaredType) -> Option<TypeMirror> {
        None
    }

    /// Custom serialization function, when declared and not the default
    fn custom_serializer(&self, _declared: &DeclaredType) -> Option<SerializerRef> {
        None
    }

    /// Explicit serialization target type, when declared and not the default
    fn serialize_as(&self, _declared: &DeclaredType) -> Option<TypeMirror> {
        None
    }

    /// Adapter wrapping the declaration
    fn adapter(&self, _declared: &DeclaredType) -> Option<AdapterType> {
        None
    }

    /// Key and value types, when the type is map-like
    fn map_type(&self, _declared: &DeclaredType) -> Option<MapType> {
        None
    }

    /// Element type, when the type is collection-like or stream-like
    fn component_type(&self, _declared: &DeclaredType) -> Option<TypeMirror> {
        None
    }

    /// Pre-classified shape for well-known types
    fn known_type(&self, _declared: &DeclaredType) -> Option<Shape> {
        None
    }

    /// Documented definition for user-declared structured types
    fn type_definition(&self, _declared: &DeclaredType) -> Option<TypeDefinitionRef> {
        None
    }

    /// Whether the type is a collection or a stream
    fn is_collection_or_stream(&self, _declared: &DeclaredType) -> bool {
        false
    }
}
