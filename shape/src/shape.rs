//! Output algebra of the resolver
//!
//! A [`Shape`] describes what values of a type look like once serialized to JSON. Shapes are
//! plain owned values: the resolver builds them bottom-up and hands them to the caller.

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::type_mirror::{PrimitiveKind, TypeName};

/// JSON primitive value kinds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum JsonPrimitive {
    /// A JSON string
    String,
    /// A JSON number that may carry a fraction
    Number,
    /// A JSON number without a fraction
    Integer,
    /// `true` or `false`
    Boolean,
}

impl From<PrimitiveKind> for JsonPrimitive {
    fn from(kind: PrimitiveKind) -> Self {
        match kind {
            PrimitiveKind::Boolean => Self::Boolean,
            PrimitiveKind::Byte | PrimitiveKind::Short | PrimitiveKind::Int | PrimitiveKind::Long => {
                Self::Integer
            }
            PrimitiveKind::Float | PrimitiveKind::Double => Self::Number,
            PrimitiveKind::Char => Self::String,
        }
    }
}

/// How a referenced type definition serializes
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum DefinitionKind {
    /// A JSON object with named properties
    #[default]
    Object,
    /// One of a fixed set of string constants
    Enum,
}

/// Reference to a separately documented type definition
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDefinitionRef {
    /// Qualified name of the definition
    pub name: TypeName,
    /// How the definition serializes
    #[serde(default)]
    pub kind: DefinitionKind,
}

impl TypeDefinitionRef {
    /// Reference an object definition
    #[must_use]
    pub fn object(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            kind: DefinitionKind::Object,
        }
    }

    /// Reference an enum definition
    #[must_use]
    pub fn enumeration(name: impl Into<TypeName>) -> Self {
        Self {
            name: name.into(),
            kind: DefinitionKind::Enum,
        }
    }
}

/// The JSON shape of a type
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Shape {
    /// A JSON primitive
    Primitive(JsonPrimitive),
    /// An untyped JSON object, also the shape of anything that cannot be resolved
    Object,
    /// A reference to a separately documented type definition
    NamedClass(TypeDefinitionRef),
    /// An ordered sequence of the element shape
    Array(Box<Self>),
    /// A keyed collection
    Map {
        /// Shape of the keys
        key:   Box<Self>,
        /// Shape of the values
        value: Box<Self>,
    },
}

impl Shape {
    /// `Primitive(string)`
    pub const STRING: Self = Self::Primitive(JsonPrimitive::String);
    /// `Primitive(number)`
    pub const NUMBER: Self = Self::Primitive(JsonPrimitive::Number);
    /// `Primitive(integer)`
    pub const INTEGER: Self = Self::Primitive(JsonPrimitive::Integer);
    /// `Primitive(boolean)`
    pub const BOOLEAN: Self = Self::Primitive(JsonPrimitive::Boolean);

    /// Array of `element`
    #[must_use]
    pub fn array(element: Self) -> Self {
        Self::Array(Box::new(element))
    }

    /// Map from `key` to `value`
    #[must_use]
    pub fn map(key: Self, value: Self) -> Self {
        Self::Map {
            key:   Box::new(key),
            value: Box::new(value),
        }
    }

    /// Reference to an object definition
    #[must_use]
    pub fn named(name: impl Into<TypeName>) -> Self {
        Self::NamedClass(TypeDefinitionRef::object(name))
    }

    /// Whether values serialize as JSON objects
    #[must_use]
    pub const fn is_object(&self) -> bool {
        match self {
            Self::Object | Self::Map { .. } => true,
            Self::NamedClass(definition) => matches!(definition.kind, DefinitionKind::Object),
            Self::Primitive(_) | Self::Array(_) => false,
        }
    }

    /// Whether values serialize as JSON arrays
    #[must_use]
    pub const fn is_array(&self) -> bool {
        matches!(self, Self::Array(_))
    }

    /// Whether values serialize as JSON strings
    #[must_use]
    pub const fn is_string(&self) -> bool {
        match self {
            Self::Primitive(primitive) => matches!(primitive, JsonPrimitive::String),
            Self::NamedClass(definition) => matches!(definition.kind, DefinitionKind::Enum),
            Self::Object | Self::Array(_) | Self::Map { .. } => false,
        }
    }

    /// Whether values serialize as JSON numbers
    #[must_use]
    pub const fn is_number(&self) -> bool {
        matches!(
            self,
            Self::Primitive(JsonPrimitive::Number | JsonPrimitive::Integer)
        )
    }

    /// Whether values serialize as JSON numbers without a fraction
    #[must_use]
    pub const fn is_whole_number(&self) -> bool {
        matches!(self, Self::Primitive(JsonPrimitive::Integer))
    }

    /// Whether values serialize as JSON booleans
    #[must_use]
    pub const fn is_boolean(&self) -> bool {
        matches!(self, Self::Primitive(JsonPrimitive::Boolean))
    }

    /// Element shape of an array
    #[must_use]
    pub fn element(&self) -> Option<&Self> {
        match self {
            Self::Array(element) => Some(element.as_ref()),
            _ => None,
        }
    }
}

impl From<JsonPrimitive> for Shape {
    fn from(primitive: JsonPrimitive) -> Self {
        Self::Primitive(primitive)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(primitive) => write!(f, "{primitive}"),
            Self::Object => f.write_str("object"),
            Self::NamedClass(definition) => write!(f, "{}", definition.name),
            Self::Array(element) => write!(f, "array<{element}>"),
            Self::Map { key, value } => write!(f, "map<{key}, {value}>"),
        }
    }
}
