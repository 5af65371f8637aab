//! Type graph model walked by the shape resolver
//!
//! A [`TypeMirror`] is a closed tagged union over the kinds of type node the resolver
//! understands. Types can be written in their Java source form and parsed with
//! [`parse_type`], which is also how they appear in registry documents.

mod type_name;
mod type_parser;

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

pub use type_name::TypeName;
pub use type_parser::{parse_type, parse_type_parameter};

use crate::error::{Error, Result};

/// Primitive type kinds
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PrimitiveKind {
    /// `boolean`
    Boolean,
    /// `byte`, the kind whose arrays serialize as strings
    Byte,
    /// `short`
    Short,
    /// `int`
    Int,
    /// `long`
    Long,
    /// `char`
    Char,
    /// `float`
    Float,
    /// `double`
    Double,
}

/// Type kinds with no dedicated resolution rule
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum OtherKind {
    /// `void`
    Void,
    /// The type of the `null` literal
    Null,
    /// A type that failed to resolve upstream
    Error,
    /// `A & B`
    Intersection,
    /// `A | B`
    Union,
}

/// A declared (class, interface or enum) type with its type arguments
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeclaredType {
    /// Qualified name of the declaration
    pub name:      TypeName,
    /// Type arguments, empty for raw or non-generic uses
    pub arguments: Vec<TypeMirror>,
}

impl DeclaredType {
    /// Create a declared type with type arguments
    #[must_use]
    pub fn new(name: impl Into<TypeName>, arguments: Vec<TypeMirror>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    /// Create a declared type without type arguments
    #[must_use]
    pub fn raw(name: impl Into<TypeName>) -> Self {
        Self::new(name, Vec::new())
    }

    /// Identity used for cycle detection
    ///
    /// The qualified name, ignoring type arguments, or the rendered type when no name is available.
    #[must_use]
    pub fn identity(&self) -> String {
        if self.name.as_str().is_empty() {
            self.to_string()
        } else {
            self.name.as_str().to_string()
        }
    }

    /// Whether this type was written without type arguments
    #[must_use]
    pub const fn is_raw(&self) -> bool {
        self.arguments.is_empty()
    }
}

impl fmt::Display for DeclaredType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;
        if !self.arguments.is_empty() {
            f.write_str("<")?;
            for (index, argument) in self.arguments.iter().enumerate() {
                if index > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{argument}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

/// A node in the type graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeMirror {
    /// A primitive type
    Primitive(PrimitiveKind),
    /// A class, interface or enum type
    Declared(DeclaredType),
    /// An array with its component type
    Array(Box<Self>),
    /// A generic type parameter
    TypeVariable {
        /// Parameter name
        name:        String,
        /// Declared upper bound, if any
        upper_bound: Option<Box<Self>>,
    },
    /// A `?` type argument
    Wildcard {
        /// Upper (`extends`) bound, if any
        extends_bound: Option<Box<Self>>,
    },
    /// Any other kind of type
    Other(OtherKind),
}

impl TypeMirror {
    /// Shorthand for a declared type without type arguments
    #[must_use]
    pub fn declared(name: impl Into<TypeName>) -> Self {
        Self::Declared(DeclaredType::raw(name))
    }

    /// Shorthand for a declared type with type arguments
    #[must_use]
    pub fn generic(name: impl Into<TypeName>, arguments: Vec<Self>) -> Self {
        Self::Declared(DeclaredType::new(name, arguments))
    }

    /// Shorthand for an array of `component`
    #[must_use]
    pub fn array_of(component: Self) -> Self {
        Self::Array(Box::new(component))
    }

    /// Shorthand for a type variable
    #[must_use]
    pub fn variable(name: impl Into<String>, upper_bound: Option<Self>) -> Self {
        Self::TypeVariable {
            name:        name.into(),
            upper_bound: upper_bound.map(Box::new),
        }
    }

    /// Shorthand for a wildcard
    #[must_use]
    pub fn wildcard(extends_bound: Option<Self>) -> Self {
        Self::Wildcard {
            extends_bound: extends_bound.map(Box::new),
        }
    }

    /// Replace type parameter references with their bindings
    ///
    /// A reference is a declared type without arguments whose name is a key of `bindings`.
    #[must_use]
    pub fn substitute(&self, bindings: &HashMap<String, Self>) -> Self {
        if bindings.is_empty() {
            return self.clone();
        }
        match self {
            Self::Declared(declared) => {
                if declared.is_raw()
                    && let Some(bound) = bindings.get(declared.name.as_str())
                {
                    return bound.clone();
                }
                Self::Declared(DeclaredType {
                    name:      declared.name.clone(),
                    arguments: declared
                        .arguments
                        .iter()
                        .map(|argument| argument.substitute(bindings))
                        .collect(),
                })
            }
            Self::Array(component) => Self::Array(Box::new(component.substitute(bindings))),
            Self::TypeVariable { name, upper_bound } => Self::TypeVariable {
                name:        name.clone(),
                upper_bound: upper_bound
                    .as_ref()
                    .map(|bound| Box::new(bound.substitute(bindings))),
            },
            Self::Wildcard { extends_bound } => Self::Wildcard {
                extends_bound: extends_bound
                    .as_ref()
                    .map(|bound| Box::new(bound.substitute(bindings))),
            },
            Self::Primitive(_) | Self::Other(_) => self.clone(),
        }
    }
}

impl fmt::Display for TypeMirror {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primitive(kind) => write!(f, "{kind}"),
            Self::Declared(declared) => write!(f, "{declared}"),
            Self::Array(component) => write!(f, "{component}[]"),
            Self::TypeVariable { name, .. } => f.write_str(name),
            Self::Wildcard {
                extends_bound: Some(bound),
            } => write!(f, "? extends {bound}"),
            Self::Wildcard {
                extends_bound: None,
            } => f.write_str("?"),
            Self::Other(kind) => write!(f, "{kind}"),
        }
    }
}

impl FromStr for TypeMirror {
    type Err = error_stack::Report<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_type(s)
    }
}

impl TryFrom<String> for TypeMirror {
    type Error = error_stack::Report<Error>;

    fn try_from(value: String) -> Result<Self> {
        parse_type(&value)
    }
}

impl From<TypeMirror> for String {
    fn from(type_mirror: TypeMirror) -> Self {
        type_mirror.to_string()
    }
}

/// A declared type parameter, `T` or `T extends Bound`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TypeParameter {
    /// Parameter name
    pub name:  String,
    /// Declared upper bound
    pub bound: Option<TypeMirror>,
}

impl TypeParameter {
    /// The type variable a raw use of the declaring type binds this parameter to
    #[must_use]
    pub fn as_variable(&self) -> TypeMirror {
        TypeMirror::variable(self.name.clone(), self.bound.clone())
    }
}

impl fmt::Display for TypeParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.bound {
            Some(bound) => write!(f, "{} extends {bound}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl TryFrom<String> for TypeParameter {
    type Error = error_stack::Report<Error>;

    fn try_from(value: String) -> Result<Self> {
        parse_type_parameter(&value)
    }
}

impl From<TypeParameter> for String {
    fn from(parameter: TypeParameter) -> Self {
        parameter.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_ignores_type_arguments() {
        let list = DeclaredType::new(
            "java.util.List",
            vec![TypeMirror::declared("java.lang.String")],
        );
        assert_eq!(list.identity(), "java.util.List");
    }

    #[test]
    fn test_identity_falls_back_to_rendered_type() {
        let anonymous = DeclaredType::raw("");
        assert_eq!(anonymous.identity(), "");

        let anonymous_generic = DeclaredType::new("", vec![TypeMirror::Primitive(PrimitiveKind::Int)]);
        assert_eq!(anonymous_generic.identity(), "<int>");
    }

    #[test]
    fn test_display_matches_source_form() {
        let map = TypeMirror::generic(
            "java.util.Map",
            vec![
                TypeMirror::declared("java.lang.String"),
                TypeMirror::array_of(TypeMirror::Primitive(PrimitiveKind::Int)),
            ],
        );
        assert_eq!(map.to_string(), "java.util.Map<java.lang.String, int[]>");

        let wildcard = TypeMirror::wildcard(Some(TypeMirror::declared("com.example.Animal")));
        assert_eq!(wildcard.to_string(), "? extends com.example.Animal");
        assert_eq!(TypeMirror::wildcard(None).to_string(), "?");
        assert_eq!(TypeMirror::Other(OtherKind::Void).to_string(), "void");
    }

    #[test]
    fn test_substitute_replaces_parameter_references() {
        let bindings = HashMap::from([(
            "E".to_string(),
            TypeMirror::declared("java.lang.String"),
        )]);
        let element = TypeMirror::generic(
            "java.util.List",
            vec![TypeMirror::array_of(TypeMirror::declared("E"))],
        );

        assert_eq!(
            element.substitute(&bindings).to_string(),
            "java.util.List<java.lang.String[]>"
        );
    }

    #[test]
    fn test_substitute_leaves_parameterized_names_alone() {
        // `E<X>` is not a reference to parameter `E`
        let bindings = HashMap::from([("E".to_string(), TypeMirror::declared("java.lang.String"))]);
        let not_a_reference = TypeMirror::generic("E", vec![TypeMirror::declared("X")]);

        assert_eq!(not_a_reference.substitute(&bindings), not_a_reference);
    }

    #[test]
    fn test_type_parameter_as_variable_keeps_bound() {
        let parameter = TypeParameter {
            name:  "T".to_string(),
            bound: Some(TypeMirror::declared("com.example.Shape")),
        };
        assert_eq!(
            parameter.as_variable(),
            TypeMirror::variable("T", Some(TypeMirror::declared("com.example.Shape")))
        );
        assert_eq!(parameter.to_string(), "T extends com.example.Shape");
    }
}
