//! Documentation view of registered types
//!
//! Each property is resolved from its own fresh context, the way a documentation pass resolves
//! one property at a time.

use std::collections::HashMap;

use serde::Serialize;
use tracing::debug;

use crate::environment::ElementKind;
use crate::error::Result;
use crate::registry::TypeRegistry;
use crate::resolver::ShapeResolver;
use crate::shape::Shape;
use crate::type_mirror::{TypeMirror, TypeName};

/// Shape of one documented property
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertyShape {
    /// Property name
    pub name:          String,
    /// Declared type, with the owner's type parameters left unbound
    #[serde(rename = "type")]
    pub property_type: TypeMirror,
    /// Resolved shape
    pub shape:         Shape,
}

/// Shape of a registered type and of each of its properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDescription {
    /// Qualified name
    pub name:       TypeName,
    /// Kind of declaration
    pub kind:       ElementKind,
    /// Shape of the raw type
    pub shape:      Shape,
    /// Properties in name order
    pub properties: Vec<PropertyShape>,
}

/// Describe the registered type `name` with the registry's resolver settings
///
/// # Errors
///
/// Returns [`crate::Error::TypeNotRegistered`] for an unknown name, and any resolution error
/// from the type or one of its properties.
pub fn describe_type(registry: &TypeRegistry, name: &TypeName) -> Result<TypeDescription> {
    let declaration = registry.require(name)?;
    let resolver = ShapeResolver::for_registry(registry);
    let shape = resolver.resolve_shape(&TypeMirror::Declared(registry.declared_type(name)?))?;

    // raw bindings: parameters resolve through their bounds
    let bindings: HashMap<String, TypeMirror> = declaration
        .type_parameters
        .iter()
        .map(|parameter| (parameter.name.clone(), parameter.as_variable()))
        .collect();

    let properties = declaration
        .properties
        .iter()
        .map(|(property, property_type)| {
            let shape = resolver.resolve_shape(&property_type.substitute(&bindings))?;
            debug!("{name}.{property} resolves to {shape}");
            Ok(PropertyShape {
                name: property.clone(),
                property_type: property_type.clone(),
                shape,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(TypeDescription {
        name: name.clone(),
        kind: declaration.kind,
        shape,
        properties,
    })
}
