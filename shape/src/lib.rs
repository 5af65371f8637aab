//! JSON shapes for generic, self-referential type graphs
//!
//! This crate answers one question for documentation and schema tooling: given a type, what
//! do its values look like once serialized to JSON? The answer is a [`Shape`]: a primitive, an
//! untyped object, a reference to a documented type definition, an array or a map.
//!
//! # Usage
//!
//! ```
//! use json_shape::{Shape, ShapeResolver, TypeMirror, TypeRegistry};
//!
//! let registry = TypeRegistry::with_builtins();
//! let resolver = ShapeResolver::for_registry(&registry);
//!
//! let names = "java.util.List<java.lang.String>".parse::<TypeMirror>()?;
//! assert_eq!(resolver.resolve_shape(&names)?, Shape::array(Shape::STRING));
//!
//! let bytes = "byte[]".parse::<TypeMirror>()?;
//! assert_eq!(resolver.resolve_shape(&bytes)?, Shape::STRING);
//! # Ok::<(), error_stack::Report<json_shape::Error>>(())
//! ```
//!
//! # Layout
//!
//! - [`type_mirror`]: the type graph and its textual form
//! - [`ShapeResolver`]: the resolver, driven by any [`TypeEnvironment`]
//! - [`TypeRegistry`]: a `TypeEnvironment` built from JSON declarations
//! - [`describe_type`]: per-property shapes of a registered type

mod catalog;
mod config;
mod constants;
mod environment;
mod error;
mod known_types;
mod registry;
mod resolver;
mod shape;
pub mod type_mirror;

pub use catalog::{PropertyShape, TypeDescription, describe_type};
pub use config::{AdapterPolicy, ResolverConfig};
/// Default depth limit of a [`ResolverConfig`]
pub use constants::MAX_RESOLUTION_DEPTH;
pub use environment::{AdapterType, ElementKind, MapType, SerializerRef, TypeEnvironment};
pub use error::{Error, Result};
pub use registry::{ContainerDeclaration, Declaration, TypeRegistry};
pub use resolver::{
    AdapterRegistration, Position, RecursionDepth, Resolution, ResolutionContext,
    ResolutionState, ShapeResolver, StackFrame,
};
pub use shape::{DefinitionKind, JsonPrimitive, Shape, TypeDefinitionRef};
pub use type_mirror::{DeclaredType, TypeMirror, TypeName};
