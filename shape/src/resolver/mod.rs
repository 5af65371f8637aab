//! Type-to-JSON-shape resolution
//!
//! [`ShapeResolver`] walks a [`TypeMirror`] and produces the [`Shape`] its values take once
//! serialized. Unresolvable types degrade to [`Shape::Object`]; the only error is the depth
//! guard, which turns runaway recursion through self-referential containers into
//! [`Error::RecursionLimitExceeded`].
//!
//! Resolution of a declared type runs in this order:
//! 1. cycle check against the identities already being resolved (containers exempt)
//! 2. overrides: type hint, then custom serializer, then explicit `as` target, each replacing
//!    the previous one
//! 3. adapter, always resolved and recorded
//! 4. structure, when no override set a shape: map, then collection/stream element, then the
//!    known-type and type-definition lookups
//! 5. the adapting shape, under [`AdapterPolicy::UseAdaptingShape`] and only when nothing above
//!    produced a shape
//! 6. `Object` fallback

mod context;

use error_stack::Report;
use serde::Serialize;
use tracing::{debug, trace, warn};

pub use context::{Position, RecursionDepth, ResolutionContext, ResolutionState, StackFrame};

use crate::config::{AdapterPolicy, ResolverConfig};
use crate::environment::TypeEnvironment;
use crate::error::{Error, Result};
use crate::registry::TypeRegistry;
use crate::shape::Shape;
use crate::type_mirror::{DeclaredType, PrimitiveKind, TypeMirror, TypeName};

/// An adapter resolved while resolving a declared type
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AdapterRegistration {
    /// The adapted declaration
    pub adapted:       TypeName,
    /// The type the adapter presents to the serializer
    pub adapting_type: TypeMirror,
    /// Shape of the adapting type
    pub shape:         Shape,
}

/// A resolved shape together with the adapters resolved on the way
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// The resolved shape
    pub shape:    Shape,
    /// Adapters resolved during the call, in resolution order
    pub adapters: Vec<AdapterRegistration>,
}

/// Wrap `shape` in `Array` when `position` is an array or collection element
fn wrap(shape: Shape, position: Position) -> Shape {
    if position.wraps() {
        Shape::Array(Box::new(shape))
    } else {
        shape
    }
}

/// Resolves JSON shapes against a [`TypeEnvironment`]
#[derive(Debug)]
pub struct ShapeResolver<'e, E: ?Sized> {
    environment: &'e E,
    config:      ResolverConfig,
}

impl<'e> ShapeResolver<'e, TypeRegistry> {
    /// Create a resolver with the settings loaded into `registry`
    #[must_use]
    pub fn for_registry(registry: &'e TypeRegistry) -> Self {
        Self {
            environment: registry,
            config:      registry.config().clone(),
        }
    }
}

impl<'e, E: TypeEnvironment + ?Sized> ShapeResolver<'e, E> {
    /// Create a resolver with default settings
    ///
    /// Settings carried by the environment are not consulted; see
    /// [`ShapeResolver::for_registry`].
    #[must_use]
    pub fn new(environment: &'e E) -> Self {
        Self {
            environment,
            config: ResolverConfig::default(),
        }
    }

    /// Create a resolver with explicit settings
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when `config` fails validation.
    pub fn with_config(environment: &'e E, config: ResolverConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            environment,
            config,
        })
    }

    /// Settings in use
    #[must_use]
    pub const fn config(&self) -> &ResolverConfig {
        &self.config
    }

    /// Resolve the shape of `type_mirror` from a fresh context
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecursionLimitExceeded`] when resolution goes deeper than the configured
    /// `max_depth`.
    pub fn resolve_shape(&self, type_mirror: &TypeMirror) -> Result<Shape> {
        let mut state = ResolutionState::new();
        self.resolve(type_mirror, &mut ResolutionContext::new(&mut state))
    }

    /// Resolve from a fresh context and report the adapters resolved on the way
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecursionLimitExceeded`] when resolution goes deeper than the configured
    /// `max_depth`.
    pub fn resolve_with_report(&self, type_mirror: &TypeMirror) -> Result<Resolution> {
        let mut state = ResolutionState::new();
        let shape = self.resolve(type_mirror, &mut ResolutionContext::new(&mut state))?;
        Ok(Resolution {
            shape,
            adapters: state.into_adapters(),
        })
    }

    /// Resolve `type_mirror` at the position described by `context`
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecursionLimitExceeded`] when `context` or any context derived from it is
    /// deeper than the configured `max_depth`.
    pub fn resolve(
        &self,
        type_mirror: &TypeMirror,
        context: &mut ResolutionContext<'_>,
    ) -> Result<Shape> {
        let depth = context.depth();
        if depth.exceeds(self.config.max_depth) {
            warn!(
                type_name = %type_mirror,
                depth = depth.get(),
                "Resolution depth limit exceeded"
            );
            return Err(Report::new(Error::recursion_limit(
                type_mirror.to_string(),
                depth.get(),
            )));
        }

        trace!(type_name = %type_mirror, position = ?context.position(), "Resolving");

        match type_mirror {
            TypeMirror::Primitive(kind) => Ok(Self::resolve_primitive(*kind, context)),
            TypeMirror::Declared(declared) => self.resolve_declared(declared, context),
            TypeMirror::Array(component) => {
                let element = self.resolve(component, &mut context.array_element())?;
                Ok(wrap(element, context.position()))
            }
            TypeMirror::TypeVariable { upper_bound, .. } => {
                self.resolve_bound(upper_bound.as_deref(), context)
            }
            TypeMirror::Wildcard { extends_bound } => {
                self.resolve_bound(extends_bound.as_deref(), context)
            }
            TypeMirror::Other(_) => Ok(Shape::Object),
        }
    }

    fn resolve_primitive(kind: PrimitiveKind, context: &ResolutionContext<'_>) -> Shape {
        // byte[] serializes as a base64 string
        if context.in_array() && kind == PrimitiveKind::Byte {
            return Shape::STRING;
        }
        wrap(Shape::Primitive(kind.into()), context.position())
    }

    /// Type variables and wildcards resolve through their upper bound
    fn resolve_bound(
        &self,
        bound: Option<&TypeMirror>,
        context: &mut ResolutionContext<'_>,
    ) -> Result<Shape> {
        let shape = match bound {
            Some(bound) => self.resolve(bound, &mut context.value())?,
            None => Shape::Object,
        };
        Ok(wrap(shape, context.position()))
    }

    fn resolve_declared(
        &self,
        declared: &DeclaredType,
        context: &mut ResolutionContext<'_>,
    ) -> Result<Shape> {
        let environment = self.environment;
        let position = context.position();
        let identity = declared.identity();

        if context.is_resolving(&identity) && !environment.is_collection_or_stream(declared) {
            debug!("{identity} is already being resolved, breaking the cycle with object");
            return Ok(wrap(Shape::Object, position));
        }

        let mut frame = context.enter(identity);
        let mut shape = None;

        if let Some(hint) = environment.type_hint(declared) {
            debug!("{declared} has type hint {hint}");
            shape = Some(self.resolve(&hint, &mut frame.value())?);
        }

        if let Some(serializer) = environment.custom_serializer(declared) {
            debug!("{declared} uses custom serializer {serializer}, shape is opaque");
            shape = Some(Shape::Object);
        }

        if let Some(target) = environment.serialize_as(declared) {
            debug!("{declared} serializes as {target}");
            shape = Some(self.resolve(&target, &mut frame.value())?);
        }

        let mut adapted = None;
        if let Some(adapter) = environment.adapter(declared) {
            let adapting_shape = self.resolve(&adapter.adapting_type, &mut frame.value())?;
            debug!(
                "{declared} is adapted by {} ({adapting_shape})",
                adapter.adapting_type
            );
            if self.config.adapter_policy == AdapterPolicy::UseAdaptingShape {
                adapted = Some(adapting_shape.clone());
            }
            frame.register_adapter(AdapterRegistration {
                adapted:       declared.name.clone(),
                adapting_type: adapter.adapting_type,
                shape:         adapting_shape,
            });
        }

        if shape.is_none() {
            if let Some(map_type) = environment.map_type(declared) {
                let key = self.resolve(&map_type.key_type, &mut frame.value())?;
                let value = self.resolve(&map_type.value_type, &mut frame.value())?;
                shape = Some(Shape::map(key, value));
            } else if let Some(component) = environment.component_type(declared) {
                // already element-wrapped, so only the outer position wraps again
                let element = self.resolve(&component, &mut frame.collection_element())?;
                return Ok(wrap(element, position));
            } else if environment.element_kind(declared).is_documentable() {
                shape = environment.known_type(declared).or_else(|| {
                    environment
                        .type_definition(declared)
                        .map(Shape::NamedClass)
                });
            }
        }

        if shape.is_none() && adapted.is_some() {
            debug!("{declared} takes the shape of its adapting type");
            shape = adapted;
        }

        Ok(wrap(shape.unwrap_or(Shape::Object), position))
    }
}
