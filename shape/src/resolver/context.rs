//! Per-call state threaded through resolution
//!
//! A [`ResolutionState`] is owned by one top-level resolve call. [`ResolutionContext`]s borrow it
//! mutably and are derived for every sub-type the resolver descends into, so the borrow checker
//! keeps a state from ever being shared between two in-flight resolutions.

use std::ops::{Deref, DerefMut};

use tracing::trace;

use super::AdapterRegistration;

/// Where the type being resolved sits relative to its immediate container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    /// Anything that is not the direct element of an array or collection
    #[default]
    Value,
    /// The immediate component type of an array
    ArrayElement,
    /// The immediate element type of a collection-like or stream-like type
    CollectionElement,
}

impl Position {
    /// Whether shapes resolved here are wrapped in `Array`
    #[must_use]
    pub const fn wraps(self) -> bool {
        matches!(self, Self::ArrayElement | Self::CollectionElement)
    }
}

/// How many sub-contexts lie between a context and its top-level call
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct RecursionDepth(usize);

impl RecursionDepth {
    /// Depth of a top-level call
    pub const ZERO: Self = Self(0);

    /// One level deeper
    #[must_use]
    pub const fn increment(self) -> Self {
        Self(self.0 + 1)
    }

    /// Whether this depth is past `limit`
    #[must_use]
    pub const fn exceeds(self, limit: usize) -> bool {
        self.0 > limit
    }

    /// The depth as a number
    #[must_use]
    pub const fn get(self) -> usize {
        self.0
    }
}

/// Mutable state owned by one top-level resolve call
#[derive(Debug, Default)]
pub struct ResolutionState {
    stack:    Vec<String>,
    adapters: Vec<AdapterRegistration>,
}

impl ResolutionState {
    /// Create an empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Identities of the declared types currently being resolved, outermost first
    #[must_use]
    pub fn stack(&self) -> &[String] {
        &self.stack
    }

    /// Adapters resolved so far
    #[must_use]
    pub fn adapters(&self) -> &[AdapterRegistration] {
        &self.adapters
    }

    /// Take the adapters resolved by the call
    #[must_use]
    pub fn into_adapters(self) -> Vec<AdapterRegistration> {
        self.adapters
    }
}

/// Position, depth and shared state for one step of a resolution
#[derive(Debug)]
pub struct ResolutionContext<'s> {
    position: Position,
    depth:    RecursionDepth,
    state:    &'s mut ResolutionState,
}

impl<'s> ResolutionContext<'s> {
    /// Create a top-level context over `state`
    #[must_use]
    pub const fn new(state: &'s mut ResolutionState) -> Self {
        Self {
            position: Position::Value,
            depth: RecursionDepth::ZERO,
            state,
        }
    }

    /// Position of the type being resolved
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Whether this is the immediate component of an array
    #[must_use]
    pub const fn in_array(&self) -> bool {
        matches!(self.position, Position::ArrayElement)
    }

    /// Whether this is the immediate element of a collection
    #[must_use]
    pub const fn in_collection(&self) -> bool {
        matches!(self.position, Position::CollectionElement)
    }

    /// Sub-contexts between this one and the top-level call
    #[must_use]
    pub const fn depth(&self) -> RecursionDepth {
        self.depth
    }

    /// Whether a declared type with `identity` is already being resolved
    #[must_use]
    pub fn is_resolving(&self, identity: &str) -> bool {
        self.state.stack.iter().any(|entry| entry == identity)
    }

    /// Identities currently being resolved
    #[must_use]
    pub fn stack(&self) -> &[String] {
        &self.state.stack
    }

    /// Derive a context one level deeper at `position`
    pub fn derive(&mut self, position: Position) -> ResolutionContext<'_> {
        ResolutionContext {
            position,
            depth: self.depth.increment(),
            state: &mut *self.state,
        }
    }

    /// Derive a neutral sub-context
    pub fn value(&mut self) -> ResolutionContext<'_> {
        self.derive(Position::Value)
    }

    /// Derive the sub-context for an array's component type
    pub fn array_element(&mut self) -> ResolutionContext<'_> {
        self.derive(Position::ArrayElement)
    }

    /// Derive the sub-context for a collection's element type
    pub fn collection_element(&mut self) -> ResolutionContext<'_> {
        self.derive(Position::CollectionElement)
    }

    /// Push `identity` onto the stack until the returned frame is dropped
    pub fn enter(&mut self, identity: String) -> StackFrame<'_, 's> {
        trace!("Entering {identity} at depth {}", self.depth.get());
        self.state.stack.push(identity);
        StackFrame { context: self }
    }

    /// Record an adapter resolved during this call
    pub fn register_adapter(&mut self, registration: AdapterRegistration) {
        self.state.adapters.push(registration);
    }
}

/// Scoped stack entry; the identity is popped when the frame drops, on every exit path
#[derive(Debug)]
pub struct StackFrame<'c, 's> {
    context: &'c mut ResolutionContext<'s>,
}

impl<'s> Deref for StackFrame<'_, 's> {
    type Target = ResolutionContext<'s>;

    fn deref(&self) -> &Self::Target {
        &*self.context
    }
}

impl DerefMut for StackFrame<'_, '_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut *self.context
    }
}

impl Drop for StackFrame<'_, '_> {
    fn drop(&mut self) {
        if let Some(identity) = self.context.state.stack.pop() {
            trace!("Leaving {identity}");
        }
    }
}
