//! Resolver configuration
//!
//! Settings come from three places, lowest precedence first: the defaults below, the
//! `resolver` section of a registry document, and whatever the host applies on top through
//! `TypeRegistry::set_config` (the CLI's flags, for instance). `ShapeResolver::for_registry`
//! resolves with the registry's settings.

use error_stack::Report;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

use crate::constants::MAX_RESOLUTION_DEPTH;
use crate::error::{Error, Result};

/// What an adapter on a declared type does to its resolved shape
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Display,
    AsRefStr,
    EnumString,
    Serialize,
    Deserialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum AdapterPolicy {
    /// Resolve and record the adapting type, leave the shape to the other rules
    #[default]
    SideEffectOnly,
    /// Use the adapting type's shape when neither an override nor the type's structure
    /// produces one
    UseAdaptingShape,
}

/// Settings for a `ShapeResolver`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ResolverConfig {
    /// Deepest sub-context the resolver will enter before reporting an error
    pub max_depth:      usize,
    /// How adapters affect the resolved shape
    pub adapter_policy: AdapterPolicy,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            max_depth:      MAX_RESOLUTION_DEPTH,
            adapter_policy: AdapterPolicy::default(),
        }
    }
}

impl ResolverConfig {
    /// Replace the depth limit
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Replace the adapter policy
    #[must_use]
    pub const fn with_adapter_policy(mut self, adapter_policy: AdapterPolicy) -> Self {
        self.adapter_policy = adapter_policy;
        self
    }

    /// Check that the settings can drive a resolver
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when `max_depth` is zero.
    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(Report::new(Error::invalid(
                "max_depth",
                "must be at least 1",
            )));
        }
        Ok(())
    }
}
