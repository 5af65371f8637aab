use thiserror::Error;

// Error message prefixes
const MSG_FAILED_TO_PREFIX: &str = "Failed to";
const MSG_INVALID_PREFIX: &str = "Invalid";

/// Result type for the `json_shape` library
pub type Result<T> = std::result::Result<T, error_stack::Report<Error>>;

/// Error categories reported by the library
///
/// Unresolvable types are never errors: they degrade to the `Object` shape. These variants
/// cover the conditions the caller must hear about instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Reading a file from disk failed
    #[error("File operation failed: {0}")]
    FileOperation(String),

    /// A caller-supplied value was rejected
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Resolution descended deeper than the configured limit
    #[error("Recursion limit of {depth} exceeded while resolving {type_name}")]
    RecursionLimitExceeded {
        /// Type being resolved when the limit was hit
        type_name: String,
        /// Depth at which resolution stopped
        depth:     usize,
    },

    /// A registry document could not be loaded
    #[error("Registry load failed: {0}")]
    RegistryLoad(String),

    /// A type expression could not be parsed
    #[error("Type parse error: {0}")]
    TypeParse(String),

    /// A type was requested that the registry does not declare
    #[error("Type not registered: {type_name}")]
    TypeNotRegistered {
        /// Qualified name that was looked up
        type_name: String,
    },
}

impl Error {
    /// Create a "Failed to X" file error
    #[must_use]
    pub fn failed_to(action: &str, details: impl std::fmt::Display) -> Self {
        Self::FileOperation(format!("{MSG_FAILED_TO_PREFIX} {action}: {details}"))
    }

    /// Create an "Invalid X" error
    #[must_use]
    pub fn invalid(what: &str, details: impl std::fmt::Display) -> Self {
        Self::InvalidArgument(format!("{MSG_INVALID_PREFIX} {what}: {details}"))
    }

    /// Create error for registry documents that fail to load
    #[must_use]
    pub fn registry_load_failed(source_name: &str, reason: impl std::fmt::Display) -> Self {
        Self::RegistryLoad(format!(
            "{MSG_FAILED_TO_PREFIX} load registry from {source_name}: {reason}"
        ))
    }

    /// Create error for exceeded recursion limits
    #[must_use]
    pub fn recursion_limit(type_name: impl Into<String>, depth: usize) -> Self {
        Self::RecursionLimitExceeded {
            type_name: type_name.into(),
            depth,
        }
    }

    /// Create error for unregistered types
    #[must_use]
    pub fn not_registered(type_name: impl Into<String>) -> Self {
        Self::TypeNotRegistered {
            type_name: type_name.into(),
        }
    }
}
