use thiserror::Error;

/// Result type for the json-shape binary
pub type Result<T> = std::result::Result<T, error_stack::Report<Error>>;

/// Failures reported by a command, with the library error attached as the report's cause
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The registry document could not be loaded
    #[error("Failed to load registry")]
    Registry,

    /// Command-line settings were rejected
    #[error("Invalid resolver settings")]
    Settings,

    /// A type expression could not be resolved
    #[error("Failed to resolve '{0}'")]
    Resolve(String),

    /// A registered type could not be described
    #[error("Failed to describe '{0}'")]
    Describe(String),

    /// Output could not be rendered
    #[error("Failed to render output")]
    Output,
}
