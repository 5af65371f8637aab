//! A newtype wrapper for qualified type names used throughout the system

use serde::{Deserialize, Serialize};

/// A newtype wrapper for qualified type names used as `HashMap` keys
///
/// This type provides documentation and type safety for strings that represent
/// fully-qualified type names (e.g., "`com.example.model.Order`").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Default, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TypeName(String);

impl TypeName {
    /// Get the underlying string reference
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the short name (last segment after `.`)
    /// For example: `com.example.model.Order` returns `Order`
    /// Nested classes keep their `$` separator: `com.example.Outer$Inner` returns `Outer$Inner`
    #[must_use]
    pub fn short_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Get the package portion, if the name is qualified
    #[must_use]
    pub fn package(&self) -> Option<&str> {
        self.0.rfind('.').map(|pos| &self.0[..pos])
    }

    /// Whether the name has at least one package segment
    #[must_use]
    pub fn is_qualified(&self) -> bool {
        self.0.contains('.')
    }
}

impl From<&str> for TypeName {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for TypeName {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&String> for TypeName {
    fn from(s: &String) -> Self {
        Self(s.clone())
    }
}

impl From<TypeName> for String {
    fn from(type_name: TypeName) -> Self {
        type_name.0
    }
}

impl std::fmt::Display for TypeName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
