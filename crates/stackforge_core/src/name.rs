//! Logical names for declared resources.
//!
//! A logical name identifies a resource within one stack. Uniqueness is
//! enforced by the registry at declaration time, not here.

use serde::{Deserialize, Serialize};

/// Logical name of a declared resource, unique within a stack
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogicalName(String);

impl LogicalName {
    /// Create a new logical name
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get as string slice
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for LogicalName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for LogicalName {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for LogicalName {
    fn from(name: String) -> Self {
        Self(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_display() {
        let name = LogicalName::new("app-vpc");
        assert_eq!(format!("{}", name), "app-vpc");
        assert_eq!(name.as_str(), "app-vpc");
    }

    #[test]
    fn test_name_equality() {
        assert_eq!(LogicalName::from("alb"), LogicalName::new("alb"));
        assert_ne!(LogicalName::from("alb"), LogicalName::from("nlb"));
    }

    #[test]
    fn test_name_ordering_is_lexicographic() {
        let mut names = vec![LogicalName::from("b"), LogicalName::from("a")];
        names.sort();
        assert_eq!(names[0].as_str(), "a");
    }
}
