//! Attribute values and cross-resource references.
//!
//! An attribute value is either a literal (string, integer, boolean), a
//! container of further values, or a [`Reference`] into another resource's
//! attribute. References are placeholders: the resolver replaces each one
//! with the referenced resource's resolved value before a plan is emitted.
//! [`ResolvedValue`] is the same shape with the reference variant
//! eliminated, so a plan can never carry an unresolved placeholder.

use crate::name::LogicalName;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Attribute map of a declared resource, in declaration order
pub type Attributes = IndexMap<String, AttrValue>;

/// Attribute map after resolution, in declaration order
pub type ResolvedAttributes = IndexMap<String, ResolvedValue>;

/// A reference to an attribute of another declared resource
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Reference {
    /// Logical name of the referenced resource
    pub resource: LogicalName,
    /// Attribute to read from the referenced resource
    pub attribute: String,
}

impl Reference {
    /// Create a new reference
    #[must_use]
    pub fn new(resource: impl Into<LogicalName>, attribute: impl Into<String>) -> Self {
        Self {
            resource: resource.into(),
            attribute: attribute.into(),
        }
    }
}

impl std::fmt::Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.resource, self.attribute)
    }
}

/// An attribute value as declared, possibly containing references
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttrValue {
    /// String literal
    Str(String),
    /// Integer literal
    Int(i64),
    /// Boolean literal
    Bool(bool),
    /// Ordered list of values
    List(Vec<AttrValue>),
    /// Ordered map of values
    Map(IndexMap<String, AttrValue>),
    /// Placeholder for another resource's attribute
    Ref(Reference),
}

impl AttrValue {
    /// Shorthand for a reference value
    #[must_use]
    pub fn reference(resource: impl Into<LogicalName>, attribute: impl Into<String>) -> Self {
        Self::Ref(Reference::new(resource, attribute))
    }

    /// Visit every reference contained in this value, depth-first
    pub fn for_each_reference(&self, visit: &mut impl FnMut(&Reference)) {
        match self {
            Self::Str(_) | Self::Int(_) | Self::Bool(_) => {}
            Self::List(items) => {
                for item in items {
                    item.for_each_reference(visit);
                }
            }
            Self::Map(entries) => {
                for value in entries.values() {
                    value.for_each_reference(visit);
                }
            }
            Self::Ref(reference) => visit(reference),
        }
    }

    /// Whether this value contains no references anywhere
    #[must_use]
    pub fn is_literal(&self) -> bool {
        let mut found = false;
        self.for_each_reference(&mut |_| found = true);
        !found
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<Reference> for AttrValue {
    fn from(reference: Reference) -> Self {
        Self::Ref(reference)
    }
}

impl<T: Into<AttrValue>> From<Vec<T>> for AttrValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

/// An attribute value with every reference substituted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResolvedValue {
    /// String literal
    Str(String),
    /// Integer literal
    Int(i64),
    /// Boolean literal
    Bool(bool),
    /// Ordered list of resolved values
    List(Vec<ResolvedValue>),
    /// Ordered map of resolved values
    Map(IndexMap<String, ResolvedValue>),
}

impl ResolvedValue {
    /// Get as string slice if this is a string literal
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Get as integer if this is an integer literal
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }
}

impl From<&str> for ResolvedValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<i64> for ResolvedValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for ResolvedValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_display() {
        let reference = Reference::new("app-vpc", "cidr");
        assert_eq!(reference.to_string(), "app-vpc.cidr");
    }

    #[test]
    fn test_for_each_reference_nested() {
        let value = AttrValue::Map(IndexMap::from([
            ("port".to_string(), AttrValue::Int(80)),
            (
                "sources".to_string(),
                AttrValue::List(vec![
                    AttrValue::reference("app-vpc", "cidr"),
                    AttrValue::from("0.0.0.0/0"),
                ]),
            ),
        ]));

        let mut seen = Vec::new();
        value.for_each_reference(&mut |r| seen.push(r.clone()));
        assert_eq!(seen, vec![Reference::new("app-vpc", "cidr")]);
    }

    #[test]
    fn test_is_literal() {
        assert!(AttrValue::from("10.100.0.0/16").is_literal());
        assert!(!AttrValue::reference("app-vpc", "cidr").is_literal());
    }

    #[test]
    fn test_resolved_value_untagged_json() {
        let value = ResolvedValue::List(vec![
            ResolvedValue::from("10.100.0.0/16"),
            ResolvedValue::from(80),
        ]);
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, "[\"10.100.0.0/16\",80]");
    }

    #[test]
    fn test_resolved_value_accessors() {
        assert_eq!(ResolvedValue::from("x").as_str(), Some("x"));
        assert_eq!(ResolvedValue::from(3).as_int(), Some(3));
        assert_eq!(ResolvedValue::from(true).as_str(), None);
    }
}
