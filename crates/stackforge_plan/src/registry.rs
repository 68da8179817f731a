//! Declaration registry.
//!
//! The registry holds every resource declared by a stack definition
//! program, keyed by logical name in declaration order. It is populated
//! once during the linear declaration phase and read-only afterwards;
//! declaration order is what breaks ties in the topological order, so the
//! backing map must preserve insertion order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use stackforge_core::{Attributes, BuildError, BuildResult, LogicalName, Reference, ResourceKind};

/// A declared resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Logical name, unique within the stack
    pub name: LogicalName,
    /// Resource kind
    pub kind: ResourceKind,
    /// Declared attributes, possibly containing references
    pub attributes: Attributes,
}

/// Handle returned by a successful declaration
///
/// The handle is how a stack definition mints references to the resource
/// it just declared, without holding a borrow of the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceHandle {
    name: LogicalName,
}

impl ResourceHandle {
    /// Logical name of the declared resource
    #[must_use]
    pub fn name(&self) -> &LogicalName {
        &self.name
    }

    /// Mint a reference to one of this resource's attributes
    #[must_use]
    pub fn attr(&self, attribute: impl Into<String>) -> Reference {
        Reference::new(self.name.clone(), attribute)
    }
}

/// Registry of declared resources, in declaration order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Registry {
    resources: IndexMap<LogicalName, Resource>,
}

impl Registry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a resource
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::DuplicateName`] if the logical name is
    /// already declared.
    pub fn declare(
        &mut self,
        name: impl Into<LogicalName>,
        kind: ResourceKind,
        attributes: Attributes,
    ) -> BuildResult<ResourceHandle> {
        let name = name.into();
        if self.resources.contains_key(&name) {
            return Err(BuildError::DuplicateName { name });
        }

        self.resources.insert(
            name.clone(),
            Resource {
                name: name.clone(),
                kind,
                attributes,
            },
        );
        Ok(ResourceHandle { name })
    }

    /// Look up a declared resource
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::UnknownResource`] if the name was never
    /// declared.
    pub fn get(&self, name: &LogicalName) -> BuildResult<&Resource> {
        self.resources
            .get(name)
            .ok_or_else(|| BuildError::UnknownResource { name: name.clone() })
    }

    /// Whether a name is declared
    #[must_use]
    pub fn contains(&self, name: &LogicalName) -> bool {
        self.resources.contains_key(name)
    }

    /// Declaration index of a name, if declared
    #[must_use]
    pub fn index_of(&self, name: &LogicalName) -> Option<usize> {
        self.resources.get_index_of(name)
    }

    /// Iterate resources in declaration order
    pub fn iter(&self) -> impl Iterator<Item = &Resource> {
        self.resources.values()
    }

    /// Iterate logical names in declaration order
    pub fn names(&self) -> impl Iterator<Item = &LogicalName> {
        self.resources.keys()
    }

    /// Number of declared resources
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether no resources are declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}
