//! Plan emission.
//!
//! Pure serialization of the build result: no validation happens here,
//! the validator, graph, and resolver have already done all of it. The
//! emitted plan is what an external provisioning engine consumes.

use crate::graph::DependencyGraph;
use crate::registry::Registry;
use crate::resolve::Resolver;
use serde::{Deserialize, Serialize};
use stackforge_core::{LogicalName, ResolvedAttributes, ResourceKind};

/// One materializable entry of a plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    /// Logical name of the resource
    pub name: LogicalName,
    /// Resource kind
    pub kind: ResourceKind,
    /// Fully resolved attributes
    pub attributes: ResolvedAttributes,
    /// Names this entry depends on; always earlier in the plan
    pub depends_on: Vec<LogicalName>,
}

/// An ordered, resolved resource set ready for materialization
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Entries in dependency order
    pub resources: Vec<PlanEntry>,
}

impl Plan {
    /// Number of entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.resources.len()
    }

    /// Whether the plan has no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// Find an entry by logical name
    #[must_use]
    pub fn get(&self, name: &LogicalName) -> Option<&PlanEntry> {
        self.resources.iter().find(|entry| &entry.name == name)
    }

    /// Position of an entry in the plan
    #[must_use]
    pub fn position(&self, name: &LogicalName) -> Option<usize> {
        self.resources.iter().position(|entry| &entry.name == name)
    }

    /// Render as pretty-printed JSON
    ///
    /// # Errors
    ///
    /// Returns the underlying serialization error; resolved values are
    /// plain JSON shapes, so this only fails on I/O-level conditions.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Assemble a plan from an order, a registry, and a finished resolver
///
/// Every name in `order` must be declared and resolved already; the
/// compiler guarantees both before calling.
#[must_use]
pub fn emit(
    order: &[LogicalName],
    registry: &Registry,
    resolver: &Resolver<'_>,
    graph: &DependencyGraph,
) -> Plan {
    let resources = order
        .iter()
        .filter_map(|name| {
            let resource = registry.get(name).ok()?;
            let attributes = resolver.resolved(name)?.clone();
            Some(PlanEntry {
                name: name.clone(),
                kind: resource.kind,
                attributes,
                depends_on: graph
                    .dependencies_of(name)
                    .into_iter()
                    .cloned()
                    .collect(),
            })
        })
        .collect();

    Plan { resources }
}
