//! Derived dependency graph and topological ordering.
//!
//! Edges are never declared directly: resource A depends on resource B
//! exactly when A's attributes contain a reference into B. The graph is
//! derived from the registry in one walk and then ordered depth-first,
//! dependencies before dependents. Ties between resources with no
//! ordering constraint fall back to declaration order, so identical
//! input always yields an identical plan.

use crate::registry::Registry;
use indexmap::{IndexMap, IndexSet};
use stackforge_core::{BuildError, BuildResult, LogicalName};

/// Dependency graph over declared resources
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyGraph {
    /// name -> set of names it depends on, both in declaration order
    dependencies: IndexMap<LogicalName, IndexSet<LogicalName>>,
}

impl DependencyGraph {
    /// Derive the graph from a registry's references
    ///
    /// Every declared resource becomes a node, even if isolated.
    /// References to undeclared resources are skipped here; the validator
    /// reports them before the graph is consulted.
    #[must_use]
    pub fn derive(registry: &Registry) -> Self {
        let mut dependencies: IndexMap<LogicalName, IndexSet<LogicalName>> = registry
            .names()
            .map(|name| (name.clone(), IndexSet::new()))
            .collect();

        for resource in registry.iter() {
            for value in resource.attributes.values() {
                value.for_each_reference(&mut |reference| {
                    if registry.contains(&reference.resource) {
                        dependencies[&resource.name].insert(reference.resource.clone());
                    }
                });
            }
        }

        Self { dependencies }
    }

    /// Names a resource depends on, in reference-encounter order
    #[must_use]
    pub fn dependencies_of(&self, name: &LogicalName) -> Vec<&LogicalName> {
        self.dependencies
            .get(name)
            .map(|deps| deps.iter().collect())
            .unwrap_or_default()
    }

    /// Names that depend on the given resource
    #[must_use]
    pub fn dependents_of(&self, name: &LogicalName) -> Vec<&LogicalName> {
        self.dependencies
            .iter()
            .filter(|(_, deps)| deps.contains(name))
            .map(|(dependent, _)| dependent)
            .collect()
    }

    /// Iterate every derived edge as (dependent, dependency)
    pub fn edges(&self) -> impl Iterator<Item = (&LogicalName, &LogicalName)> {
        self.dependencies
            .iter()
            .flat_map(|(from, deps)| deps.iter().map(move |to| (from, to)))
    }

    /// Total edge count
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.dependencies.values().map(IndexSet::len).sum()
    }

    /// Order resources so every dependency precedes its dependents
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::CycleDetected`] naming every cycle member if
    /// the edge set is not acyclic.
    pub fn topological_order(&self) -> BuildResult<Vec<LogicalName>> {
        let mut order = Vec::with_capacity(self.dependencies.len());
        let mut visited = IndexSet::new();
        let mut in_walk = IndexSet::new();

        for name in self.dependencies.keys() {
            self.visit(name, &mut visited, &mut in_walk, &mut order)?;
        }

        Ok(order)
    }

    /// Post-order DFS; `in_walk` is the current recursion path
    fn visit(
        &self,
        name: &LogicalName,
        visited: &mut IndexSet<LogicalName>,
        in_walk: &mut IndexSet<LogicalName>,
        order: &mut Vec<LogicalName>,
    ) -> BuildResult<()> {
        if visited.contains(name) {
            return Ok(());
        }
        if let Some(start) = in_walk.get_index_of(name) {
            // Everything on the walk from the first occurrence is in the cycle
            let members = in_walk.iter().skip(start).cloned().collect();
            return Err(BuildError::CycleDetected { members });
        }

        in_walk.insert(name.clone());

        // Dependency sets are kept in reference-encounter order; walking
        // them by declaration index keeps the tie-break stable
        let mut deps: Vec<&LogicalName> = self.dependencies[name].iter().collect();
        deps.sort_by_key(|dep| self.dependencies.get_index_of(*dep));
        for dep in deps {
            self.visit(dep, visited, in_walk, order)?;
        }

        in_walk.pop();
        visited.insert(name.clone());
        order.push(name.clone());
        Ok(())
    }
}
