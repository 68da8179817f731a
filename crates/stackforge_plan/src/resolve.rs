//! Attribute resolution.
//!
//! Substitutes every reference with the referenced resource's resolved
//! value. Resolution is memoized per resource: resolving a resource first
//! resolves everything it references, so a reference chain (a reference
//! to an attribute that is itself a reference) always bottoms out at a
//! literal. The compiler runs resolution in topological order, which
//! makes each lookup a memo hit; a cycle reached through direct use of
//! the resolver is still reported rather than recursed into.

use crate::registry::Registry;
use indexmap::{IndexMap, IndexSet};
use stackforge_core::{
    AttrValue, BuildError, BuildResult, LogicalName, Reference, ResolvedAttributes, ResolvedValue,
};

/// Resolver over a populated registry
pub struct Resolver<'a> {
    registry: &'a Registry,
    resolved: IndexMap<LogicalName, ResolvedAttributes>,
    in_flight: IndexSet<LogicalName>,
}

impl<'a> Resolver<'a> {
    /// Create a resolver over a registry
    #[must_use]
    pub fn new(registry: &'a Registry) -> Self {
        Self {
            registry,
            resolved: IndexMap::new(),
            in_flight: IndexSet::new(),
        }
    }

    /// Resolve a resource's attributes, resolving its dependencies first
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::UnknownResource`] if the name is not
    /// declared, [`BuildError::UnresolvedReference`] if a reference
    /// targets a missing resource or attribute, and
    /// [`BuildError::CycleDetected`] if the reference chain loops.
    pub fn resolve(&mut self, name: &LogicalName) -> BuildResult<&ResolvedAttributes> {
        if !self.resolved.contains_key(name) {
            if let Some(start) = self.in_flight.get_index_of(name) {
                let members = self.in_flight.iter().skip(start).cloned().collect();
                return Err(BuildError::CycleDetected { members });
            }

            let resource = self.registry.get(name)?;
            let source = resource.name.clone();
            self.in_flight.insert(name.clone());

            let mut attributes = ResolvedAttributes::new();
            for (key, value) in &resource.attributes {
                let resolved = self.resolve_value(&source, value)?;
                attributes.insert(key.clone(), resolved);
            }

            self.in_flight.pop();
            self.resolved.insert(name.clone(), attributes);
        }

        Ok(&self.resolved[name])
    }

    /// Attributes already resolved for a resource, if any
    #[must_use]
    pub fn resolved(&self, name: &LogicalName) -> Option<&ResolvedAttributes> {
        self.resolved.get(name)
    }

    fn resolve_value(
        &mut self,
        source: &LogicalName,
        value: &AttrValue,
    ) -> BuildResult<ResolvedValue> {
        match value {
            AttrValue::Str(s) => Ok(ResolvedValue::Str(s.clone())),
            AttrValue::Int(i) => Ok(ResolvedValue::Int(*i)),
            AttrValue::Bool(b) => Ok(ResolvedValue::Bool(*b)),
            AttrValue::List(items) => items
                .iter()
                .map(|item| self.resolve_value(source, item))
                .collect::<BuildResult<Vec<_>>>()
                .map(ResolvedValue::List),
            AttrValue::Map(entries) => {
                let mut resolved = IndexMap::new();
                for (key, entry) in entries {
                    resolved.insert(key.clone(), self.resolve_value(source, entry)?);
                }
                Ok(ResolvedValue::Map(resolved))
            }
            AttrValue::Ref(reference) => self.resolve_reference(source, reference),
        }
    }

    fn resolve_reference(
        &mut self,
        source: &LogicalName,
        reference: &Reference,
    ) -> BuildResult<ResolvedValue> {
        let dangling = || BuildError::UnresolvedReference {
            source_name: source.clone(),
            target: reference.to_string(),
        };

        if !self.registry.contains(&reference.resource) {
            return Err(dangling());
        }

        let target = self.resolve(&reference.resource)?;
        target.get(&reference.attribute).cloned().ok_or_else(dangling)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use stackforge_core::ResourceKind;

    fn registry_with(resources: &[(&str, &[(&str, AttrValue)])]) -> Registry {
        let mut registry = Registry::new();
        for (name, attrs) in resources {
            let attributes = attrs
                .iter()
                .map(|(k, v)| ((*k).to_string(), v.clone()))
                .collect();
            registry
                .declare(*name, ResourceKind::Network, attributes)
                .unwrap();
        }
        registry
    }

    #[test]
    fn test_resolve_literal_attributes() {
        let registry = registry_with(&[(
            "app-vpc",
            &[("cidr", AttrValue::from("10.100.0.0/16"))],
        )]);

        let mut resolver = Resolver::new(&registry);
        let attrs = resolver.resolve(&LogicalName::from("app-vpc")).unwrap();
        assert_eq!(attrs.get("cidr"), Some(&ResolvedValue::from("10.100.0.0/16")));
    }

    #[test]
    fn test_resolve_substitutes_reference() {
        let registry = registry_with(&[
            ("app-vpc", &[("cidr", AttrValue::from("10.100.0.0/16"))]),
            ("rule", &[("source", AttrValue::reference("app-vpc", "cidr"))]),
        ]);

        let mut resolver = Resolver::new(&registry);
        let attrs = resolver.resolve(&LogicalName::from("rule")).unwrap();
        assert_eq!(
            attrs.get("source"),
            Some(&ResolvedValue::from("10.100.0.0/16"))
        );
    }

    #[test]
    fn test_resolve_reference_chain_to_literal() {
        // c -> b -> a, where b's attribute is itself a reference
        let registry = registry_with(&[
            ("a", &[("v", AttrValue::from("literal"))]),
            ("b", &[("v", AttrValue::reference("a", "v"))]),
            ("c", &[("v", AttrValue::reference("b", "v"))]),
        ]);

        let mut resolver = Resolver::new(&registry);
        let attrs = resolver.resolve(&LogicalName::from("c")).unwrap();
        assert_eq!(attrs.get("v"), Some(&ResolvedValue::from("literal")));
    }

    #[test]
    fn test_resolve_reference_inside_map_and_list() {
        let registry = registry_with(&[
            ("logs", &[("name", AttrValue::from("app-service-logs"))]),
            (
                "container",
                &[(
                    "logging",
                    AttrValue::Map(IndexMap::from([
                        ("driver".to_string(), AttrValue::from("awslogs")),
                        (
                            "groups".to_string(),
                            AttrValue::List(vec![AttrValue::reference("logs", "name")]),
                        ),
                    ])),
                )],
            ),
        ]);

        let mut resolver = Resolver::new(&registry);
        let attrs = resolver.resolve(&LogicalName::from("container")).unwrap();
        let logging = attrs.get("logging").unwrap();
        match logging {
            ResolvedValue::Map(entries) => {
                assert_eq!(
                    entries.get("groups"),
                    Some(&ResolvedValue::List(vec![ResolvedValue::from(
                        "app-service-logs"
                    )]))
                );
            }
            other => panic!("expected map, got {other:?}"),
        }
    }

    #[test]
    fn test_resolve_dangling_resource() {
        let registry = registry_with(&[(
            "rule",
            &[("source", AttrValue::reference("ghost", "cidr"))],
        )]);

        let mut resolver = Resolver::new(&registry);
        let err = resolver.resolve(&LogicalName::from("rule")).unwrap_err();
        assert_eq!(
            err,
            BuildError::UnresolvedReference {
                source_name: LogicalName::from("rule"),
                target: "ghost.cidr".to_string(),
            }
        );
    }

    #[test]
    fn test_resolve_dangling_attribute() {
        let registry = registry_with(&[
            ("app-vpc", &[("cidr", AttrValue::from("10.100.0.0/16"))]),
            ("rule", &[("source", AttrValue::reference("app-vpc", "nope"))]),
        ]);

        let mut resolver = Resolver::new(&registry);
        let err = resolver.resolve(&LogicalName::from("rule")).unwrap_err();
        assert!(matches!(err, BuildError::UnresolvedReference { .. }));
    }

    #[test]
    fn test_resolve_unknown_resource() {
        let registry = Registry::new();
        let mut resolver = Resolver::new(&registry);
        let err = resolver.resolve(&LogicalName::from("missing")).unwrap_err();
        assert_eq!(
            err,
            BuildError::UnknownResource {
                name: LogicalName::from("missing")
            }
        );
    }

    #[test]
    fn test_resolve_reference_cycle_is_reported() {
        let registry = registry_with(&[
            ("a", &[("v", AttrValue::reference("b", "v"))]),
            ("b", &[("v", AttrValue::reference("a", "v"))]),
        ]);

        let mut resolver = Resolver::new(&registry);
        let err = resolver.resolve(&LogicalName::from("a")).unwrap_err();
        assert!(matches!(err, BuildError::CycleDetected { .. }));
    }
}
