//! Pre-resolution reference validation.
//!
//! Runs before the graph is derived: every reference must point at a
//! declared resource and at an attribute that resource actually carries.
//! Failing here keeps the later passes free of dangling-name handling.

use crate::registry::{Registry, Resource};
use stackforge_core::{BuildError, BuildResult, Reference};

/// Validator for a populated registry
pub struct Validator<'a> {
    registry: &'a Registry,
}

impl<'a> Validator<'a> {
    /// Create a validator over a registry
    #[must_use]
    pub fn new(registry: &'a Registry) -> Self {
        Self { registry }
    }

    /// Check every reference in every declared resource
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::UnresolvedReference`] for the first
    /// reference whose target resource or attribute is not declared.
    pub fn check(&self) -> BuildResult<()> {
        for resource in self.registry.iter() {
            self.check_resource(resource)?;
        }
        Ok(())
    }

    fn check_resource(&self, resource: &Resource) -> BuildResult<()> {
        let mut dangling: Option<Reference> = None;
        for value in resource.attributes.values() {
            value.for_each_reference(&mut |reference| {
                if dangling.is_none() && !self.target_exists(reference) {
                    dangling = Some(reference.clone());
                }
            });
        }

        match dangling {
            Some(reference) => Err(BuildError::UnresolvedReference {
                source_name: resource.name.clone(),
                target: reference.to_string(),
            }),
            None => Ok(()),
        }
    }

    fn target_exists(&self, reference: &Reference) -> bool {
        self.registry
            .get(&reference.resource)
            .map(|target| target.attributes.contains_key(&reference.attribute))
            .unwrap_or(false)
    }
}
