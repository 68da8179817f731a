//! Container registry stack: a single image repository.

use indexmap::IndexMap;
use stackforge_core::{AttrValue, BuildResult, ResourceKind};
use stackforge_plan::Registry;

/// Declare the repository stack
///
/// # Errors
///
/// Returns an error only if a declaration fails, which cannot happen for
/// this fixed declaration set.
pub fn declare() -> BuildResult<Registry> {
    let mut registry = Registry::new();

    registry.declare(
        "apm-sample",
        ResourceKind::Repository,
        IndexMap::from([
            ("repository-name".to_string(), AttrValue::from("apm-test")),
            // Mutable tags so the demo can push :latest repeatedly
            ("tag-mutability".to_string(), AttrValue::from("mutable")),
            ("lifecycle-max-images".to_string(), AttrValue::from(3)),
        ]),
    )?;

    Ok(registry)
}
