//! Catalog of built-in stacks, keyed by stack name.

use crate::{application_signals, ecr};
use stackforge_core::BuildResult;
use stackforge_plan::Registry;

/// Names of every built-in stack, in catalog order
#[must_use]
pub fn available() -> &'static [&'static str] {
    &["ecr", "application-signals"]
}

/// Build the named stack's registry, or `None` for an unknown name
#[must_use]
pub fn build(name: &str) -> Option<BuildResult<Registry>> {
    match name {
        "ecr" => Some(ecr::declare()),
        "application-signals" => Some(application_signals::declare()),
        _ => None,
    }
}
