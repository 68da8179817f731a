//! Build error taxonomy.
//!
//! Every error is fatal to the current build: each one indicates a
//! structurally invalid declaration set, never a transient condition, so
//! nothing is retried and no partial plan is emitted. Every variant names
//! the resource(s) at fault so the offending declaration can be located.

use crate::name::LogicalName;
use thiserror::Error;

/// Result type for plan builds
pub type BuildResult<T> = Result<T, BuildError>;

/// Fatal build error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    /// A logical name was declared twice within one stack
    #[error("duplicate logical name: {name} is already declared")]
    DuplicateName {
        /// The name declared twice
        name: LogicalName,
    },

    /// A lookup for a name that was never declared
    #[error("unknown resource: {name}")]
    UnknownResource {
        /// The name that was looked up
        name: LogicalName,
    },

    /// A reference points at a resource or attribute that does not exist
    #[error("unresolved reference: {source_name} refers to {target}, which is not declared")]
    UnresolvedReference {
        /// Resource whose attributes contain the dangling reference
        source_name: LogicalName,
        /// The dangling `resource.attribute` target
        target: String,
    },

    /// The derived dependency edges contain a cycle
    #[error("dependency cycle detected: {}", format_cycle(.members))]
    CycleDetected {
        /// Every resource participating in the cycle, in walk order
        members: Vec<LogicalName>,
    },
}

fn format_cycle(members: &[LogicalName]) -> String {
    let mut out = String::new();
    for (i, name) in members.iter().enumerate() {
        if i > 0 {
            out.push_str(" -> ");
        }
        out.push_str(name.as_str());
    }
    // Close the loop back to the first member
    if let Some(first) = members.first() {
        out.push_str(" -> ");
        out.push_str(first.as_str());
    }
    out
}
