//! STACKFORGE Core Types
//!
//! This crate contains pure types with no I/O: logical names, resource
//! kinds, attribute values, and the build error taxonomy. All types are
//! serializable with stable, cross-platform encoding.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod kind;
pub mod name;
pub mod value;

// Re-exports
pub use error::{BuildError, BuildResult};
pub use kind::ResourceKind;
pub use name::LogicalName;
pub use value::{AttrValue, Attributes, Reference, ResolvedAttributes, ResolvedValue};
