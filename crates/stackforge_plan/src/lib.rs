//! STACKFORGE Planner
//!
//! Build pipeline that turns a stack's resource declarations into an
//! ordered, fully-resolved deployment plan: declarations land in a
//! [`Registry`], cross-resource references derive a [`DependencyGraph`],
//! the graph is topologically ordered, references are substituted by the
//! [`Resolver`], and the result is emitted as a [`Plan`].

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod compiler;
pub mod emit;
pub mod graph;
pub mod registry;
pub mod resolve;
pub mod validate;

pub use compiler::{BuildOutput, BuildWarning, Compiler};
pub use emit::{emit, Plan, PlanEntry};
pub use graph::DependencyGraph;
pub use registry::{Registry, Resource, ResourceHandle};
pub use resolve::Resolver;
pub use validate::Validator;
