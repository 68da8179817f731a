//! STACKFORGE Sample Stacks
//!
//! Built-in stack definition programs: each one populates a fresh
//! registry with declarations for one deployable stack. These are the
//! input surface of the planner; the compiler turns them into plans.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod application_signals;
pub mod catalog;
pub mod ecr;

pub use catalog::{available, build};
