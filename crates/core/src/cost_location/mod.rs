//! Cost-location plan.
//!
//! The plan encodes cost locations as digit strings. Items carry a full
//! number; groups carry a digit prefix that covers a numeric range. Groups
//! contain every node whose range they enclose, so one item may roll up into
//! several overlapping groups: the result is a containment DAG, not a tree.

pub mod hierarchy;
pub mod types;

#[cfg(test)]
mod hierarchy_props;

pub use hierarchy::{CostLocationHierarchy, CostLocationMatch};
pub use types::{CostLocationNode, Limits, NodeKind, PlanType};
