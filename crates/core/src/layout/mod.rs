//! Report grid layout.
//!
//! Assigns every row a sheet row number and every slot a band of columns,
//! and answers which grid cell holds a given row × slot value.

pub mod engine;
pub mod types;

#[cfg(test)]
mod engine_props;

pub use engine::LayoutEngine;
pub use types::{GridRef, Layout, SlotBand, column_letter};
