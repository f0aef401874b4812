//! Common types used across the application.

pub mod cost_location;
pub mod id;
pub mod table;

pub use cost_location::CostLocationCode;
pub use id::*;
pub use table::{Cell, Record, Table};
