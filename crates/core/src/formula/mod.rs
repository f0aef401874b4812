//! Cell aggregation.
//!
//! This module turns a compiled report and its layout into one expression per
//! row × slot cell, and gives two readings of those expressions:
//! - Numeric evaluation against the report's bookings
//! - Spreadsheet formulas over a per-report bookings sheet

pub mod evaluate;
pub mod expression;
pub mod render;
pub mod synthesizer;

pub use evaluate::{CellValues, bookings_sum, evaluate};
pub use expression::{BookingTerm, BookingsSum, ChildSum, ChildTerm, Expression, Sign, SumMode};
pub use render::{
    CellContent, FormulaRenderer, bookings_sheet_name, bookings_table, default_bookings_headers,
};
pub use synthesizer::FormulaSynthesizer;
