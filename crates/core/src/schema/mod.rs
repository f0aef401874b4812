//! Report schema compilation.
//!
//! A report schema is a spreadsheet table: `Section <n>` columns form a
//! breadcrumb, `Name`/`Type` describe the row, `Cost Location` lists a leaf's
//! cost locations and every `s:<slot>` column holds one aggregation literal
//! per row. Compilation turns it into a [`ReportDefinition`]:
//! - Typed column classification
//! - Slot-literal grammar
//! - Row tree with the strict depth+1/prefix parent rule
//! - Reports overview and time-slot templates

pub mod catalog;
pub mod columns;
pub mod compiler;
pub mod literal;
pub mod types;


pub use catalog::{parse_reports_overview, parse_time_slots};
pub use columns::{SchemaColumn, SchemaColumns};
pub use compiler::ReportSchemaCompiler;
pub use literal::{LiteralError, parse_literal};
pub use types::*;
