//! Core report compilation logic for Saldo.
//!
//! This crate turns a ledger and a set of in-memory spreadsheet tables into
//! budget-vs-actual reports. It has ZERO I/O dependencies: collaborators read
//! the sheets and write the results.
//!
//! # Modules
//!
//! - `accounts` - Chart-of-accounts range classification
//! - `cost_location` - Cost-location plan as a containment DAG
//! - `ledger` - Booking enrichment, totals and summaries
//! - `schema` - Reports overview, time slots and schema compilation
//! - `layout` - Grid rows and slot column bands
//! - `formula` - Cell expressions, evaluation and spreadsheet formulas
//! - `reports` - End-to-end report assembly
//! - `issue` - Recoverable input issues

pub mod accounts;
pub mod cost_location;
pub mod formula;
pub mod issue;
pub mod layout;
pub mod ledger;
pub mod reports;
pub mod schema;

pub use issue::{Issue, IssueCategory, IssueLog};
pub use reports::{AssembledReports, Report, ReportAssembler, SchemaTables};
