//! Report assembly.
//!
//! This module ties the pipeline together:
//! - Reference tables to classifier, cost-location plan and report schemas
//! - Ledger enrichment and summaries
//! - Per-report layout, cell expressions, totals and listings

pub mod assembler;
pub mod listing;
pub mod types;


pub use assembler::ReportAssembler;
pub use listing::build_listings;
pub use types::{AssembledReports, Listing, ListingEntry, Report, SchemaTables};
