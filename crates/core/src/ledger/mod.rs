//! Ledger view of the report run.
//!
//! This module implements the booking side of report assembly:
//! - Ledger entries as delivered by the ledger collaborator
//! - Enrichment with the chart-of-accounts classification
//! - Typed totals (revenue, expense, asset, liability)
//! - Per-account and per-cost-location summaries

pub mod balance;
pub mod enrich;
pub mod entry;
pub mod summary;
pub mod totals;

#[cfg(test)]
mod totals_props;

pub use balance::{AccountBalance, summarize_accounts};
pub use enrich::{BookingEnricher, ClassifiedBooking};
pub use entry::{LedgerEntry, Side};
pub use summary::{CostLocationSummary, summarize_cost_locations};
pub use totals::LedgerTotals;
