//! Assembled report types.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use saldo_shared::types::{CostLocationCode, ReportId, Table, TimeSlotId};
use saldo_shared::{AppResult, ReportConfig};

use crate::formula::{CellContent, CellValues, Expression, FormulaRenderer, bookings_table, evaluate};
use crate::issue::IssueLog;
use crate::layout::Layout;
use crate::ledger::{AccountBalance, ClassifiedBooking, CostLocationSummary, LedgerTotals};
use crate::schema::ReportDefinition;

/// Schema-side input tables of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaTables {
    /// Reports overview (`Plan`, `Name`, `Kostenstellenstart`, ...).
    pub overview: Table,
    /// Time-slot templates.
    pub time_slots: Table,
    /// One schema table per report id.
    pub schemas: BTreeMap<ReportId, Table>,
}

/// One leaf row of a booking listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListingEntry {
    /// Row index in the report definition.
    pub row: usize,
    /// Row name.
    pub name: String,
    /// Cost locations of the row.
    pub cost_locations: Vec<CostLocationCode>,
    /// Indices into the report's bookings.
    pub bookings: Vec<usize>,
    /// Sum of the listed amounts.
    pub total: Decimal,
}

/// Bookings behind the leaf rows of one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    /// Slot index.
    pub slot: usize,
    /// Time slot id.
    pub time_slot_id: TimeSlotId,
    /// Slot title.
    pub name: String,
    /// One entry per leaf row, in declared order.
    pub entries: Vec<ListingEntry>,
}

/// A compiled, laid-out and aggregated report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Compiled schema.
    pub definition: ReportDefinition,
    /// Grid positions.
    pub layout: Layout,
    /// Expression of every row × slot cell.
    pub cells: Vec<Vec<Expression>>,
    /// Bookings on the report's cost locations.
    pub bookings: Vec<ClassifiedBooking>,
    /// Typed totals of those bookings.
    pub totals: LedgerTotals,
    /// Listings of the slots that request one.
    pub listings: Vec<Listing>,
}

impl Report {
    /// Evaluates every cell against the report's bookings.
    #[must_use]
    pub fn evaluate(&self) -> CellValues {
        evaluate(&self.cells, &self.bookings)
    }

    /// The report's bookings sheet.
    #[must_use]
    pub fn bookings_sheet(&self, config: &ReportConfig) -> Table {
        bookings_table(&self.definition.id, &self.bookings, &config.bookings_sheet)
    }

    /// Renders every cell for a bookings sheet with the given headers.
    ///
    /// # Errors
    ///
    /// Returns `AppError::MissingColumn` if a filtered column is not among
    /// `headers`.
    pub fn render(&self, config: &ReportConfig, headers: &[String]) -> AppResult<Vec<Vec<CellContent>>> {
        let renderer = FormulaRenderer::new(config, &self.definition.id, headers, self.bookings.len())?;
        Ok(renderer.render_all(&self.cells, &self.layout))
    }

    /// Serializes the report as JSON.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Serialization` if encoding fails.
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Everything one assembly run produces.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AssembledReports {
    /// Reports by id.
    pub reports: BTreeMap<ReportId, Report>,
    /// The whole enriched ledger, unclassified bookings included.
    pub bookings: Vec<ClassifiedBooking>,
    /// Per-account summaries.
    pub accounts: BTreeMap<u64, AccountBalance>,
    /// Per-cost-location summaries.
    pub cost_locations: Vec<CostLocationSummary>,
    /// Every recoverable issue, in recording order.
    pub issues: IssueLog,
}

impl AssembledReports {
    /// Serializes the whole run as JSON.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Serialization` if encoding fails.
    pub fn to_json(&self) -> AppResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
