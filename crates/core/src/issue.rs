//! Recoverable input issues.
//!
//! Nothing in the core aborts a run because of bad input data. Every
//! degradation is recorded as an [`Issue`] in an [`IssueLog`] that is returned
//! with the assembled reports, and echoed through `tracing` when recorded.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use saldo_shared::types::{CostLocationCode, ReportId, TimeSlotId};

use crate::ledger::Side;

/// Broad issue taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    /// An account or cost location matched nothing.
    ClassificationMiss,
    /// A schema cell or row could not be parsed.
    SchemaParseError,
    /// A row has no matching parent group.
    StructuralInconsistency,
    /// A time-slot template or a report schema is missing.
    MissingTemplate,
    /// Data-quality observations that degrade nothing.
    Diagnostic,
}

/// A recoverable problem found in the input tables.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    // ========== Classification ==========
    /// A booking side references an account outside every range.
    #[error("Booking {booking}: {side} account {account} matches no account range")]
    UnclassifiedAccount {
        /// Booking number.
        booking: String,
        /// Account number.
        account: u64,
        /// Which side of the booking.
        side: Side,
    },

    /// A booking references a cost location the plan does not know.
    #[error("Cost location {code} is not part of the cost-location plan")]
    UnknownCostLocation {
        /// Normalized code.
        code: CostLocationCode,
    },

    // ========== Schema parsing ==========
    /// A slot cell holds an unrecognized literal.
    #[error("Report {report}, row {row}: invalid literal '{literal}' in slot {slot}")]
    InvalidSlotLiteral {
        /// Report id.
        report: ReportId,
        /// Spreadsheet row of the schema table.
        row: usize,
        /// Slot column.
        slot: TimeSlotId,
        /// Cell content.
        literal: String,
    },

    /// A schema row has a missing or unknown `Type`.
    #[error("Report {report}, row {row}: unrecognized row type '{value}'")]
    InvalidRowType {
        /// Report id.
        report: ReportId,
        /// Spreadsheet row of the schema table.
        row: usize,
        /// Cell content.
        value: String,
    },

    /// A leaf row lists a cost location that is not a number.
    #[error("Report {report}, row {row}: invalid cost location '{value}'")]
    InvalidCostLocation {
        /// Report id.
        report: ReportId,
        /// Spreadsheet row of the schema table.
        row: usize,
        /// Offending token, empty if the cell was blank.
        value: String,
    },

    /// A row of a reference table could not be read.
    #[error("Table '{table}', row {row}: {message}")]
    InvalidTableRow {
        /// Table name.
        table: String,
        /// Spreadsheet row.
        row: usize,
        /// What was wrong.
        message: String,
    },

    // ========== Structure ==========
    /// A nested row has no group row as its parent.
    #[error("Report {report}, row {row}: no parent group for '{hierarchy}'")]
    OrphanRow {
        /// Report id.
        report: ReportId,
        /// Spreadsheet row of the schema table.
        row: usize,
        /// Breadcrumb joined with ` / `.
        hierarchy: String,
    },

    // ========== Templates ==========
    /// A slot column references an unknown time slot.
    #[error("Report {report}: time slot {slot} has no template")]
    MissingTemplate {
        /// Report id.
        report: ReportId,
        /// Slot id.
        slot: TimeSlotId,
    },

    /// A report in the overview has no schema table.
    #[error("Report {report} has no schema table")]
    MissingSchema {
        /// Report id.
        report: ReportId,
    },

    // ========== Diagnostics ==========
    /// A group row has no children and sums to zero.
    #[error("Report {report}, row {row}: group '{name}' has no children")]
    EmptyGroup {
        /// Report id.
        report: ReportId,
        /// Spreadsheet row of the schema table.
        row: usize,
        /// Group name.
        name: String,
    },

    /// Two account ranges overlap; the earlier one wins.
    #[error("Account ranges {first} and {second} overlap")]
    OverlappingAccountRanges {
        /// Earlier range, as `start-end`.
        first: String,
        /// Later range, as `start-end`.
        second: String,
    },

    /// A table lacks a column its reader needs.
    #[error("Table '{table}' has no column '{column}'")]
    MissingColumn {
        /// Table name.
        table: String,
        /// Expected header.
        column: String,
    },

    /// A report plan uses a schema version that is no longer compiled.
    #[error("Report {report} uses deprecated version '{version}'")]
    DeprecatedReportVersion {
        /// Report id.
        report: ReportId,
        /// Version cell content.
        version: String,
    },

    /// A Saldo row with children sums them and ignores its budget literal.
    #[error("Report {report}, row {row}: budget of Saldo in slot {slot} is ignored")]
    IgnoredSaldoBudget {
        /// Report id.
        report: ReportId,
        /// Spreadsheet row of the schema table.
        row: usize,
        /// Slot whose cell holds the literal.
        slot: TimeSlotId,
    },
}

impl Issue {
    /// Maps the issue onto the taxonomy.
    #[must_use]
    pub const fn category(&self) -> IssueCategory {
        match self {
            Self::UnclassifiedAccount { .. } | Self::UnknownCostLocation { .. } => {
                IssueCategory::ClassificationMiss
            }
            Self::InvalidSlotLiteral { .. }
            | Self::InvalidRowType { .. }
            | Self::InvalidCostLocation { .. }
            | Self::InvalidTableRow { .. } => IssueCategory::SchemaParseError,
            Self::OrphanRow { .. } => IssueCategory::StructuralInconsistency,
            Self::MissingTemplate { .. } | Self::MissingSchema { .. } => {
                IssueCategory::MissingTemplate
            }
            Self::EmptyGroup { .. }
            | Self::OverlappingAccountRanges { .. }
            | Self::MissingColumn { .. }
            | Self::DeprecatedReportVersion { .. }
            | Self::IgnoredSaldoBudget { .. } => IssueCategory::Diagnostic,
        }
    }
}

/// Ordered collection of recorded issues.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IssueLog {
    issues: Vec<Issue>,
}

impl IssueLog {
    /// Creates an empty log.
    #[must_use]
    pub const fn new() -> Self {
        Self { issues: Vec::new() }
    }

    /// Records an issue and emits it as a warning.
    pub fn record(&mut self, issue: Issue) {
        warn!(category = ?issue.category(), "{issue}");
        self.issues.push(issue);
    }

    /// Appends issues recorded elsewhere, keeping their order.
    pub fn merge(&mut self, other: Self) {
        self.issues.extend(other.issues);
    }

    /// All issues in recording order.
    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// Issues of one category.
    pub fn in_category(&self, category: IssueCategory) -> impl Iterator<Item = &Issue> {
        self.issues.iter().filter(move |i| i.category() == category)
    }

    /// Number of recorded issues.
    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    /// Returns true if nothing was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}
