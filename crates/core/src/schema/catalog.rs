//! Reports overview and time-slot templates.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use tracing::info;

use saldo_shared::types::{ReportId, Table, TimeSlotId};

use super::types::{ReportEntry, TimeSlotTemplate};
use crate::issue::{Issue, IssueLog};

const PLAN: &str = "Plan";
const NAME: &str = "Name";
const RANGE_START: &str = "Kostenstellenstart";
const RANGE_END: &str = "Kostenstellenende";
const VERSION: &str = "Version";

const SLOT_ID: &str = "Slot ID";
const SLOT_TITLE: &str = "Slot Title";
const SLOT_START: &str = "Slot Start";
const SLOT_END: &str = "Slot End";

/// The only schema version that is compiled.
const SUPPORTED_VERSION: Decimal = Decimal::TWO;

/// Reads the reports overview, keeping version 2 plans in table order.
pub fn parse_reports_overview(table: &Table, issues: &mut IssueLog) -> Vec<ReportEntry> {
    if table.column(PLAN).is_none() {
        issues.record(Issue::MissingColumn {
            table: table.name.clone(),
            column: PLAN.to_string(),
        });
        return Vec::new();
    }

    let mut entries = Vec::new();
    for record in table.records() {
        let Some(id) = record.get(PLAN).as_text() else {
            continue;
        };
        let id = ReportId::new(id);
        let version = record.get(VERSION);
        if version.as_decimal() != Some(SUPPORTED_VERSION) {
            issues.record(Issue::DeprecatedReportVersion {
                report: id,
                version: version.as_text().unwrap_or_default(),
            });
            continue;
        }
        let cost_location_range = record
            .get(RANGE_START)
            .as_integer()
            .zip(record.get(RANGE_END).as_integer());
        entries.push(ReportEntry {
            name: record.get(NAME).as_text().unwrap_or_else(|| id.to_string()),
            id,
            cost_location_range,
        });
    }
    info!(reports = entries.len(), "reports overview read");
    entries
}

/// Reads the time-slot templates, keyed by slot id.
///
/// Rows without an id are skipped; unreadable dates stay unset.
pub fn parse_time_slots(table: &Table, issues: &mut IssueLog) -> BTreeMap<TimeSlotId, TimeSlotTemplate> {
    if table.column(SLOT_ID).is_none() {
        issues.record(Issue::MissingColumn {
            table: table.name.clone(),
            column: SLOT_ID.to_string(),
        });
        return BTreeMap::new();
    }

    table
        .records()
        .filter_map(|record| {
            let id = TimeSlotId::new(record.get(SLOT_ID).as_text()?);
            let mut date = |column: &str| {
                let cell = record.get(column);
                let date = cell.as_date();
                if date.is_none() && !cell.is_empty() {
                    issues.record(Issue::InvalidTableRow {
                        table: table.name.clone(),
                        row: record.sheet_row(),
                        message: format!("'{column}' of slot '{id}' is not a date"),
                    });
                }
                date
            };
            let template = TimeSlotTemplate {
                start: date(SLOT_START),
                end: date(SLOT_END),
                name: record.get(SLOT_TITLE).as_text().unwrap_or_else(|| id.to_string()),
                id: id.clone(),
            };
            Some((id, template))
        })
        .collect()
}
