//! Compilation of a schema table into a report definition.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use saldo_shared::config::TermsConfig;
use saldo_shared::types::{Cell, CostLocationCode, Record, Table, TimeSlotId};
use saldo_shared::ReportConfig;

use super::columns::{SchemaColumns, SlotColumn};
use super::literal::parse_literal;
use super::types::{
    AggregationSpec, ReportDefinition, ReportEntry, RowKind, RowNode, Slot, TimeSlotTemplate,
};
use crate::issue::{Issue, IssueLog};

/// Compiles schema tables into report definitions.
#[derive(Debug, Clone, Copy)]
pub struct ReportSchemaCompiler<'a> {
    config: &'a ReportConfig,
}

impl<'a> ReportSchemaCompiler<'a> {
    /// Creates a compiler using the configured vocabulary.
    #[must_use]
    pub const fn new(config: &'a ReportConfig) -> Self {
        Self { config }
    }

    /// Compiles one report's schema table.
    ///
    /// Bad rows and cells degrade to issues; the rest of the report still
    /// compiles.
    pub fn compile(
        &self,
        entry: &ReportEntry,
        table: &Table,
        templates: &BTreeMap<TimeSlotId, TimeSlotTemplate>,
        issues: &mut IssueLog,
    ) -> ReportDefinition {
        let columns = SchemaColumns::classify(&table.headers);
        let mut definition = ReportDefinition {
            id: entry.id.clone(),
            name: entry.name.clone(),
            cost_location_range: entry.cost_location_range,
            slots: self.slots(entry, &columns.slots, templates, issues),
            rows: Vec::new(),
            cost_locations: BTreeSet::new(),
        };

        let Some(kind_column) = columns.kind else {
            issues.record(Issue::MissingColumn {
                table: table.name.clone(),
                column: "Type".to_string(),
            });
            return definition;
        };

        for record in table.records() {
            let order_number = definition.rows.len();
            if let Some(row) = self.row(entry, &columns, kind_column, &record, order_number, issues) {
                definition.rows.push(row);
            }
        }

        Self::link_children(&mut definition, issues);
        definition.cost_locations = definition
            .rows
            .iter()
            .flat_map(|row| row.cost_locations.iter().cloned())
            .collect();

        debug!(
            report = %definition.id,
            rows = definition.rows.len(),
            slots = definition.slots.len(),
            "report schema compiled"
        );
        definition
    }

    fn slots(
        &self,
        entry: &ReportEntry,
        columns: &[SlotColumn],
        templates: &BTreeMap<TimeSlotId, TimeSlotTemplate>,
        issues: &mut IssueLog,
    ) -> Vec<Slot> {
        columns
            .iter()
            .enumerate()
            .map(|(order_number, column)| {
                let template = templates.get(&column.id);
                if template.is_none() {
                    issues.record(Issue::MissingTemplate {
                        report: entry.id.clone(),
                        slot: column.id.clone(),
                    });
                }
                Slot {
                    time_slot_id: column.id.clone(),
                    name: template.map_or_else(|| column.id.to_string(), |t| t.name.clone()),
                    start: template.and_then(|t| t.start),
                    end: template.and_then(|t| t.end),
                    build_listing: column.listing,
                    order_number,
                }
            })
            .collect()
    }

    fn row(
        &self,
        entry: &ReportEntry,
        columns: &SchemaColumns,
        kind_column: usize,
        record: &Record<'_>,
        order_number: usize,
        issues: &mut IssueLog,
    ) -> Option<RowNode> {
        let terms = &self.config.terms;
        let raw_kind = record.at(kind_column).as_text().unwrap_or_default();
        let Some(kind) = Self::row_kind(terms, &raw_kind) else {
            issues.record(Issue::InvalidRowType {
                report: entry.id.clone(),
                row: record.sheet_row(),
                value: raw_kind,
            });
            return None;
        };

        let mut hierarchy_location: Vec<String> = columns
            .sections
            .iter()
            .filter_map(|&(_, index)| record.at(index).as_text())
            .collect();
        let declared_name = columns.name.and_then(|index| record.at(index).as_text());

        let mut cost_locations = Vec::new();
        let name = match kind {
            RowKind::Expense | RowKind::Income => {
                let cell = columns.cost_location.map_or(&Cell::Empty, |index| record.at(index));
                cost_locations = self.cost_locations(entry, record.sheet_row(), cell, issues);
                let name = declared_name.unwrap_or_default();
                hierarchy_location.push(name.clone());
                name
            }
            RowKind::Group => match hierarchy_location.last() {
                Some(last) => last.clone(),
                None => declared_name.unwrap_or_default(),
            },
        };

        let cells = columns
            .slots
            .iter()
            .map(|slot| {
                let cell = record.at(slot.index);
                parse_literal(cell, terms).unwrap_or_else(|_| {
                    issues.record(Issue::InvalidSlotLiteral {
                        report: entry.id.clone(),
                        row: record.sheet_row(),
                        slot: slot.id.clone(),
                        literal: cell.as_text().unwrap_or_default(),
                    });
                    AggregationSpec::Empty
                })
            })
            .collect();

        Some(RowNode {
            order_number,
            source_row: record.sheet_row(),
            hierarchy_location,
            name,
            kind,
            cost_locations,
            children: Vec::new(),
            cells,
        })
    }

    fn row_kind(terms: &TermsConfig, value: &str) -> Option<RowKind> {
        if TermsConfig::matches(&terms.group_synonyms, value) {
            Some(RowKind::Group)
        } else if TermsConfig::matches(&terms.expense_synonyms, value) {
            Some(RowKind::Expense)
        } else if TermsConfig::matches(&terms.income_synonyms, value) {
            Some(RowKind::Income)
        } else {
            None
        }
    }

    /// Reads a comma list or a single number of cost locations.
    fn cost_locations(
        &self,
        entry: &ReportEntry,
        row: usize,
        cell: &Cell,
        issues: &mut IssueLog,
    ) -> Vec<CostLocationCode> {
        let digits = self.config.cost_location_digits;
        let mut invalid = |value: String| {
            issues.record(Issue::InvalidCostLocation {
                report: entry.id.clone(),
                row,
                value,
            });
        };

        let mut codes: Vec<CostLocationCode> = Vec::new();
        match cell {
            Cell::Number(_) => match cell.as_integer() {
                Some(number) => codes.push(CostLocationCode::from_number(number, digits)),
                None => invalid(cell.as_text().unwrap_or_default()),
            },
            Cell::Text(text) => {
                let mut rejected = false;
                for token in text.split(',').map(str::trim).filter(|t| !t.is_empty()) {
                    if !token.bytes().all(|b| b.is_ascii_digit()) {
                        invalid(token.to_string());
                        rejected = true;
                        continue;
                    }
                    if let Some(code) = CostLocationCode::parse(token, digits) {
                        if !codes.contains(&code) {
                            codes.push(code);
                        }
                    }
                }
                if codes.is_empty() && !rejected {
                    invalid(text.trim().to_string());
                }
            }
            Cell::Empty | Cell::Date(_) => invalid(cell.as_text().unwrap_or_default()),
        }
        codes
    }

    /// Assigns every group the rows one level below its breadcrumb and
    /// reports nested rows that no group claims.
    fn link_children(definition: &mut ReportDefinition, issues: &mut IssueLog) {
        let rows = &definition.rows;
        let children: Vec<Vec<usize>> = rows
            .iter()
            .map(|parent| {
                rows.iter()
                    .enumerate()
                    .filter(|(_, child)| parent.is_parent_of(child))
                    .map(|(index, _)| index)
                    .collect()
            })
            .collect();

        let mut claimed = vec![false; rows.len()];
        for &child in children.iter().flatten() {
            claimed[child] = true;
        }
        for (row, is_claimed) in rows.iter().zip(&claimed) {
            if !is_claimed && row.level() >= 2 {
                issues.record(Issue::OrphanRow {
                    report: definition.id.clone(),
                    row: row.source_row,
                    hierarchy: row.hierarchy_location.join(" / "),
                });
            }
        }

        for (row, children) in definition.rows.iter_mut().zip(children) {
            row.children = children;
        }
    }
}
