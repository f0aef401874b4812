//! Per-cell expression synthesis.

use saldo_shared::ReportConfig;

use super::expression::{BookingTerm, BookingsSum, ChildSum, ChildTerm, Expression, Sign, SumMode};
use crate::issue::{Issue, IssueLog};
use crate::layout::Layout;
use crate::ledger::Side;
use crate::schema::{AggregationSpec, ReportDefinition, RowKind};

/// Builds the aggregation expression of every report cell.
#[derive(Debug, Clone, Copy)]
pub struct FormulaSynthesizer<'a> {
    config: &'a ReportConfig,
}

impl<'a> FormulaSynthesizer<'a> {
    /// Creates a synthesizer using the configured account-type terms.
    #[must_use]
    pub const fn new(config: &'a ReportConfig) -> Self {
        Self { config }
    }

    /// Synthesizes all cells, row by row, slot by slot.
    ///
    /// Each group without children is reported once, and so is each budget
    /// cell of a Saldo row that sums its children instead.
    pub fn synthesize_all(
        &self,
        definition: &ReportDefinition,
        layout: &Layout,
        issues: &mut IssueLog,
    ) -> Vec<Vec<Expression>> {
        for row in &definition.rows {
            if row.kind == RowKind::Group && row.children.is_empty() {
                issues.record(Issue::EmptyGroup {
                    report: definition.id.clone(),
                    row: row.source_row,
                    name: row.name.clone(),
                });
            }
            if row.is_saldo() {
                for (cell, slot) in row.cells.iter().zip(&definition.slots) {
                    if matches!(cell, AggregationSpec::Budget { .. }) {
                        issues.record(Issue::IgnoredSaldoBudget {
                            report: definition.id.clone(),
                            row: row.source_row,
                            slot: slot.time_slot_id.clone(),
                        });
                    }
                }
            }
        }

        (0..definition.rows.len())
            .map(|row| {
                (0..definition.slots.len())
                    .map(|slot| self.synthesize(definition, layout, row, slot))
                    .collect()
            })
            .collect()
    }

    /// Synthesizes one row × slot cell.
    #[must_use]
    pub fn synthesize(
        &self,
        definition: &ReportDefinition,
        layout: &Layout,
        row: usize,
        slot: usize,
    ) -> Expression {
        let node = &definition.rows[row];
        let spec = node.cells.get(slot).unwrap_or(&AggregationSpec::Empty);

        if let AggregationSpec::Budget {
            limit,
            limit_type,
            extended_limit,
        } = spec
        {
            if node.is_leaf() || !node.is_saldo() {
                return Expression::Literal {
                    value: *limit,
                    limit_type: *limit_type,
                    extended: *extended_limit,
                };
            }
        }

        match node.kind {
            RowKind::Expense | RowKind::Income => match spec {
                AggregationSpec::BookingsSum => Expression::Bookings(BookingsSum {
                    negate: node.kind == RowKind::Income,
                    locations: node.cost_locations.clone(),
                    window: definition.slots[slot].window(),
                    cost_location_cell: layout.cost_location_cell(row),
                    terms: self.booking_terms(),
                }),
                _ => Expression::Empty,
            },
            RowKind::Group => self.children(definition, layout, row, slot),
        }
    }

    /// Debit-normal net over profit-and-loss accounts:
    /// `+ debit∈expense − credit∈income + debit∈income − credit∈expense`.
    fn booking_terms(&self) -> Vec<BookingTerm> {
        let terms = &self.config.terms;
        let term = |sign, side, type2: &String| BookingTerm {
            sign,
            side,
            type2: type2.clone(),
        };
        vec![
            term(Sign::Plus, Side::Debit, &terms.expense_type2),
            term(Sign::Minus, Side::Credit, &terms.income_type2),
            term(Sign::Plus, Side::Debit, &terms.income_type2),
            term(Sign::Minus, Side::Credit, &terms.expense_type2),
        ]
    }

    fn children(
        &self,
        definition: &ReportDefinition,
        layout: &Layout,
        row: usize,
        slot: usize,
    ) -> Expression {
        let children = &definition.rows[row].children;
        if children.is_empty() {
            return Expression::Zero;
        }

        let mode = if definition.leaf_kinds(row).len() <= 1 {
            SumMode::Homogeneous
        } else {
            SumMode::Net
        };
        let terms = children
            .iter()
            .map(|&child| {
                let sign = match mode {
                    SumMode::Homogeneous => Sign::Plus,
                    SumMode::Net if definition.leaf_kinds(child).contains(&RowKind::Income) => {
                        Sign::Plus
                    }
                    SumMode::Net => Sign::Minus,
                };
                ChildTerm {
                    sign,
                    row: child,
                    cell: layout.cell(definition, child, slot),
                }
            })
            .collect();

        Expression::Children(ChildSum { mode, terms })
    }
}
