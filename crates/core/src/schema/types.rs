//! Report schema domain types.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use saldo_shared::types::{CostLocationCode, ReportId, TimeSlotId};

/// A row of the time-slot template table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlotTemplate {
    /// Slot id referenced by `s:<id>` columns.
    pub id: TimeSlotId,
    /// Slot title.
    pub name: String,
    /// First day of the window.
    pub start: Option<NaiveDate>,
    /// Last day of the window (inclusive).
    pub end: Option<NaiveDate>,
}

/// A row of the reports overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    /// Report id (`Plan`).
    pub id: ReportId,
    /// Report name.
    pub name: String,
    /// Declared cost-location range (`Kostenstellenstart`..`Kostenstellenende`).
    pub cost_location_range: Option<(u64, u64)>,
}

/// One reporting time window of a report, rendered as a column band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Referenced time slot.
    pub time_slot_id: TimeSlotId,
    /// Slot title, the id itself when the template is missing.
    pub name: String,
    /// First day of the window.
    pub start: Option<NaiveDate>,
    /// Last day of the window (inclusive).
    pub end: Option<NaiveDate>,
    /// Whether a booking listing is built for this slot.
    pub build_listing: bool,
    /// Position among the report's slot columns.
    pub order_number: usize,
}

impl Slot {
    /// The date window, if both bounds are known.
    #[must_use]
    pub fn window(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.start.zip(self.end)
    }
}

/// Kind of a report row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    /// Sums its children.
    Group,
    /// Leaf row over expense bookings.
    Expense,
    /// Leaf row over income bookings.
    Income,
}

/// How a budget limit may be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LimitType {
    /// Plain budget figure.
    Relative,
    /// Hard limit (`:!`).
    Absolute,
    /// Limit with an extension (`:+<flat>` or `:+<pct>%`).
    Exceedable,
}

/// What one row × slot cell aggregates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AggregationSpec {
    /// A budget figure.
    Budget {
        /// Budget limit.
        limit: Decimal,
        /// Limit semantics.
        limit_type: LimitType,
        /// Extended limit of exceedable budgets.
        extended_limit: Option<Decimal>,
    },
    /// Sum of the bookings of the row's cost locations.
    BookingsSum,
    /// Sum of the child cells.
    FieldSum,
    /// Nothing.
    Empty,
}

/// One row of a compiled report schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RowNode {
    /// Position among the schema rows.
    pub order_number: usize,
    /// Spreadsheet row of the schema table, for issue reporting.
    pub source_row: usize,
    /// Breadcrumb of section names; leaves end with their own name.
    pub hierarchy_location: Vec<String>,
    /// Display name.
    pub name: String,
    /// Row kind.
    pub kind: RowKind,
    /// Cost locations of a leaf row.
    pub cost_locations: Vec<CostLocationCode>,
    /// Indices of the direct children in the report's row list.
    pub children: Vec<usize>,
    /// Aggregation spec per slot, parallel to the report's slot list.
    pub cells: Vec<AggregationSpec>,
}

impl RowNode {
    /// Returns true for income and expense rows.
    #[must_use]
    pub const fn is_leaf(&self) -> bool {
        !matches!(self.kind, RowKind::Group)
    }

    /// Returns true for whole-report total rows: groups without breadcrumb.
    #[must_use]
    pub fn is_saldo(&self) -> bool {
        matches!(self.kind, RowKind::Group) && self.hierarchy_location.is_empty()
    }

    /// Hierarchy level, the breadcrumb length.
    #[must_use]
    pub fn level(&self) -> usize {
        self.hierarchy_location.len()
    }

    /// Returns true if `child` sits exactly one level below this group.
    #[must_use]
    pub fn is_parent_of(&self, child: &Self) -> bool {
        matches!(self.kind, RowKind::Group)
            && child.hierarchy_location.len() == self.hierarchy_location.len() + 1
            && child.hierarchy_location.starts_with(&self.hierarchy_location)
    }
}

/// A compiled report: slots and rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportDefinition {
    /// Report id.
    pub id: ReportId,
    /// Report name.
    pub name: String,
    /// Declared cost-location range from the overview.
    pub cost_location_range: Option<(u64, u64)>,
    /// Slots ordered by order number.
    pub slots: Vec<Slot>,
    /// Rows in declared order.
    pub rows: Vec<RowNode>,
    /// Union of the leaf rows' cost locations.
    pub cost_locations: BTreeSet<CostLocationCode>,
}

impl ReportDefinition {
    /// Cost locations as strings, sorted.
    #[must_use]
    pub fn cost_location_strings(&self) -> Vec<String> {
        self.cost_locations.iter().map(ToString::to_string).collect()
    }

    /// Leaf kinds below a row; a leaf's set is its own kind.
    #[must_use]
    pub fn leaf_kinds(&self, row: usize) -> BTreeSet<RowKind> {
        let mut kinds = BTreeSet::new();
        self.collect_leaf_kinds(row, &mut kinds);
        kinds
    }

    fn collect_leaf_kinds(&self, row: usize, kinds: &mut BTreeSet<RowKind>) {
        let node = &self.rows[row];
        if node.is_leaf() {
            kinds.insert(node.kind);
        } else {
            for &child in &node.children {
                self.collect_leaf_kinds(child, kinds);
            }
        }
    }

    /// Depth of the deepest child chain starting at `row`; a childless row
    /// has depth 1.
    #[must_use]
    pub fn depth(&self, row: usize) -> usize {
        1 + self.rows[row]
            .children
            .iter()
            .map(|&child| self.depth(child))
            .max()
            .unwrap_or(0)
    }
}
