//! Aggregation expressions.
//!
//! An expression says how one report cell is computed, independently of
//! whether it is later evaluated numerically or serialized as a spreadsheet
//! formula.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use saldo_shared::types::CostLocationCode;

use crate::layout::GridRef;
use crate::ledger::Side;
use crate::schema::LimitType;

/// Sign of a summand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sign {
    /// Added.
    Plus,
    /// Subtracted.
    Minus,
}

impl Sign {
    /// Applies the sign to a value.
    #[must_use]
    pub fn apply(self, value: Decimal) -> Decimal {
        match self {
            Self::Plus => value,
            Self::Minus => -value,
        }
    }

    /// Formula operator.
    #[must_use]
    pub const fn symbol(self) -> char {
        match self {
            Self::Plus => '+',
            Self::Minus => '-',
        }
    }
}

/// One signed ledger filter: bookings whose account on `side` has `type2`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingTerm {
    /// Sign of the matching amounts.
    pub sign: Sign,
    /// Booking side whose account type is tested.
    pub side: Side,
    /// Required `Typ 2` of that account.
    pub type2: String,
}

/// Filtered ledger sum of a leaf row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingsSum {
    /// Negate the whole sum (income rows).
    pub negate: bool,
    /// Cost locations summed one by one.
    pub locations: Vec<CostLocationCode>,
    /// Inclusive date window; `None` sums over all dates.
    pub window: Option<(NaiveDate, NaiveDate)>,
    /// Cell listing the row's cost locations.
    pub cost_location_cell: GridRef,
    /// Signed filters applied per cost location, in order.
    pub terms: Vec<BookingTerm>,
}

/// How child cells are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SumMode {
    /// All descendants share one leaf kind: plain sum.
    Homogeneous,
    /// Mixed kinds: income subtrees added, others subtracted.
    Net,
}

/// Reference to a child row's cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildTerm {
    /// Sign of the child value.
    pub sign: Sign,
    /// Child row index.
    pub row: usize,
    /// Child cell in the grid.
    pub cell: GridRef,
}

/// Sum over a group's direct children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChildSum {
    /// Combination mode.
    pub mode: SumMode,
    /// Children in declared order.
    pub terms: Vec<ChildTerm>,
}

/// Computation of one row × slot cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Expression {
    /// No value.
    Empty,
    /// Constant zero (group without children).
    Zero,
    /// Budget figure.
    Literal {
        /// Budget limit.
        value: Decimal,
        /// Limit semantics.
        limit_type: LimitType,
        /// Extended limit of exceedable budgets.
        extended: Option<Decimal>,
    },
    /// Ledger sum.
    Bookings(BookingsSum),
    /// Sum of child cells.
    Children(ChildSum),
}
