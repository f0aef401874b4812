//! Numeric evaluation of cell expressions against a booking set.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::expression::{BookingsSum, Expression};
use crate::ledger::ClassifiedBooking;

/// Evaluated value of every row × slot cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CellValues {
    values: Vec<Vec<Decimal>>,
}

impl CellValues {
    /// Value of one cell; out-of-range cells read as zero.
    #[must_use]
    pub fn get(&self, row: usize, slot: usize) -> Decimal {
        self.values
            .get(row)
            .and_then(|slots| slots.get(slot))
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    /// Values of one row, one per slot.
    #[must_use]
    pub fn row(&self, row: usize) -> &[Decimal] {
        self.values.get(row).map_or(&[], Vec::as_slice)
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true for a report without rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Evaluates a grid of expressions.
///
/// Child sums are resolved recursively and memoized, so children may appear
/// before or after their group in row order.
#[must_use]
pub fn evaluate(cells: &[Vec<Expression>], bookings: &[ClassifiedBooking]) -> CellValues {
    let mut memo: Vec<Vec<Option<Decimal>>> = cells.iter().map(|row| vec![None; row.len()]).collect();
    for row in 0..cells.len() {
        for slot in 0..cells[row].len() {
            value_of(cells, bookings, row, slot, &mut memo);
        }
    }
    CellValues {
        values: memo
            .into_iter()
            .map(|row| row.into_iter().map(|v| v.unwrap_or(Decimal::ZERO)).collect())
            .collect(),
    }
}

fn value_of(
    cells: &[Vec<Expression>],
    bookings: &[ClassifiedBooking],
    row: usize,
    slot: usize,
    memo: &mut [Vec<Option<Decimal>>],
) -> Decimal {
    if let Some(value) = memo[row][slot] {
        return value;
    }
    let value = match &cells[row][slot] {
        Expression::Empty | Expression::Zero => Decimal::ZERO,
        Expression::Literal { value, .. } => *value,
        Expression::Bookings(sum) => bookings_sum(sum, bookings),
        Expression::Children(sum) => sum
            .terms
            .iter()
            .map(|term| term.sign.apply(value_of(cells, bookings, term.row, slot, memo)))
            .fold(Decimal::ZERO, Decimal::saturating_add),
    };
    memo[row][slot] = Some(value);
    value
}

/// Applies the signed filters of a leaf cell.
#[must_use]
pub fn bookings_sum(sum: &BookingsSum, bookings: &[ClassifiedBooking]) -> Decimal {
    let total = sum
        .locations
        .iter()
        .map(|location| {
            bookings
                .iter()
                .filter(|b| b.cost_location() == Some(location))
                .filter(|b| {
                    sum.window
                        .is_none_or(|(start, end)| start <= b.date() && b.date() <= end)
                })
                .map(|b| {
                    sum.terms
                        .iter()
                        .filter(|term| b.type2(term.side) == Some(term.type2.as_str()))
                        .map(|term| term.sign.apply(b.amount()))
                        .fold(Decimal::ZERO, Decimal::saturating_add)
                })
                .fold(Decimal::ZERO, Decimal::saturating_add)
        })
        .fold(Decimal::ZERO, Decimal::saturating_add);

    if sum.negate { -total } else { total }
}
