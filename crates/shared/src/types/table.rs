//! In-memory input tables.
//!
//! Every tabular input (chart of accounts, cost-location plan, reports
//! overview, time slots, report schemas) arrives as a `Table` that a
//! collaborator materialized from a spreadsheet sheet.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

static EMPTY_CELL: Cell = Cell::Empty;

/// A single spreadsheet cell value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Cell {
    /// No value.
    #[default]
    Empty,
    /// Free text.
    Text(String),
    /// A numeric cell.
    Number(Decimal),
    /// A date cell.
    Date(NaiveDate),
}

impl Cell {
    /// Returns true for empty cells and whitespace-only text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(text) => text.trim().is_empty(),
            Self::Number(_) | Self::Date(_) => false,
        }
    }

    /// Returns trimmed, non-blank text content.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(text) if !text.trim().is_empty() => Some(text.trim()),
            _ => None,
        }
    }

    /// Renders any non-empty cell as text.
    #[must_use]
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Empty => None,
            Self::Text(_) => self.as_str().map(str::to_string),
            Self::Number(value) => Some(value.normalize().to_string()),
            Self::Date(date) => Some(date.format("%Y-%m-%d").to_string()),
        }
    }

    /// Reads a numeric cell, or text that parses as a decimal.
    #[must_use]
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => Decimal::from_str(text.trim()).ok(),
            Self::Empty | Self::Date(_) => None,
        }
    }

    /// Reads a non-negative whole number.
    #[must_use]
    pub fn as_integer(&self) -> Option<u64> {
        let value = self.as_decimal()?;
        if value.fract().is_zero() {
            value.to_u64()
        } else {
            None
        }
    }

    /// Reads a date cell, or text in `YYYY-MM-DD`, `YYYY-MM-DD HH:MM:SS` or
    /// `DD.MM.YYYY` form.
    #[must_use]
    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(date) => Some(*date),
            Self::Text(text) => {
                let text = text.trim();
                NaiveDate::parse_from_str(text, "%Y-%m-%d")
                    .or_else(|_| NaiveDate::parse_from_str(text, "%d.%m.%Y"))
                    .ok()
                    .or_else(|| {
                        NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
                            .ok()
                            .map(|dt| dt.date())
                    })
            }
            Self::Empty | Self::Number(_) => None,
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        if value.is_empty() {
            Self::Empty
        } else {
            Self::Text(value.to_string())
        }
    }
}

impl From<Decimal> for Cell {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Self::Number(Decimal::from(value))
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Self::Number(Decimal::from(value))
    }
}

impl From<NaiveDate> for Cell {
    fn from(value: NaiveDate) -> Self {
        Self::Date(value)
    }
}

/// A named table with a header row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Sheet name the table came from.
    pub name: String,
    /// Column headers.
    pub headers: Vec<String>,
    /// Data rows; short rows are padded with empty cells on read.
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Creates an empty table with the given headers.
    #[must_use]
    pub fn new<H: Into<String>>(name: impl Into<String>, headers: impl IntoIterator<Item = H>) -> Self {
        Self {
            name: name.into(),
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Appends a row, builder style.
    #[must_use]
    pub fn with_row(mut self, cells: Vec<Cell>) -> Self {
        self.rows.push(cells);
        self
    }

    /// Appends a row.
    pub fn push_row(&mut self, cells: Vec<Cell>) {
        self.rows.push(cells);
    }

    /// Returns the index of the column with the given header.
    #[must_use]
    pub fn column(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == header)
    }

    /// Iterates over the non-blank rows.
    pub fn records(&self) -> impl Iterator<Item = Record<'_>> {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, cells)| !cells.iter().all(Cell::is_empty))
            .map(move |(index, cells)| Record {
                table: self,
                index,
                cells,
            })
    }
}

/// A borrowed view of one table row.
#[derive(Debug, Clone, Copy)]
pub struct Record<'a> {
    table: &'a Table,
    index: usize,
    cells: &'a [Cell],
}

impl<'a> Record<'a> {
    /// Zero-based position of the row in the table.
    #[must_use]
    pub const fn index(&self) -> usize {
        self.index
    }

    /// 1-based spreadsheet row number, counting the header row.
    #[must_use]
    pub const fn sheet_row(&self) -> usize {
        self.index + 2
    }

    /// Cell at a column position; missing cells read as empty.
    #[must_use]
    pub fn at(&self, column: usize) -> &'a Cell {
        self.cells.get(column).unwrap_or(&EMPTY_CELL)
    }

    /// Cell under a header; unknown headers read as empty.
    #[must_use]
    pub fn get(&self, header: &str) -> &'a Cell {
        self.table
            .column(header)
            .map_or(&EMPTY_CELL, |column| self.at(column))
    }
}
