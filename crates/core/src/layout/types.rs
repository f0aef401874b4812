//! Layout result types.

use serde::{Deserialize, Serialize};

use crate::schema::{ReportDefinition, RowNode};

/// Spreadsheet column letters of a 1-based column number.
///
/// `1 → A`, `26 → Z`, `27 → AA`, `703 → AAA`.
#[must_use]
pub fn column_letter(column: u32) -> String {
    let mut letters = Vec::new();
    let mut remaining = column;
    while remaining > 0 {
        let offset = (remaining - 1) % 26;
        letters.push(char::from(b'A' + u8::try_from(offset).unwrap_or(0)));
        remaining = (remaining - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// A grid coordinate, 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GridRef {
    /// Column number.
    pub column: u32,
    /// Row number.
    pub row: u32,
}

impl GridRef {
    /// Creates a coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Reference with an absolute row, e.g. `C$4`.
    #[must_use]
    pub fn absolute_row(&self) -> String {
        format!("{}${}", column_letter(self.column), self.row)
    }

    /// Reference with an absolute column, e.g. `$C4`.
    #[must_use]
    pub fn absolute_column(&self) -> String {
        format!("${}{}", column_letter(self.column), self.row)
    }
}

impl std::fmt::Display for GridRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", column_letter(self.column), self.row)
    }
}

/// Column band and header cells of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotBand {
    /// First column of the band.
    pub start_column: u32,
    /// Last column of the band.
    pub end_column: u32,
    /// Row of the slot title.
    pub title_row: u32,
    /// Row of the start date.
    pub start_date_row: u32,
    /// Row of the end date.
    pub end_date_row: u32,
}

impl SlotBand {
    /// Cell holding the slot's start date.
    #[must_use]
    pub const fn start_date_cell(&self) -> GridRef {
        GridRef::new(self.end_column, self.start_date_row)
    }

    /// Cell holding the slot's end date.
    #[must_use]
    pub const fn end_date_cell(&self) -> GridRef {
        GridRef::new(self.end_column, self.end_date_row)
    }
}

/// Grid positions of a compiled report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Deepest child chain over all rows.
    pub structure_depth: u32,
    /// Number of Saldo rows.
    pub num_saldo_rows: u32,
    /// Indentation levels: band width and number of title columns.
    ///
    /// This is `structure_depth - num_saldo_rows` (at least 1), not the
    /// plain structure depth.
    pub levels: u32,
    /// First title column.
    pub first_column: u32,
    /// Column listing each leaf's cost locations.
    pub cost_location_column: u32,
    /// First data row.
    pub first_row: u32,
    /// Row after the last assigned row.
    pub end_row: u32,
    /// Sheet row of every report row, parallel to the definition's rows.
    pub row_numbers: Vec<u32>,
    /// Band of every slot, parallel to the definition's slots.
    pub bands: Vec<SlotBand>,
}

impl Layout {
    /// Column within a band that holds a row's value.
    ///
    /// Leaves use the band's last column, Saldo rows its first, and a group at
    /// level `L` the column `start + L - 1`, clamped to the band.
    #[must_use]
    pub fn value_column(&self, row: &RowNode, band: &SlotBand) -> u32 {
        if row.is_leaf() {
            band.end_column
        } else if row.is_saldo() {
            band.start_column
        } else {
            let level = u32::try_from(row.level()).unwrap_or(u32::MAX);
            band.start_column
                .saturating_add(level - 1)
                .min(band.end_column)
        }
    }

    /// Grid cell of a row × slot value.
    #[must_use]
    pub fn cell(&self, definition: &ReportDefinition, row: usize, slot: usize) -> GridRef {
        let band = &self.bands[slot];
        GridRef::new(
            self.value_column(&definition.rows[row], band),
            self.row_numbers[row],
        )
    }

    /// Cell listing a row's cost locations.
    #[must_use]
    pub fn cost_location_cell(&self, row: usize) -> GridRef {
        GridRef::new(self.cost_location_column, self.row_numbers[row])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(1, "A")]
    #[case(26, "Z")]
    #[case(27, "AA")]
    #[case(52, "AZ")]
    #[case(53, "BA")]
    #[case(702, "ZZ")]
    #[case(703, "AAA")]
    fn test_column_letter(#[case] column: u32, #[case] expected: &str) {
        assert_eq!(column_letter(column), expected);
    }

    #[test]
    fn test_grid_ref_formats() {
        let cell = GridRef::new(3, 4);
        assert_eq!(cell.to_string(), "C4");
        assert_eq!(cell.absolute_row(), "C$4");
        assert_eq!(cell.absolute_column(), "$C4");
    }
}
