//! Layout computation.

use tracing::debug;

use saldo_shared::config::LayoutConfig;

use super::types::{Layout, SlotBand};
use crate::schema::ReportDefinition;

/// Computes grid positions for compiled reports.
#[derive(Debug, Clone, Copy)]
pub struct LayoutEngine<'a> {
    config: &'a LayoutConfig,
}

impl<'a> LayoutEngine<'a> {
    /// Creates an engine for the configured geometry.
    #[must_use]
    pub const fn new(config: &'a LayoutConfig) -> Self {
        Self { config }
    }

    /// Lays out a report.
    ///
    /// Rows are numbered in declared order starting at the first data row.
    /// Every row advances the cursor by the row stride, and each Saldo row
    /// consumes one extra row before it. Each slot owns a band as wide as the
    /// indentation levels, placed after the title columns and the
    /// cost-location column.
    #[must_use]
    pub fn layout(&self, definition: &ReportDefinition) -> Layout {
        let structure_depth = (0..definition.rows.len())
            .map(|row| definition.depth(row))
            .max()
            .unwrap_or(0);
        let num_saldo_rows = definition.rows.iter().filter(|r| r.is_saldo()).count();
        let structure_depth = to_u32(structure_depth);
        let num_saldo_rows = to_u32(num_saldo_rows);
        let levels = structure_depth.saturating_sub(num_saldo_rows).max(1);

        let first_row = self.config.first_data_row();
        let mut cursor = first_row;
        let row_numbers = definition
            .rows
            .iter()
            .map(|row| {
                if row.is_saldo() {
                    cursor += 1;
                }
                let number = cursor;
                cursor += self.config.row_stride;
                number
            })
            .collect();

        let first_column = self.config.first_column;
        let cost_location_column = first_column + levels;
        let title_row = self.config.slot_header_row;
        let bands = definition
            .slots
            .iter()
            .map(|slot| {
                let start_column = cost_location_column + 1 + to_u32(slot.order_number) * levels;
                SlotBand {
                    start_column,
                    end_column: start_column + levels - 1,
                    title_row,
                    start_date_row: title_row + 1,
                    end_date_row: title_row + 2,
                }
            })
            .collect();

        debug!(
            report = %definition.id,
            structure_depth,
            num_saldo_rows,
            levels,
            "report laid out"
        );

        Layout {
            structure_depth,
            num_saldo_rows,
            levels,
            first_column,
            cost_location_column,
            first_row,
            end_row: cursor,
            row_numbers,
            bands,
        }
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::GridRef;
    use crate::schema::{RowKind, RowNode, Slot};
    use saldo_shared::types::{ReportId, TimeSlotId};
    use std::collections::BTreeSet;

    fn node(kind: RowKind, hierarchy: &[&str], children: Vec<usize>) -> RowNode {
        RowNode {
            order_number: 0,
            source_row: 2,
            hierarchy_location: hierarchy.iter().map(|s| (*s).to_string()).collect(),
            name: String::new(),
            kind,
            cost_locations: Vec::new(),
            children,
            cells: Vec::new(),
        }
    }

    fn slot(order_number: usize) -> Slot {
        Slot {
            time_slot_id: TimeSlotId::new(format!("S{order_number}")),
            name: String::new(),
            start: None,
            end: None,
            build_listing: false,
            order_number,
        }
    }

    /// Saldo → group A → two leaves.
    fn definition() -> ReportDefinition {
        ReportDefinition {
            id: ReportId::from("P1"),
            name: "P1".into(),
            cost_location_range: None,
            slots: vec![slot(0), slot(1)],
            rows: vec![
                node(RowKind::Group, &[], vec![1]),
                node(RowKind::Group, &["A"], vec![2, 3]),
                node(RowKind::Expense, &["A", "x"], vec![]),
                node(RowKind::Income, &["A", "y"], vec![]),
            ],
            cost_locations: BTreeSet::new(),
        }
    }

    #[test]
    fn test_depth_and_levels() {
        let config = LayoutConfig::default();
        let layout = LayoutEngine::new(&config).layout(&definition());

        assert_eq!(layout.structure_depth, 3);
        assert_eq!(layout.num_saldo_rows, 1);
        assert_eq!(layout.levels, 2);
    }

    #[test]
    fn test_row_numbers() {
        let config = LayoutConfig::default();
        let layout = LayoutEngine::new(&config).layout(&definition());

        assert_eq!(layout.row_numbers, vec![8, 9, 10, 11]);
        assert_eq!(layout.end_row, 12);
    }

    #[test]
    fn test_row_numbers_with_stride() {
        let config = LayoutConfig {
            row_stride: 2,
            ..LayoutConfig::default()
        };
        let layout = LayoutEngine::new(&config).layout(&definition());
        assert_eq!(layout.row_numbers, vec![8, 10, 12, 14]);
    }

    #[test]
    fn test_bands_and_cells() {
        let config = LayoutConfig::default();
        let definition = definition();
        let layout = LayoutEngine::new(&config).layout(&definition);

        // title columns A..B, cost location C, band 0 D..E, band 1 F..G
        assert_eq!(layout.cost_location_column, 3);
        assert_eq!((layout.bands[0].start_column, layout.bands[0].end_column), (4, 5));
        assert_eq!((layout.bands[1].start_column, layout.bands[1].end_column), (6, 7));

        assert_eq!(layout.cell(&definition, 0, 0), GridRef::new(4, 8));
        assert_eq!(layout.cell(&definition, 1, 0), GridRef::new(4, 9));
        assert_eq!(layout.cell(&definition, 2, 1), GridRef::new(7, 10));
        assert_eq!(layout.bands[1].start_date_cell().absolute_row(), "G$4");
        assert_eq!(layout.bands[1].end_date_cell().absolute_row(), "G$5");
        assert_eq!(layout.cost_location_cell(3).absolute_column(), "$C11");
    }

    #[test]
    fn test_flat_report() {
        let config = LayoutConfig::default();
        let mut definition = definition();
        definition.rows = vec![node(RowKind::Expense, &["x"], vec![])];
        let layout = LayoutEngine::new(&config).layout(&definition);

        assert_eq!(layout.structure_depth, 1);
        assert_eq!(layout.levels, 1);
        assert_eq!(layout.row_numbers, vec![7]);
    }
}
