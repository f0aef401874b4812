//! Property-based tests for row numbering.
//!
//! Feature: report-layout
//! - Property 7: Row numbers increase in declared order
//! - Property 8: Saldo rows sit one extra row below their predecessor

use std::collections::BTreeSet;

use proptest::prelude::*;

use saldo_shared::config::LayoutConfig;
use saldo_shared::types::ReportId;

use super::engine::LayoutEngine;
use crate::schema::{ReportDefinition, RowKind, RowNode};

/// Strategy for a flat row sequence mixing Saldo rows and leaves.
fn rows() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 1..40)
}

fn definition(saldo_flags: &[bool]) -> ReportDefinition {
    let rows = saldo_flags
        .iter()
        .enumerate()
        .map(|(order_number, &saldo)| RowNode {
            order_number,
            source_row: order_number + 2,
            hierarchy_location: if saldo { Vec::new() } else { vec!["x".to_string()] },
            name: String::new(),
            kind: if saldo { RowKind::Group } else { RowKind::Expense },
            cost_locations: Vec::new(),
            children: Vec::new(),
            cells: Vec::new(),
        })
        .collect();
    ReportDefinition {
        id: ReportId::from("P"),
        name: String::new(),
        cost_location_range: None,
        slots: Vec::new(),
        rows,
        cost_locations: BTreeSet::new(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property 7: Row numbers increase in declared order
    #[test]
    fn prop_row_numbers_strictly_increase(flags in rows(), stride in 1u32..5) {
        let config = LayoutConfig { row_stride: stride, ..LayoutConfig::default() };
        let layout = LayoutEngine::new(&config).layout(&definition(&flags));

        prop_assert!(layout.row_numbers[0] >= config.first_data_row());
        for pair in layout.row_numbers.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    /// Property 8: Saldo rows sit one extra row below their predecessor
    #[test]
    fn prop_saldo_rows_consume_header_row(flags in rows(), stride in 1u32..5) {
        let config = LayoutConfig { row_stride: stride, ..LayoutConfig::default() };
        let layout = LayoutEngine::new(&config).layout(&definition(&flags));

        for (index, &saldo) in flags.iter().enumerate().skip(1) {
            let gap = layout.row_numbers[index] - layout.row_numbers[index - 1];
            prop_assert_eq!(gap, if saldo { stride + 1 } else { stride });
        }
    }
}
