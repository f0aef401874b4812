//! Range-based account classifier.

use tracing::debug;

use saldo_shared::types::Table;

use super::types::{Account, AccountRange};
use crate::issue::{Issue, IssueLog};

const START: &str = "Start";
const END: &str = "Ende";
const TYPE1: &str = "Typ 1";
const TYPE2: &str = "Typ 2";
const CATEGORIES: [&str; 3] = ["Kategorie 1", "Kategorie 2", "Kategorie 3"];

/// Maps account numbers to their chart-of-accounts classification.
#[derive(Debug, Clone, Default)]
pub struct AccountClassifier {
    ranges: Vec<AccountRange>,
}

impl AccountClassifier {
    /// Creates a classifier from ranges in declared order.
    #[must_use]
    pub const fn new(ranges: Vec<AccountRange>) -> Self {
        Self { ranges }
    }

    /// Reads the chart of accounts from a table.
    ///
    /// Rows whose `Start` or `Ende` is not a whole number are skipped, and
    /// every pair of overlapping ranges is reported. A table without the two
    /// range columns yields an empty classifier.
    pub fn from_table(table: &Table, issues: &mut IssueLog) -> Self {
        for column in [START, END] {
            if table.column(column).is_none() {
                issues.record(Issue::MissingColumn {
                    table: table.name.clone(),
                    column: column.to_string(),
                });
                return Self::default();
            }
        }

        let mut ranges = Vec::new();
        for record in table.records() {
            let (Some(start), Some(end)) = (
                record.get(START).as_integer(),
                record.get(END).as_integer(),
            ) else {
                issues.record(Issue::InvalidTableRow {
                    table: table.name.clone(),
                    row: record.sheet_row(),
                    message: "account range bounds must be whole numbers".to_string(),
                });
                continue;
            };

            let mut range = AccountRange::new(
                start,
                end,
                record.get(TYPE1).as_text().unwrap_or_default(),
                record.get(TYPE2).as_text().unwrap_or_default(),
            );
            range.categories = CATEGORIES
                .iter()
                .filter_map(|header| record.get(header).as_text())
                .collect();
            ranges.push(range);
        }

        let classifier = Self::new(ranges);
        for (first, second) in classifier.overlaps() {
            issues.record(Issue::OverlappingAccountRanges {
                first: first.label(),
                second: second.label(),
            });
        }
        debug!(ranges = classifier.ranges.len(), "chart of accounts loaded");
        classifier
    }

    /// Classifies an account number; the first containing range wins.
    #[must_use]
    pub fn classify(&self, number: u64) -> Option<Account> {
        self.ranges
            .iter()
            .find(|range| range.contains(number))
            .map(|range| range.account(number))
    }

    /// Every pair of declared ranges that overlap, earlier range first.
    #[must_use]
    pub fn overlaps(&self) -> Vec<(&AccountRange, &AccountRange)> {
        let mut pairs = Vec::new();
        for (i, first) in self.ranges.iter().enumerate() {
            for second in &self.ranges[i + 1..] {
                if first.overlaps(second) {
                    pairs.push((first, second));
                }
            }
        }
        pairs
    }

    /// The ranges in declared order.
    #[must_use]
    pub fn ranges(&self) -> &[AccountRange] {
        &self.ranges
    }
}
