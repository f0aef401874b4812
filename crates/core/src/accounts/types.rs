//! Account range and classified account types.

use serde::{Deserialize, Serialize};

/// One row of the chart of accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRange {
    /// First account number of the range (inclusive).
    pub start: u64,
    /// Last account number of the range (inclusive).
    pub end: u64,
    /// Coarse account type (`Typ 1`).
    pub type1: String,
    /// Fine account type (`Typ 2`), e.g. `Ausgaben` or `Einnahmen`.
    pub type2: String,
    /// Up to three category labels.
    pub categories: Vec<String>,
}

impl AccountRange {
    /// Creates a range without categories.
    #[must_use]
    pub fn new(start: u64, end: u64, type1: impl Into<String>, type2: impl Into<String>) -> Self {
        Self {
            start,
            end,
            type1: type1.into(),
            type2: type2.into(),
            categories: Vec::new(),
        }
    }

    /// Returns true if `number` lies within the range.
    #[must_use]
    pub const fn contains(&self, number: u64) -> bool {
        self.start <= number && number <= self.end
    }

    /// Returns true if the two ranges share at least one number.
    #[must_use]
    pub const fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }

    /// `start-end` label used in diagnostics.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }

    /// Classifies `number` with this range's labels.
    #[must_use]
    pub fn account(&self, number: u64) -> Account {
        Account {
            number,
            type1: self.type1.clone(),
            type2: self.type2.clone(),
            categories: self.categories.clone(),
        }
    }
}

/// A classified account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    /// Account number.
    pub number: u64,
    /// Coarse account type.
    pub type1: String,
    /// Fine account type.
    pub type2: String,
    /// Category labels.
    pub categories: Vec<String>,
}
