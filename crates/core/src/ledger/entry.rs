//! Ledger entry domain types.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Side of a double-entry booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Debit side.
    Debit,
    /// Credit side.
    Credit,
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debit => f.write_str("debit"),
            Self::Credit => f.write_str("credit"),
        }
    }
}

/// One double-entry booking as delivered by the ledger collaborator.
///
/// Every booking moves `amount` from the credit account to the debit account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Booking number from the accounting system.
    pub booking_number: String,
    /// Booking date.
    pub date: NaiveDate,
    /// Booked amount.
    pub amount: Decimal,
    /// Debit account number.
    pub debit_account: u64,
    /// Credit account number.
    pub credit_account: u64,
    /// Raw cost-location text, if the booking has one.
    #[serde(default)]
    pub cost_location: Option<String>,
    /// Posting text.
    #[serde(default)]
    pub posting_text: String,
    /// Currency code.
    #[serde(default)]
    pub currency: String,
}

impl LedgerEntry {
    /// Creates an entry without cost location or texts.
    #[must_use]
    pub fn new(
        booking_number: impl Into<String>,
        date: NaiveDate,
        amount: Decimal,
        debit_account: u64,
        credit_account: u64,
    ) -> Self {
        Self {
            booking_number: booking_number.into(),
            date,
            amount,
            debit_account,
            credit_account,
            cost_location: None,
            posting_text: String::new(),
            currency: String::new(),
        }
    }

    /// Attaches a cost location.
    #[must_use]
    pub fn with_cost_location(mut self, cost_location: impl Into<String>) -> Self {
        self.cost_location = Some(cost_location.into());
        self
    }

    /// Account number on the given side.
    #[must_use]
    pub const fn account(&self, side: Side) -> u64 {
        match side {
            Side::Debit => self.debit_account,
            Side::Credit => self.credit_account,
        }
    }
}
