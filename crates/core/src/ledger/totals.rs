//! Typed totals over classified bookings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use saldo_shared::config::TermsConfig;

use super::enrich::ClassifiedBooking;
use super::entry::Side;

/// Revenue, expense, asset and liability totals of a set of bookings.
///
/// Revenue and liability are credit-normal, expense and asset debit-normal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerTotals {
    /// Credit minus debit on income accounts.
    pub revenue: Decimal,
    /// Debit minus credit on expense accounts.
    pub expense: Decimal,
    /// Debit minus credit on asset accounts.
    pub asset: Decimal,
    /// Credit minus debit on liability accounts.
    pub liability: Decimal,
    /// `asset - liability`.
    pub stock: Decimal,
    /// `revenue - expense`.
    pub profit_and_loss: Decimal,
}

impl LedgerTotals {
    /// Adds up bookings, skipping any booking with an unclassified side.
    pub fn from_bookings<'a>(
        bookings: impl IntoIterator<Item = &'a ClassifiedBooking>,
        terms: &TermsConfig,
    ) -> Self {
        let mut totals = Self::default();
        for booking in bookings.into_iter().filter(|b| b.is_classified()) {
            totals.add(booking, terms);
        }
        totals.stock = totals.asset.saturating_sub(totals.liability);
        totals.profit_and_loss = totals.revenue.saturating_sub(totals.expense);
        totals
    }

    fn add(&mut self, booking: &ClassifiedBooking, terms: &TermsConfig) {
        let amount = booking.amount();
        for side in [Side::Debit, Side::Credit] {
            let Some(type2) = booking.type2(side) else {
                continue;
            };
            // debit-normal change for this side
            let change = match side {
                Side::Debit => amount,
                Side::Credit => -amount,
            };
            if type2 == terms.income_type2 {
                self.revenue = self.revenue.saturating_sub(change);
            } else if type2 == terms.expense_type2 {
                self.expense = self.expense.saturating_add(change);
            } else if type2 == terms.asset_type2 {
                self.asset = self.asset.saturating_add(change);
            } else if type2 == terms.liability_type2 {
                self.liability = self.liability.saturating_sub(change);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use saldo_shared::ReportConfig;

    use super::LedgerTotals;
    use crate::accounts::{AccountClassifier, AccountRange};
    use crate::issue::IssueLog;
    use crate::ledger::{BookingEnricher, LedgerEntry};

    #[test]
    fn test_totals_saturate_at_decimal_range() {
        let config = ReportConfig::default();
        let classifier = AccountClassifier::new(vec![
            AccountRange::new(1000, 1999, "asset", "Activa"),
            AccountRange::new(4000, 4999, "expense", "Ausgaben"),
        ]);
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let entries = vec![
            LedgerEntry::new("1", date, Decimal::MAX, 4000, 1000),
            LedgerEntry::new("2", date, Decimal::MAX, 4000, 1000),
        ];
        let bookings =
            BookingEnricher::new(&classifier, &config).enrich(entries, &mut IssueLog::new());

        let totals = LedgerTotals::from_bookings(&bookings, &config.terms);

        assert_eq!(totals.expense, Decimal::MAX);
        assert_eq!(totals.asset, Decimal::MIN);
        assert_eq!(totals.profit_and_loss, Decimal::MIN);
    }
}
