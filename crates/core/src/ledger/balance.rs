//! Per-account balance summaries.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::enrich::ClassifiedBooking;
use super::entry::Side;
use crate::accounts::Account;

/// Debit/credit movement of one account over a set of bookings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountBalance {
    /// Account number.
    pub number: u64,
    /// Classification, `None` if the number matched no range.
    pub account: Option<Account>,
    /// Total debit amount.
    pub debit_total: Decimal,
    /// Total credit amount.
    pub credit_total: Decimal,
    /// `debit_total - credit_total`.
    pub balance: Decimal,
    /// Number of bookings touching the account.
    pub bookings: usize,
}

impl AccountBalance {
    /// Creates an empty balance.
    #[must_use]
    pub const fn new(number: u64, account: Option<Account>) -> Self {
        Self {
            number,
            account,
            debit_total: Decimal::ZERO,
            credit_total: Decimal::ZERO,
            balance: Decimal::ZERO,
            bookings: 0,
        }
    }

    /// Adds a debit amount.
    pub fn add_debit(&mut self, amount: Decimal) {
        self.debit_total = self.debit_total.saturating_add(amount);
        self.balance = self.debit_total.saturating_sub(self.credit_total);
    }

    /// Adds a credit amount.
    pub fn add_credit(&mut self, amount: Decimal) {
        self.credit_total = self.credit_total.saturating_add(amount);
        self.balance = self.debit_total.saturating_sub(self.credit_total);
    }
}

/// Summarizes every account touched by a booking, ordered by number.
///
/// A booking whose debit and credit account coincide counts once.
#[must_use]
pub fn summarize_accounts(bookings: &[ClassifiedBooking]) -> BTreeMap<u64, AccountBalance> {
    let mut accounts: BTreeMap<u64, AccountBalance> = BTreeMap::new();
    for booking in bookings {
        for side in [Side::Debit, Side::Credit] {
            let number = booking.entry().account(side);
            let balance = accounts
                .entry(number)
                .or_insert_with(|| AccountBalance::new(number, booking.account(side).cloned()));
            match side {
                Side::Debit => balance.add_debit(booking.amount()),
                Side::Credit => balance.add_credit(booking.amount()),
            }
        }
        let debit = booking.entry().debit_account;
        let credit = booking.entry().credit_account;
        for number in [debit, credit] {
            if let Some(balance) = accounts.get_mut(&number) {
                balance.bookings += 1;
            }
            if debit == credit {
                break;
            }
        }
    }
    accounts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::{AccountClassifier, AccountRange};
    use crate::issue::IssueLog;
    use crate::ledger::{BookingEnricher, LedgerEntry};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use saldo_shared::ReportConfig;

    #[test]
    fn test_summarize_accounts() {
        let classifier = AccountClassifier::new(vec![
            AccountRange::new(1000, 1999, "asset", "Activa"),
            AccountRange::new(2000, 2999, "expense", "Ausgaben"),
        ]);
        let date = NaiveDate::from_ymd_opt(2024, 1, 10).unwrap();
        let entries = vec![
            LedgerEntry::new("1", date, dec!(100), 2100, 1200),
            LedgerEntry::new("2", date, dec!(30), 1200, 2100),
            LedgerEntry::new("3", date, dec!(5), 2100, 9999),
        ];
        let mut issues = IssueLog::new();
        let bookings = BookingEnricher::new(&classifier, &ReportConfig::default())
            .enrich(entries, &mut issues);

        let accounts = summarize_accounts(&bookings);

        let numbers: Vec<u64> = accounts.keys().copied().collect();
        assert_eq!(numbers, vec![1200, 2100, 9999]);

        let expense = &accounts[&2100];
        assert_eq!(expense.debit_total, dec!(105));
        assert_eq!(expense.credit_total, dec!(30));
        assert_eq!(expense.balance, dec!(75));
        assert_eq!(expense.bookings, 3);
        assert_eq!(expense.account.as_ref().unwrap().type2, "Ausgaben");

        assert!(accounts[&9999].account.is_none());
        assert_eq!(accounts[&9999].balance, dec!(-5));
    }
}
