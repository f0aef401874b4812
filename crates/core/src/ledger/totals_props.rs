//! Property-based tests for ledger totals.
//!
//! Feature: ledger-totals
//! - Property 5: Derived totals
//! - Property 6: Unclassified bookings are excluded

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;

use saldo_shared::ReportConfig;

use super::enrich::BookingEnricher;
use super::entry::LedgerEntry;
use super::totals::LedgerTotals;
use crate::accounts::{AccountClassifier, AccountRange};
use crate::issue::IssueLog;

/// Chart with one block per type2 term; 9000+ is unclassified.
fn classifier() -> AccountClassifier {
    AccountClassifier::new(vec![
        AccountRange::new(1000, 1999, "asset", "Activa"),
        AccountRange::new(2000, 2999, "liability", "Passiva"),
        AccountRange::new(3000, 3999, "income", "Einnahmen"),
        AccountRange::new(4000, 4999, "expense", "Ausgaben"),
    ])
}

/// Strategy to generate positive amounts (0.01 to 10,000.00).
fn positive_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate an account number, sometimes unclassified.
fn account_number() -> impl Strategy<Value = u64> {
    prop_oneof![1000u64..5000, 9000u64..9100]
}

/// Strategy to generate ledger entries.
fn entries() -> impl Strategy<Value = Vec<LedgerEntry>> {
    prop::collection::vec((positive_amount(), account_number(), account_number()), 0..30).prop_map(
        |rows| {
            let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
            rows.into_iter()
                .enumerate()
                .map(|(i, (amount, debit, credit))| {
                    LedgerEntry::new(i.to_string(), date, amount, debit, credit)
                })
                .collect()
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property 5: Derived totals
    /// stock = asset - liability and profit_and_loss = revenue - expense.
    #[test]
    fn prop_derived_totals(entries in entries()) {
        let config = ReportConfig::default();
        let classifier = classifier();
        let mut issues = IssueLog::new();
        let bookings = BookingEnricher::new(&classifier, &config).enrich(entries, &mut issues);

        let totals = LedgerTotals::from_bookings(&bookings, &config.terms);

        prop_assert_eq!(totals.stock, totals.asset - totals.liability);
        prop_assert_eq!(totals.profit_and_loss, totals.revenue - totals.expense);
    }

    /// Property 6: Unclassified bookings are excluded
    /// Adding bookings with an unclassified side leaves the totals unchanged.
    #[test]
    fn prop_unclassified_excluded(
        entries in entries(),
        amount in positive_amount(),
        known in 1000u64..5000,
    ) {
        let config = ReportConfig::default();
        let classifier = classifier();
        let mut issues = IssueLog::new();
        let enricher = BookingEnricher::new(&classifier, &config);

        let bookings = enricher.enrich(entries.clone(), &mut issues);
        let before = LedgerTotals::from_bookings(&bookings, &config.terms);

        let date = NaiveDate::from_ymd_opt(2024, 6, 2).unwrap();
        let mut more = entries;
        more.push(LedgerEntry::new("x", date, amount, 9050, known));
        let bookings = enricher.enrich(more, &mut issues);
        let after = LedgerTotals::from_bookings(&bookings, &config.terms);

        prop_assert_eq!(before, after);
    }
}
