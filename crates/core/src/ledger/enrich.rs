//! Booking enrichment.
//!
//! Aggregation reads account types from bookings, so it must never see a
//! booking that has not been through classification. [`ClassifiedBooking`]
//! has no public constructor: the only way to obtain one is
//! [`BookingEnricher::enrich`].

use serde::Serialize;
use tracing::info;

use saldo_shared::types::CostLocationCode;
use saldo_shared::ReportConfig;

use super::entry::{LedgerEntry, Side};
use crate::accounts::{Account, AccountClassifier};
use crate::issue::{Issue, IssueLog};

/// A ledger entry joined with its account classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifiedBooking {
    entry: LedgerEntry,
    cost_location: Option<CostLocationCode>,
    debit: Option<Account>,
    credit: Option<Account>,
}

impl ClassifiedBooking {
    /// The underlying ledger entry.
    #[must_use]
    pub const fn entry(&self) -> &LedgerEntry {
        &self.entry
    }

    /// Normalized cost location.
    #[must_use]
    pub const fn cost_location(&self) -> Option<&CostLocationCode> {
        self.cost_location.as_ref()
    }

    /// Booking date.
    #[must_use]
    pub const fn date(&self) -> chrono::NaiveDate {
        self.entry.date
    }

    /// Booked amount.
    #[must_use]
    pub const fn amount(&self) -> rust_decimal::Decimal {
        self.entry.amount
    }

    /// Classified account on one side, `None` if the number matched no range.
    #[must_use]
    pub const fn account(&self, side: Side) -> Option<&Account> {
        match side {
            Side::Debit => self.debit.as_ref(),
            Side::Credit => self.credit.as_ref(),
        }
    }

    /// `Typ 2` of the account on one side.
    #[must_use]
    pub fn type2(&self, side: Side) -> Option<&str> {
        self.account(side).map(|a| a.type2.as_str())
    }

    /// Returns true if both sides were classified.
    #[must_use]
    pub const fn is_classified(&self) -> bool {
        self.debit.is_some() && self.credit.is_some()
    }
}

/// Joins ledger entries with the chart of accounts.
#[derive(Debug, Clone, Copy)]
pub struct BookingEnricher<'a> {
    classifier: &'a AccountClassifier,
    digits: usize,
}

impl<'a> BookingEnricher<'a> {
    /// Creates an enricher over a classifier.
    #[must_use]
    pub const fn new(classifier: &'a AccountClassifier, config: &ReportConfig) -> Self {
        Self {
            classifier,
            digits: config.cost_location_digits,
        }
    }

    /// Classifies both sides of every entry and normalizes cost locations.
    ///
    /// Unclassified sides are recorded as issues; the booking is kept.
    pub fn enrich(&self, entries: Vec<LedgerEntry>, issues: &mut IssueLog) -> Vec<ClassifiedBooking> {
        let bookings: Vec<ClassifiedBooking> = entries
            .into_iter()
            .map(|entry| self.enrich_one(entry, issues))
            .collect();
        let unclassified = bookings.iter().filter(|b| !b.is_classified()).count();
        info!(
            bookings = bookings.len(),
            unclassified, "ledger entries enriched"
        );
        bookings
    }

    fn enrich_one(&self, entry: LedgerEntry, issues: &mut IssueLog) -> ClassifiedBooking {
        let mut classify = |side: Side| {
            let number = entry.account(side);
            let account = self.classifier.classify(number);
            if account.is_none() {
                issues.record(Issue::UnclassifiedAccount {
                    booking: entry.booking_number.clone(),
                    account: number,
                    side,
                });
            }
            account
        };
        let debit = classify(Side::Debit);
        let credit = classify(Side::Credit);
        let cost_location = entry
            .cost_location
            .as_deref()
            .and_then(|raw| CostLocationCode::parse(raw, self.digits));

        ClassifiedBooking {
            entry,
            cost_location,
            debit,
            credit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::accounts::AccountRange;
    use crate::issue::IssueCategory;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn classifier() -> AccountClassifier {
        AccountClassifier::new(vec![
            AccountRange::new(1000, 1999, "asset", "Activa"),
            AccountRange::new(4000, 4999, "income", "Einnahmen"),
        ])
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 2).unwrap()
    }

    #[test]
    fn test_enrich_classifies_and_normalizes() {
        let classifier = classifier();
        let enricher = BookingEnricher::new(&classifier, &ReportConfig::default());
        let mut issues = IssueLog::new();
        let entry = LedgerEntry::new("1", date(), dec!(200), 1200, 4100).with_cost_location(" 110 ");

        let bookings = enricher.enrich(vec![entry], &mut issues);

        assert!(issues.is_empty());
        assert!(bookings[0].is_classified());
        assert_eq!(bookings[0].type2(Side::Credit), Some("Einnahmen"));
        assert_eq!(bookings[0].cost_location().unwrap().as_str(), "0110");
    }

    #[test]
    fn test_unclassified_side_is_flagged_and_kept() {
        let classifier = classifier();
        let enricher = BookingEnricher::new(&classifier, &ReportConfig::default());
        let mut issues = IssueLog::new();
        let entry = LedgerEntry::new("7", date(), dec!(50), 9000, 1200);

        let bookings = enricher.enrich(vec![entry], &mut issues);

        assert_eq!(bookings.len(), 1);
        assert!(!bookings[0].is_classified());
        assert!(bookings[0].account(Side::Debit).is_none());
        assert_eq!(issues.in_category(IssueCategory::ClassificationMiss).count(), 1);
        assert_eq!(
            issues.issues()[0],
            Issue::UnclassifiedAccount {
                booking: "7".into(),
                account: 9000,
                side: Side::Debit
            }
        );
    }

    #[test]
    fn test_blank_cost_location_is_none() {
        let classifier = classifier();
        let enricher = BookingEnricher::new(&classifier, &ReportConfig::default());
        let mut issues = IssueLog::new();
        let entry = LedgerEntry::new("2", date(), dec!(1), 1200, 4100).with_cost_location("  ");

        let bookings = enricher.enrich(vec![entry], &mut issues);
        assert!(bookings[0].cost_location().is_none());
    }
}
