//! Property-based tests for the account classifier.
//!
//! Feature: account-classification
//! - Property 1: Range classification
//! - Property 2: First match wins

use proptest::prelude::*;

use super::classifier::AccountClassifier;
use super::types::AccountRange;

/// Chart with an expense block between two other blocks.
fn chart() -> AccountClassifier {
    AccountClassifier::new(vec![
        AccountRange::new(0, 199, "asset", "Activa"),
        AccountRange::new(200, 299, "expense", "Ausgaben"),
        AccountRange::new(300, 399, "income", "Einnahmen"),
    ])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property 1: Range classification
    /// Every number in 200..=299 classifies as ('expense', 'Ausgaben').
    #[test]
    fn prop_numbers_in_range_classify(number in 200u64..=299) {
        let account = chart().classify(number).unwrap();
        prop_assert_eq!(account.type1, "expense");
        prop_assert_eq!(account.type2, "Ausgaben");
        prop_assert_eq!(account.number, number);
    }

    /// Property 1: Range classification
    /// Numbers beyond every range are not found.
    #[test]
    fn prop_numbers_outside_not_found(number in 400u64..100_000) {
        prop_assert!(chart().classify(number).is_none());
    }

    /// Property 2: First match wins
    /// With two overlapping ranges, the earlier one classifies the overlap.
    #[test]
    fn prop_first_match_wins(
        start in 0u64..1000,
        len in 1u64..100,
        shift in 0u64..50,
    ) {
        let first = AccountRange::new(start, start + len, "first", "A");
        let second = AccountRange::new(start + shift.min(len), start + len + 10, "second", "B");
        let classifier = AccountClassifier::new(vec![first, second]);

        for number in start + shift.min(len)..=start + len {
            prop_assert_eq!(classifier.classify(number).unwrap().type1, "first");
        }
        prop_assert_eq!(classifier.overlaps().len(), 1);
    }
}
