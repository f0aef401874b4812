//! Normalized cost-location codes.
//!
//! Bookings, schema rows and plan rows spell the same cost location as `110`,
//! `"110"` or `"0110"`. All comparisons go through `CostLocationCode`, which
//! trims the text and zero-pads purely numeric codes to a fixed width.

use serde::{Deserialize, Serialize};

/// A cost-location code as attached to bookings and leaf rows.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CostLocationCode(String);

impl CostLocationCode {
    /// Normalizes raw text to a code, padding numeric codes to `digits`.
    ///
    /// Returns `None` for blank input.
    #[must_use]
    pub fn parse(raw: &str, digits: usize) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        if trimmed.bytes().all(|b| b.is_ascii_digit()) {
            if let Ok(number) = trimmed.parse::<u64>() {
                return Some(Self::from_number(number, digits));
            }
        }
        Some(Self(trimmed.to_string()))
    }

    /// Builds the padded code of a cost-location number.
    #[must_use]
    pub fn from_number(number: u64, digits: usize) -> Self {
        Self(format!("{number:0digits$}"))
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the numeric value if the code is purely numeric.
    #[must_use]
    pub fn number(&self) -> Option<u64> {
        if self.0.bytes().all(|b| b.is_ascii_digit()) {
            self.0.parse().ok()
        } else {
            None
        }
    }
}

impl std::fmt::Display for CostLocationCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("110", "0110")]
    #[case(" 0110 ", "0110")]
    #[case("4711", "4711")]
    #[case("12345", "12345")]
    #[case("A-12", "A-12")]
    fn test_parse_normalizes(#[case] raw: &str, #[case] expected: &str) {
        let code = CostLocationCode::parse(raw, 4).unwrap();
        assert_eq!(code.as_str(), expected);
    }

    #[test]
    fn test_blank_is_none() {
        assert!(CostLocationCode::parse("   ", 4).is_none());
    }

    #[test]
    fn test_number_round_trip() {
        let code = CostLocationCode::from_number(110, 4);
        assert_eq!(code.as_str(), "0110");
        assert_eq!(code.number(), Some(110));
        assert_eq!(CostLocationCode::parse("A-12", 4).unwrap().number(), None);
    }

    #[test]
    fn test_padded_codes_sort_numerically() {
        let mut codes = vec![
            CostLocationCode::from_number(1200, 4),
            CostLocationCode::from_number(110, 4),
        ];
        codes.sort();
        assert_eq!(codes[0].as_str(), "0110");
    }
}
