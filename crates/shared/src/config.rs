//! Report configuration management.
//!
//! One `ReportConfig` is loaded (or defaulted) per run and injected into the
//! schema compiler, the layout engine, the formula synthesizer and the
//! assembler. Every field carries a serde default so partial config files work.

use serde::Deserialize;

use crate::error::{AppError, AppResult};

/// Report configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Grid geometry settings.
    pub layout: LayoutConfig,
    /// Locale-dependent vocabulary.
    pub terms: TermsConfig,
    /// Bookings sheet conventions used by formula serialization.
    pub bookings_sheet: BookingsSheetConfig,
    /// Width cost-location codes are zero-padded to.
    #[serde(default = "default_cost_location_digits")]
    pub cost_location_digits: usize,
}

fn default_cost_location_digits() -> usize {
    4
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            terms: TermsConfig::default(),
            bookings_sheet: BookingsSheetConfig::default(),
            cost_location_digits: default_cost_location_digits(),
        }
    }
}

/// Grid geometry configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Row holding the slot titles; the two date rows follow it.
    pub slot_header_row: u32,
    /// Rows the cursor advances per report row.
    pub row_stride: u32,
    /// First (leftmost) column of the report, 1-based.
    pub first_column: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            slot_header_row: 3,
            row_stride: 1,
            first_column: 1,
        }
    }
}

impl LayoutConfig {
    /// Row of the first report row, below the slot header block.
    #[must_use]
    pub const fn first_data_row(&self) -> u32 {
        self.slot_header_row + 4
    }
}

/// Vocabulary used in schema tables and in the chart of accounts.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TermsConfig {
    /// `Typ 2` value of income accounts.
    pub income_type2: String,
    /// `Typ 2` value of expense accounts.
    pub expense_type2: String,
    /// `Typ 2` value of asset accounts.
    pub asset_type2: String,
    /// `Typ 2` value of liability accounts.
    pub liability_type2: String,
    /// Accepted spellings of the `income` row type (case-insensitive).
    pub income_synonyms: Vec<String>,
    /// Accepted spellings of the `expense` row type (case-insensitive).
    pub expense_synonyms: Vec<String>,
    /// Accepted spellings of the `group` row type (case-insensitive).
    pub group_synonyms: Vec<String>,
    /// Slot literals that mean "sum of the child cells".
    pub field_sum_keywords: Vec<String>,
    /// Slot literals that mean "sum of the bookings".
    pub bookings_keywords: Vec<String>,
    /// Cost-location plan `type` spellings meaning income.
    pub plan_income_synonyms: Vec<String>,
    /// Cost-location plan `type` spellings meaning expense.
    pub plan_expense_synonyms: Vec<String>,
    /// Cost-location plan `type` spellings meaning budget.
    pub plan_budget_synonyms: Vec<String>,
}

fn strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

impl Default for TermsConfig {
    fn default() -> Self {
        Self {
            income_type2: "Einnahmen".to_string(),
            expense_type2: "Ausgaben".to_string(),
            asset_type2: "Activa".to_string(),
            liability_type2: "Passiva".to_string(),
            income_synonyms: strings(&["income", "einnahmen"]),
            expense_synonyms: strings(&["expense", "ausgaben"]),
            group_synonyms: strings(&["group", "gruppe"]),
            field_sum_keywords: strings(&["sum", "fieldsum", "summe", "cellsum"]),
            bookings_keywords: strings(&["bookings", "buchungen"]),
            plan_income_synonyms: strings(&["income", "Einnahmen"]),
            plan_expense_synonyms: strings(&["expense", "Ausgaben"]),
            plan_budget_synonyms: strings(&["budget"]),
        }
    }
}

impl TermsConfig {
    /// Returns true if `value` matches one of `synonyms`, ignoring case.
    #[must_use]
    pub fn matches(synonyms: &[String], value: &str) -> bool {
        let value = value.trim();
        synonyms.iter().any(|s| s.eq_ignore_ascii_case(value))
    }
}

/// Conventions of the per-report bookings sheet that formulas reference.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BookingsSheetConfig {
    /// Appended to the report id to name the bookings sheet.
    pub sheet_suffix: String,
    /// Header of the cost-location column.
    pub cost_location_header: String,
    /// Header of the booking date column.
    pub date_header: String,
    /// Header of the amount column.
    pub amount_header: String,
    /// Header of the debit account `Typ 2` column.
    pub debit_type2_header: String,
    /// Header of the credit account `Typ 2` column.
    pub credit_type2_header: String,
    /// First data row below the header row.
    pub first_row: u32,
    /// Extra rows covered by formula ranges beyond the last booking.
    pub padding_rows: u32,
}

impl Default for BookingsSheetConfig {
    fn default() -> Self {
        Self {
            sheet_suffix: " Buchungen".to_string(),
            cost_location_header: "cost_location".to_string(),
            date_header: "date".to_string(),
            amount_header: "amount".to_string(),
            debit_type2_header: "debit_booking_type_2".to_string(),
            credit_type2_header: "credit_booking_type_2".to_string(),
            first_row: 2,
            padding_rows: 100,
        }
    }
}

impl ReportConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded or is invalid.
    pub fn load() -> AppResult<Self> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("SALDO").separator("__"))
            .build()?;

        let loaded: Self = config.try_deserialize()?;
        loaded.validate()?;
        Ok(loaded)
    }

    /// Checks invariants the layout and code normalization rely on.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Validation` for a zero row stride or a zero
    /// cost-location width.
    pub fn validate(&self) -> AppResult<()> {
        if self.layout.row_stride == 0 {
            return Err(AppError::Validation(
                "layout.row_stride must be at least 1".to_string(),
            ));
        }
        if self.layout.first_column == 0 {
            return Err(AppError::Validation(
                "layout.first_column is 1-based and must be at least 1".to_string(),
            ));
        }
        if self.cost_location_digits == 0 {
            return Err(AppError::Validation(
                "cost_location_digits must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = ReportConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.cost_location_digits, 4);
        assert_eq!(config.layout.first_data_row(), 7);
        assert_eq!(config.terms.expense_type2, "Ausgaben");
    }

    #[test]
    fn test_zero_stride_rejected() {
        let mut config = ReportConfig::default();
        config.layout.row_stride = 0;
        assert!(matches!(config.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_zero_digits_rejected() {
        let config = ReportConfig {
            cost_location_digits: 0,
            ..ReportConfig::default()
        };
        assert!(matches!(config.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_terms_match_ignores_case() {
        let terms = TermsConfig::default();
        assert!(TermsConfig::matches(&terms.expense_synonyms, "Ausgaben"));
        assert!(TermsConfig::matches(&terms.bookings_keywords, " BOOKINGS "));
        assert!(!TermsConfig::matches(&terms.group_synonyms, "expense"));
    }

    #[test]
    fn test_load_without_sources_matches_default() {
        temp_env::with_vars_unset(["SALDO__LAYOUT__ROW_STRIDE", "RUN_MODE"], || {
            let loaded = ReportConfig::load().expect("defaults load");
            assert_eq!(loaded.layout.row_stride, 1);
            assert_eq!(loaded.bookings_sheet.sheet_suffix, " Buchungen");
        });
    }

    #[test]
    fn test_load_reads_environment() {
        temp_env::with_var("SALDO__LAYOUT__ROW_STRIDE", Some("3"), || {
            let loaded = ReportConfig::load().expect("env config loads");
            assert_eq!(loaded.layout.row_stride, 3);
        });
    }

    #[test]
    fn test_load_rejects_invalid_environment() {
        temp_env::with_var("SALDO__LAYOUT__ROW_STRIDE", Some("0"), || {
            assert!(matches!(ReportConfig::load(), Err(AppError::Validation(_))));
        });
    }
}
