//! Slot-cell literal grammar.
//!
//! ```text
//! <empty>               Empty
//! sum | fieldsum | ...  FieldSum
//! bookings | buchungen  BookingsSum
//! <number>              Budget(relative)
//! <number>:!            Budget(absolute)
//! <number>:+<flat>      Budget(exceedable, extended = limit + flat)
//! <number>:+<pct>%      Budget(exceedable, extended = limit * (1 + pct/100))
//! ```

use std::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

use saldo_shared::config::TermsConfig;
use saldo_shared::types::Cell;

use super::types::{AggregationSpec, LimitType};

/// Reasons a slot literal is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    /// The limit or extension is not a number.
    #[error("'{0}' is not a number")]
    InvalidNumber(String),
    /// The part after `:` is neither `!` nor `+<value>`.
    #[error("unknown limit suffix '{0}'")]
    UnknownSuffix(String),
    /// The cell holds a date.
    #[error("a date is not a slot literal")]
    Date,
    /// The extended limit exceeds the decimal range.
    #[error("extended limit of '{0}' overflows")]
    Overflow(String),
}

/// Parses one slot cell.
pub fn parse_literal(cell: &Cell, terms: &TermsConfig) -> Result<AggregationSpec, LiteralError> {
    match cell {
        Cell::Number(limit) => Ok(relative(*limit)),
        Cell::Date(_) => Err(LiteralError::Date),
        Cell::Empty | Cell::Text(_) => match cell.as_str() {
            None => Ok(AggregationSpec::Empty),
            Some(text) => parse_text(text, terms),
        },
    }
}

fn parse_text(text: &str, terms: &TermsConfig) -> Result<AggregationSpec, LiteralError> {
    if TermsConfig::matches(&terms.field_sum_keywords, text) {
        return Ok(AggregationSpec::FieldSum);
    }
    if TermsConfig::matches(&terms.bookings_keywords, text) {
        return Ok(AggregationSpec::BookingsSum);
    }

    let Some((limit, suffix)) = text.split_once(':') else {
        return Ok(relative(number(text)?));
    };
    let limit = number(limit)?;
    let suffix = suffix.trim();

    if suffix == "!" {
        return Ok(AggregationSpec::Budget {
            limit,
            limit_type: LimitType::Absolute,
            extended_limit: None,
        });
    }
    let Some(extension) = suffix.strip_prefix('+') else {
        return Err(LiteralError::UnknownSuffix(suffix.to_string()));
    };
    let extended_limit = match extension.strip_suffix('%') {
        Some(pct) => number(pct)?
            .checked_div(Decimal::ONE_HUNDRED)
            .and_then(|share| share.checked_add(Decimal::ONE))
            .and_then(|factor| limit.checked_mul(factor)),
        None => limit.checked_add(number(extension)?),
    }
    .ok_or_else(|| LiteralError::Overflow(text.to_string()))?;
    Ok(AggregationSpec::Budget {
        limit,
        limit_type: LimitType::Exceedable,
        extended_limit: Some(extended_limit),
    })
}

const fn relative(limit: Decimal) -> AggregationSpec {
    AggregationSpec::Budget {
        limit,
        limit_type: LimitType::Relative,
        extended_limit: None,
    }
}

fn number(text: &str) -> Result<Decimal, LiteralError> {
    let text = text.trim();
    Decimal::from_str(text).map_err(|_| LiteralError::InvalidNumber(text.to_string()))
}
