//! Spreadsheet serialization of cell expressions.
//!
//! Leaf cells become `SUMIFS` formulas over a per-report bookings sheet whose
//! columns are located by header; group cells reference their children's grid
//! cells. The output depends only on the report, so rendering twice yields the
//! same strings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use saldo_shared::config::BookingsSheetConfig;
use saldo_shared::types::{Cell, ReportId, Table};
use saldo_shared::{AppError, AppResult, ReportConfig};

use super::expression::{BookingsSum, ChildSum, Expression, SumMode};
use crate::layout::{Layout, SlotBand, column_letter};
use crate::ledger::{ClassifiedBooking, Side};

/// Content written into one report cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum CellContent {
    /// Nothing.
    Blank,
    /// A constant.
    Number(Decimal),
    /// A formula including the leading `=`.
    Formula(String),
}

/// Column order of the bookings sheet written next to each report.
#[must_use]
pub fn default_bookings_headers() -> Vec<String> {
    [
        "date",
        "cost_location",
        "booking_number",
        "debit_postingaccount_number",
        "debit_booking_type_1",
        "debit_booking_type_2",
        "debit_booking_categories",
        "credit_postingaccount_number",
        "credit_booking_type_1",
        "credit_booking_type_2",
        "credit_booking_categories",
        "postingtext",
        "amount",
        "currency",
    ]
    .iter()
    .map(|h| (*h).to_string())
    .collect()
}

/// Name of a report's bookings sheet.
#[must_use]
pub fn bookings_sheet_name(report: &ReportId, config: &BookingsSheetConfig) -> String {
    format!("{report}{}", config.sheet_suffix)
}

/// Builds a report's bookings sheet in [`default_bookings_headers`] order.
#[must_use]
pub fn bookings_table(
    report: &ReportId,
    bookings: &[ClassifiedBooking],
    config: &BookingsSheetConfig,
) -> Table {
    let mut table = Table::new(bookings_sheet_name(report, config), default_bookings_headers());
    for booking in bookings {
        let entry = booking.entry();
        let account_cells = |side: Side| {
            let account = booking.account(side);
            [
                Cell::from(Decimal::from(entry.account(side))),
                account.map_or(Cell::Empty, |a| Cell::from(a.type1.as_str())),
                account.map_or(Cell::Empty, |a| Cell::from(a.type2.as_str())),
                account.map_or(Cell::Empty, |a| Cell::from(a.categories.join(", ").as_str())),
            ]
        };

        let mut row = vec![
            Cell::from(entry.date),
            booking
                .cost_location()
                .map_or(Cell::Empty, |code| Cell::from(code.as_str())),
            Cell::from(entry.booking_number.as_str()),
        ];
        row.extend(account_cells(Side::Debit));
        row.extend(account_cells(Side::Credit));
        row.push(Cell::from(entry.posting_text.as_str()));
        row.push(Cell::from(entry.amount));
        row.push(Cell::from(entry.currency.as_str()));
        table.push_row(row);
    }
    table
}

/// Column letters of the bookings-sheet columns formulas filter on.
#[derive(Debug, Clone, PartialEq, Eq)]
struct BookingsColumns {
    amount: String,
    cost_location: String,
    date: String,
    debit_type2: String,
    credit_type2: String,
}

/// Renders the expressions of one report.
#[derive(Debug, Clone)]
pub struct FormulaRenderer {
    sheet: String,
    columns: BookingsColumns,
    first_row: u32,
    last_row: u32,
    has_bookings: bool,
}

impl FormulaRenderer {
    /// Creates a renderer for a report with `booking_count` bookings whose
    /// bookings sheet has the given headers.
    ///
    /// # Errors
    ///
    /// Returns `AppError::MissingColumn` if a filtered column is not among
    /// `headers`.
    pub fn new(
        config: &ReportConfig,
        report: &ReportId,
        headers: &[String],
        booking_count: usize,
    ) -> AppResult<Self> {
        let sheet_config = &config.bookings_sheet;
        let sheet = bookings_sheet_name(report, sheet_config);
        let letter = |header: &str| -> AppResult<String> {
            headers
                .iter()
                .position(|h| h.trim() == header)
                .and_then(|index| u32::try_from(index + 1).ok())
                .map(column_letter)
                .ok_or_else(|| AppError::MissingColumn {
                    table: sheet.clone(),
                    column: header.to_string(),
                })
        };
        let columns = BookingsColumns {
            amount: letter(&sheet_config.amount_header)?,
            cost_location: letter(&sheet_config.cost_location_header)?,
            date: letter(&sheet_config.date_header)?,
            debit_type2: letter(&sheet_config.debit_type2_header)?,
            credit_type2: letter(&sheet_config.credit_type2_header)?,
        };
        let count = u32::try_from(booking_count).map_err(|_| {
            AppError::Validation(format!("{booking_count} bookings exceed the sheet size"))
        })?;

        Ok(Self {
            sheet,
            columns,
            first_row: sheet_config.first_row,
            last_row: count.saturating_add(sheet_config.padding_rows),
            has_bookings: booking_count > 0,
        })
    }

    /// Renders every cell of a report.
    #[must_use]
    pub fn render_all(&self, cells: &[Vec<Expression>], layout: &Layout) -> Vec<Vec<CellContent>> {
        cells
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(slot, expression)| self.render(expression, &layout.bands[slot]))
                    .collect()
            })
            .collect()
    }

    /// Renders one cell of the given slot band.
    #[must_use]
    pub fn render(&self, expression: &Expression, band: &SlotBand) -> CellContent {
        match expression {
            Expression::Empty => CellContent::Blank,
            Expression::Zero => CellContent::Formula("=0".to_string()),
            Expression::Literal { value, .. } => CellContent::Number(*value),
            Expression::Bookings(_) if !self.has_bookings => CellContent::Blank,
            Expression::Bookings(sum) => CellContent::Formula(self.bookings_formula(sum, band)),
            Expression::Children(sum) => CellContent::Formula(children_formula(sum)),
        }
    }

    fn range(&self, column: &str) -> String {
        format!("'{}'!{column}{}:{column}{}", self.sheet, self.first_row, self.last_row)
    }

    fn bookings_formula(&self, sum: &BookingsSum, band: &SlotBand) -> String {
        let single = sum.locations.len() <= 1;
        let locations: Vec<String> = if single {
            vec![sum.cost_location_cell.absolute_column()]
        } else {
            sum.locations.iter().map(|code| format!("\"{code}\"")).collect()
        };

        let body = locations
            .iter()
            .map(|criterion| {
                sum.terms
                    .iter()
                    .enumerate()
                    .map(|(index, term)| {
                        let type2_column = match term.side {
                            Side::Debit => &self.columns.debit_type2,
                            Side::Credit => &self.columns.credit_type2,
                        };
                        let sumifs = self.sumifs(criterion, sum.window.is_some(), band, type2_column, &term.type2);
                        if index == 0 {
                            sumifs
                        } else {
                            format!("{}{sumifs}", term.sign.symbol())
                        }
                    })
                    .collect::<String>()
            })
            .collect::<Vec<_>>()
            .join("+");

        if sum.negate {
            format!("=-({body})")
        } else {
            format!("={body}")
        }
    }

    fn sumifs(
        &self,
        criterion: &str,
        dated: bool,
        band: &SlotBand,
        type2_column: &str,
        type2: &str,
    ) -> String {
        let mut args = vec![
            self.range(&self.columns.amount),
            self.range(&self.columns.cost_location),
            criterion.to_string(),
        ];
        if dated {
            let date = self.range(&self.columns.date);
            args.push(date.clone());
            args.push(format!("\">=\"&{}", band.start_date_cell().absolute_row()));
            args.push(date);
            args.push(format!("\"<\"&{}+1", band.end_date_cell().absolute_row()));
        }
        args.push(self.range(type2_column));
        args.push(format!("\"{type2}\""));
        format!("SUMIFS({})", args.join(","))
    }
}

fn children_formula(sum: &ChildSum) -> String {
    match sum.mode {
        SumMode::Net => {
            let parts: String = sum
                .terms
                .iter()
                .map(|term| format!("{}{}", term.sign.symbol(), term.cell))
                .collect();
            format!("={parts}")
        }
        SumMode::Homogeneous => match sum.terms.as_slice() {
            [] => "=0".to_string(),
            [only] => format!("={}", only.cell),
            [first, .., last] => {
                let same_column = sum.terms.iter().all(|t| t.cell.column == first.cell.column);
                let contiguous = sum.terms.windows(2).all(|w| w[1].row == w[0].row + 1);
                if same_column && contiguous {
                    format!("=SUM({}:{})", first.cell, last.cell)
                } else {
                    let refs: Vec<String> = sum.terms.iter().map(|t| t.cell.to_string()).collect();
                    format!("={}", refs.join("+"))
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::expression::{BookingTerm, ChildTerm, Sign};
    use crate::layout::GridRef;
    use chrono::NaiveDate;
    use saldo_shared::types::CostLocationCode;

    fn band() -> SlotBand {
        SlotBand {
            start_column: 4,
            end_column: 5,
            title_row: 3,
            start_date_row: 4,
            end_date_row: 5,
        }
    }

    fn renderer(booking_count: usize) -> FormulaRenderer {
        FormulaRenderer::new(
            &ReportConfig::default(),
            &ReportId::from("P1"),
            &default_bookings_headers(),
            booking_count,
        )
        .unwrap()
    }

    fn terms() -> Vec<BookingTerm> {
        let term = |sign, side, type2: &str| BookingTerm {
            sign,
            side,
            type2: type2.to_string(),
        };
        vec![
            term(Sign::Plus, Side::Debit, "Ausgaben"),
            term(Sign::Minus, Side::Credit, "Einnahmen"),
            term(Sign::Plus, Side::Debit, "Einnahmen"),
            term(Sign::Minus, Side::Credit, "Ausgaben"),
        ]
    }

    fn child(sign: Sign, row: usize, column: u32, sheet_row: u32) -> ChildTerm {
        ChildTerm {
            sign,
            row,
            cell: GridRef::new(column, sheet_row),
        }
    }

    #[test]
    fn test_single_location_formula() {
        let sum = BookingsSum {
            negate: false,
            locations: vec![CostLocationCode::from_number(110, 4)],
            window: NaiveDate::from_ymd_opt(2024, 1, 1).zip(NaiveDate::from_ymd_opt(2024, 3, 31)),
            cost_location_cell: GridRef::new(3, 8),
            terms: terms(),
        };
        let content = renderer(2).render(&Expression::Bookings(sum), &band());

        let sumifs = |column: &str, term: &str| {
            format!(
                "SUMIFS('P1 Buchungen'!M2:M102,'P1 Buchungen'!B2:B102,$C8,\
                 'P1 Buchungen'!A2:A102,\">=\"&E$4,'P1 Buchungen'!A2:A102,\"<\"&E$5+1,\
                 'P1 Buchungen'!{column}2:{column}102,\"{term}\")"
            )
        };
        let expected = format!(
            "={}-{}+{}-{}",
            sumifs("F", "Ausgaben"),
            sumifs("J", "Einnahmen"),
            sumifs("F", "Einnahmen"),
            sumifs("J", "Ausgaben")
        );
        assert_eq!(content, CellContent::Formula(expected));
    }

    #[test]
    fn test_multi_location_income_formula_without_dates() {
        let sum = BookingsSum {
            negate: true,
            locations: vec![
                CostLocationCode::from_number(110, 4),
                CostLocationCode::from_number(111, 4),
            ],
            window: None,
            cost_location_cell: GridRef::new(3, 8),
            terms: terms(),
        };
        let CellContent::Formula(formula) = renderer(1).render(&Expression::Bookings(sum), &band()) else {
            panic!("expected formula");
        };
        assert!(formula.starts_with("=-(SUMIFS("));
        assert!(formula.ends_with(")"));
        assert_eq!(formula.matches("SUMIFS(").count(), 8);
        assert!(formula.contains(",\"0110\","));
        assert!(formula.contains(",\"0111\","));
        assert!(!formula.contains("\">=\""));
        assert!(formula.contains("\"Ausgaben\")+SUMIFS("));
    }

    #[test]
    fn test_bookings_blank_without_bookings() {
        let sum = BookingsSum {
            negate: false,
            locations: vec![CostLocationCode::from_number(110, 4)],
            window: None,
            cost_location_cell: GridRef::new(3, 8),
            terms: terms(),
        };
        assert_eq!(
            renderer(0).render(&Expression::Bookings(sum), &band()),
            CellContent::Blank
        );
    }

    #[test]
    fn test_group_formulas() {
        let renderer = renderer(1);
        let one = ChildSum {
            mode: SumMode::Homogeneous,
            terms: vec![child(Sign::Plus, 2, 5, 9)],
        };
        let range = ChildSum {
            mode: SumMode::Homogeneous,
            terms: vec![child(Sign::Plus, 2, 5, 9), child(Sign::Plus, 3, 5, 10)],
        };
        let mixed_columns = ChildSum {
            mode: SumMode::Homogeneous,
            terms: vec![child(Sign::Plus, 2, 4, 9), child(Sign::Plus, 3, 5, 10)],
        };
        let net = ChildSum {
            mode: SumMode::Net,
            terms: vec![child(Sign::Plus, 1, 5, 8), child(Sign::Minus, 2, 5, 9)],
        };

        let render = |sum: ChildSum| renderer.render(&Expression::Children(sum), &band());
        assert_eq!(render(one), CellContent::Formula("=E9".into()));
        assert_eq!(render(range), CellContent::Formula("=SUM(E9:E10)".into()));
        assert_eq!(render(mixed_columns), CellContent::Formula("=D9+E10".into()));
        assert_eq!(render(net), CellContent::Formula("=+E8-E9".into()));
        assert_eq!(
            renderer.render(&Expression::Zero, &band()),
            CellContent::Formula("=0".into())
        );
    }

    #[test]
    fn test_missing_header_is_error() {
        let headers = vec!["date".to_string(), "amount".to_string()];
        let err = FormulaRenderer::new(&ReportConfig::default(), &ReportId::from("P1"), &headers, 3)
            .unwrap_err();
        assert!(matches!(
            err,
            AppError::MissingColumn { ref table, ref column }
                if table == "P1 Buchungen" && column == "cost_location"
        ));
    }
}
