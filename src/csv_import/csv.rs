//! Row parsing for the bank's transaction-history CSV export.
//!
//! The export has one header row, then data rows with at least eight
//! columns. The columns this app reads are fixed by the bank's format:
//! date, payee name, the bank's own category hint, and a signed amount that
//! may carry a dollar sign and thousands separators.

use csv::StringRecord;
use time::{Date, Month};

/// The column holding the transaction date, formatted `MM/DD/YY`.
const DATE_COLUMN: usize = 2;
/// The column holding the payee name.
const NAME_COLUMN: usize = 3;
/// The column holding the bank's category hint.
const CATEGORY_COLUMN: usize = 5;
/// The column holding the signed amount, e.g. `-$1,234.56`.
const AMOUNT_COLUMN: usize = 7;
/// Rows with fewer columns than this are skipped.
const MIN_COLUMNS: usize = 8;

/// One data row of the bank export, before classification.
#[derive(Debug, Clone, PartialEq)]
pub struct StatementRow {
    /// When the transaction happened.
    pub date: Date,
    /// The payee name.
    pub name: String,
    /// The bank's category hint, used when no prior categorization exists.
    pub category_hint: String,
    /// The signed amount: positive for money in, zero or negative for money
    /// out.
    pub amount: f64,
}

/// Parse one data row of the export.
///
/// Returns `None` for rows that should be skipped: too few columns, an
/// unparseable date, or an unparseable amount. Skips are logged at `warn`
/// with `record_number` (1-based, counting the header) and never fail the
/// import.
pub fn parse_statement_row(record: &StringRecord, record_number: u64) -> Option<StatementRow> {
    if record.len() < MIN_COLUMNS {
        tracing::warn!(
            "skipping row {record_number}: want at least {MIN_COLUMNS} columns, got {}",
            record.len()
        );
        return None;
    }

    let date = match parse_statement_date(&record[DATE_COLUMN]) {
        Some(date) => date,
        None => {
            tracing::warn!(
                "skipping row {record_number}: could not parse \"{}\" as a MM/DD/YY date",
                &record[DATE_COLUMN]
            );
            return None;
        }
    };

    let amount = match parse_statement_amount(&record[AMOUNT_COLUMN]) {
        Some(amount) => amount,
        None => {
            tracing::warn!(
                "skipping row {record_number}: could not parse \"{}\" as an amount",
                &record[AMOUNT_COLUMN]
            );
            return None;
        }
    };

    Some(StatementRow {
        date,
        name: record[NAME_COLUMN].to_owned(),
        category_hint: record[CATEGORY_COLUMN].to_owned(),
        amount,
    })
}

/// Parse a `MM/DD/YY` date. Two-digit years are read as 20YY.
fn parse_statement_date(text: &str) -> Option<Date> {
    let mut parts = text.split('/');
    let month: u8 = parts.next()?.parse().ok()?;
    let day: u8 = parts.next()?.parse().ok()?;
    let year_part = parts.next()?;

    if parts.next().is_some() || year_part.len() != 2 {
        return None;
    }
    let year: i32 = year_part.parse().ok()?;

    let month = Month::try_from(month).ok()?;
    Date::from_calendar_date(2000 + year, month, day).ok()
}

/// Parse an amount string, stripping all `$` and `,` characters first.
fn parse_statement_amount(text: &str) -> Option<f64> {
    text.replace(['$', ','], "").parse().ok()
}
