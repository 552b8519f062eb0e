//! Monthly income-vs-expense aggregation.
//!
//! The delta is derived on every request from the transactions table and is
//! never persisted. Sums over months with no matching rows are zero, not an
//! error.

use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    database_id::UserId,
    transaction::{CHOICE_CATEGORY, CORE_CATEGORY, TransactionType, window::month_window},
};

/// The monthly income-vs-expense summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Delta {
    /// The sum of all income amounts in the month.
    pub total_income: f64,
    /// Core plus choice expenses.
    pub total_expenses: f64,
    /// Total income minus total expenses.
    pub remaining_amount: f64,
    /// The sum of expenses categorized "Core".
    pub core_expenses: f64,
    /// The sum of expenses categorized "Choice".
    pub choice_expenses: f64,
}

/// Compute the delta for one calendar month.
///
/// # Errors
/// This function will return an:
/// - [Error::InvalidMonth] if the month/year pair is not representable,
/// - or [Error::SqlError] if a sum query fails.
pub fn compute_delta(
    month: u8,
    year: i32,
    user_id: UserId,
    connection: &Connection,
) -> Result<Delta, Error> {
    let (start, end) = month_window(month, year)?;

    let total_income = monthly_total(TransactionType::Income, None, start, end, user_id, connection)?;
    let core_expenses = monthly_total(
        TransactionType::Expense,
        Some(CORE_CATEGORY),
        start,
        end,
        user_id,
        connection,
    )?;
    let choice_expenses = monthly_total(
        TransactionType::Expense,
        Some(CHOICE_CATEGORY),
        start,
        end,
        user_id,
        connection,
    )?;

    let total_expenses = core_expenses + choice_expenses;

    Ok(Delta {
        total_income,
        total_expenses,
        remaining_amount: total_income - total_expenses,
        core_expenses,
        choice_expenses,
    })
}

/// Sum the amounts of one transaction type, optionally restricted to a
/// category, over `[start, end)`.
fn monthly_total(
    transaction_type: TransactionType,
    category: Option<&str>,
    start: Date,
    end: Date,
    user_id: UserId,
    connection: &Connection,
) -> Result<f64, Error> {
    let total = match category {
        Some(category) => connection.query_row(
            "SELECT COALESCE(SUM(amount), 0)
             FROM transactions
             WHERE user_id = ?1 AND type = ?2 AND category = ?3 AND date >= ?4 AND date < ?5",
            params![user_id, transaction_type, category, start, end],
            |row| row.get(0),
        ),
        None => connection.query_row(
            "SELECT COALESCE(SUM(amount), 0)
             FROM transactions
             WHERE user_id = ?1 AND type = ?2 AND date >= ?3 AND date < ?4",
            params![user_id, transaction_type, start, end],
            |row| row.get(0),
        ),
    }?;

    Ok(total)
}
