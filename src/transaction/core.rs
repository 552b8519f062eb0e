//! Defines the core data models and database queries for transactions.

use rusqlite::{
    Connection, Row, params,
    types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, ValueRef},
};
use serde::{Deserialize, Serialize};
use time::Date;

use crate::{
    Error,
    database_id::{DatabaseId, TransactionId, UserId},
};

/// The category stored on every income transaction.
pub const INCOME_CATEGORY: &str = "Income";

/// The expense category for necessities.
pub const CORE_CATEGORY: &str = "Core";

/// The expense category for discretionary spending.
pub const CHOICE_CATEGORY: &str = "Choice";

// ============================================================================
// MODELS
// ============================================================================

/// Whether a transaction brought money in or sent it out.
///
/// The stored amount is always non-negative; this enum carries the direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionType {
    /// Money earned, e.g. salary or a refund.
    Income,
    /// Money spent.
    Expense,
}

impl TransactionType {
    /// The type as it is stored in the `type` column.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Income => "Income",
            Self::Expense => "Expense",
        }
    }
}

impl rusqlite::ToSql for TransactionType {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for TransactionType {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        match value.as_str()? {
            "Income" => Ok(Self::Income),
            "Expense" => Ok(Self::Expense),
            other => Err(FromSqlError::Other(
                format!("unknown transaction type \"{other}\"").into(),
            )),
        }
    }
}

/// An income or expense recorded for one calendar date.
///
/// To create a new `Transaction`, use [NewTransaction::income] or
/// [NewTransaction::expense] with [create_transaction].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    pub id: DatabaseId,
    /// When the transaction happened.
    pub date: Date,
    /// The payee or a free-text description.
    pub name: String,
    /// The amount of money that moved. Always non-negative.
    pub amount: f64,
    /// "Income" for income; "Core", "Choice", or user-supplied text for
    /// expenses.
    pub category: String,
    /// Whether this is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
}

/// The fields needed to insert a transaction row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// When the transaction happened.
    pub date: Date,
    /// The payee or a free-text description.
    pub name: String,
    /// The amount of money that moved. Callers pass this non-negative.
    pub amount: f64,
    /// The expense category, or "Income".
    pub category: String,
    /// Whether this is income or an expense.
    pub transaction_type: TransactionType,
}

impl NewTransaction {
    /// A new income transaction. The category is always "Income".
    pub fn income(date: Date, name: impl Into<String>, amount: f64) -> Self {
        Self {
            date,
            name: name.into(),
            amount,
            category: INCOME_CATEGORY.to_owned(),
            transaction_type: TransactionType::Income,
        }
    }

    /// A new expense transaction with the given category.
    pub fn expense(
        date: Date,
        name: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
    ) -> Self {
        Self {
            date,
            name: name.into(),
            amount,
            category: category.into(),
            transaction_type: TransactionType::Expense,
        }
    }
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database.
///
/// # Errors
/// This function will return an [Error::SqlError] if the insert fails.
pub fn create_transaction(
    new_transaction: NewTransaction,
    user_id: UserId,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO transactions (user_id, date, name, amount, category, type)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             RETURNING id, date, name, amount, category, type",
        )?
        .query_row(
            (
                user_id,
                new_transaction.date,
                new_transaction.name,
                new_transaction.amount,
                new_transaction.category,
                new_transaction.transaction_type,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// The number of rows removed by a delete statement.
pub type RowsAffected = usize;

/// Delete the transaction with `id` of the given type.
///
/// Deleting an id that does not exist for the given type affects zero rows
/// and is not an error.
///
/// # Errors
/// This function will return an [Error::SqlError] if the delete fails.
pub fn delete_transaction(
    id: TransactionId,
    transaction_type: TransactionType,
    user_id: UserId,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "DELETE FROM transactions WHERE id = ?1 AND type = ?2 AND user_id = ?3",
            params![id, transaction_type, user_id],
        )
        .map_err(|error| error.into())
}

/// Retrieve the transactions of one type whose date falls within
/// `[start, end)`, in store order.
///
/// # Errors
/// This function will return an [Error::SqlError] if the query fails.
pub fn transactions_in_window(
    transaction_type: TransactionType,
    start: Date,
    end: Date,
    user_id: UserId,
    connection: &Connection,
) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, date, name, amount, category, type FROM transactions
             WHERE user_id = ?1 AND type = ?2 AND date >= ?3 AND date < ?4",
        )?
        .query_map(
            params![user_id, transaction_type, start, end],
            map_transaction_row,
        )?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
        .collect()
}

/// Retrieve every stored expense transaction, oldest first.
///
/// Ordered by date then id so that replaying the list into a map makes the
/// most recently dated category for a name win.
///
/// # Errors
/// This function will return an [Error::SqlError] if the query fails.
pub fn all_expenses(user_id: UserId, connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, date, name, amount, category, type FROM transactions
             WHERE user_id = ?1 AND type = 'Expense'
             ORDER BY date ASC, id ASC",
        )?
        .query_map(params![user_id], map_transaction_row)?
        .map(|maybe_transaction| maybe_transaction.map_err(Error::SqlError))
        .collect()
}

/// Create the transactions table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS transactions (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL,
                date TEXT NOT NULL,
                name TEXT NOT NULL,
                amount REAL NOT NULL,
                category TEXT NOT NULL,
                type TEXT NOT NULL
                )",
        (),
    )?;

    // Covers the month listing and delta sums.
    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transactions_user_type_date
         ON transactions(user_id, type, date)",
        (),
    )?;

    Ok(())
}

/// Map a database row to a [Transaction].
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    let id = row.get(0)?;
    let date = row.get(1)?;
    let name = row.get(2)?;
    let amount = row.get(3)?;
    let category = row.get(4)?;
    let transaction_type = row.get(5)?;

    Ok(Transaction {
        id,
        date,
        name,
        amount,
        category,
        transaction_type,
    })
}

// ============================================================================
// TESTS
// ============================================================================


#[cfg(test)]
mod serialization_tests {
    use time::macros::date;

    use crate::transaction::{Transaction, TransactionType};

    #[test]
    fn transaction_serializes_with_spa_field_names() {
        let transaction = Transaction {
            id: 7,
            date: date!(2024 - 01 - 15),
            name: "Coffee Shop".to_owned(),
            amount: 4.5,
            category: "Choice".to_owned(),
            transaction_type: TransactionType::Expense,
        };

        let json = serde_json::to_value(&transaction).unwrap();

        assert_eq!(json["date"], "2024-01-15");
        assert_eq!(json["type"], "Expense");
        assert_eq!(json["category"], "Choice");
    }
}
