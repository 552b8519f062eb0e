//! Route handlers for manually adding income and expense transactions.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
};
use rusqlite::Connection;
use serde::Deserialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{
    AppState, Error,
    database_id::UserId,
    transaction::{NewTransaction, create_transaction},
};

/// The date format accepted from the web client for manual entry.
const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for writing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The user the transaction is recorded for.
    pub user_id: UserId,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            user_id: state.user_id,
        }
    }
}

/// The JSON body for creating a transaction manually.
#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    /// The transaction date as "YYYY-MM-DD".
    pub date: String,
    /// The payee or description.
    pub name: String,
    /// The non-negative amount of money that moved.
    pub amount: f64,
    /// The expense category. Ignored for income.
    #[serde(default)]
    pub category: String,
}

/// A route handler for creating an income transaction.
///
/// The stored category is always "Income", regardless of the body.
pub async fn create_income_endpoint(
    State(state): State<CreateTransactionState>,
    Json(form): Json<TransactionForm>,
) -> Result<StatusCode, Error> {
    let date = parse_form_date(&form.date)?;

    insert(
        NewTransaction::income(date, form.name, form.amount),
        &state,
    )
}

/// A route handler for creating an expense transaction with the category
/// supplied by the client.
pub async fn create_expense_endpoint(
    State(state): State<CreateTransactionState>,
    Json(form): Json<TransactionForm>,
) -> Result<StatusCode, Error> {
    let date = parse_form_date(&form.date)?;

    insert(
        NewTransaction::expense(date, form.name, form.amount, form.category),
        &state,
    )
}

fn parse_form_date(date: &str) -> Result<Date, Error> {
    Date::parse(date, &DATE_FORMAT).map_err(|_| Error::InvalidDateFormat(date.to_owned()))
}

fn insert(
    new_transaction: NewTransaction,
    state: &CreateTransactionState,
) -> Result<StatusCode, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    create_transaction(new_transaction, state.user_id, &connection)?;

    Ok(StatusCode::CREATED)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{Json, extract::State, http::StatusCode};
    use rusqlite::Connection;
    use time::macros::date;

    use crate::{
        Error,
        database_id::DEFAULT_USER_ID,
        db::initialize,
        transaction::all_expenses,
    };

    use super::{
        CreateTransactionState, TransactionForm, create_expense_endpoint, create_income_endpoint,
    };

    fn get_test_state() -> CreateTransactionState {
        let conn = Connection::open_in_memory().unwrap();
        initialize(&conn, DEFAULT_USER_ID).unwrap();

        CreateTransactionState {
            db_connection: Arc::new(Mutex::new(conn)),
            user_id: DEFAULT_USER_ID,
        }
    }

    #[tokio::test]
    async fn create_income_returns_created() {
        let state = get_test_state();

        let status = create_income_endpoint(
            State(state),
            Json(TransactionForm {
                date: "2024-01-15".to_owned(),
                name: "Paycheck".to_owned(),
                amount: 2500.0,
                category: String::new(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
    }

    #[tokio::test]
    async fn income_category_cannot_be_overridden() {
        let state = get_test_state();

        create_income_endpoint(
            State(state.clone()),
            Json(TransactionForm {
                date: "2024-01-15".to_owned(),
                name: "Paycheck".to_owned(),
                amount: 2500.0,
                category: "Choice".to_owned(),
            }),
        )
        .await
        .unwrap();

        let conn = state.db_connection.lock().unwrap();
        let category: String = conn
            .query_row(
                "SELECT category FROM transactions WHERE name = 'Paycheck'",
                [],
                |row| row.get(0),
            )
            .unwrap();

        assert_eq!(category, "Income");
    }

    #[tokio::test]
    async fn create_expense_stores_supplied_category() {
        let state = get_test_state();

        let status = create_expense_endpoint(
            State(state.clone()),
            Json(TransactionForm {
                date: "2024-01-16".to_owned(),
                name: "Trader Joes".to_owned(),
                amount: 84.20,
                category: "Core".to_owned(),
            }),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);

        let conn = state.db_connection.lock().unwrap();
        let expenses = all_expenses(DEFAULT_USER_ID, &conn).unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].category, "Core");
        assert_eq!(expenses[0].date, date!(2024 - 01 - 16));
    }

    #[tokio::test]
    async fn malformed_date_is_rejected() {
        let state = get_test_state();

        let result = create_expense_endpoint(
            State(state),
            Json(TransactionForm {
                date: "16/01/2024".to_owned(),
                name: "Trader Joes".to_owned(),
                amount: 84.20,
                category: "Core".to_owned(),
            }),
        )
        .await;

        assert_eq!(
            result,
            Err(Error::InvalidDateFormat("16/01/2024".to_owned()))
        );
    }
}
