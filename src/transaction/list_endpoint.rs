//! Route handlers for listing income and expense transactions by month.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, Query, State},
};
use rusqlite::Connection;
use time::UtcOffset;

use crate::{
    AppState, Error,
    database_id::UserId,
    transaction::{
        Transaction, TransactionType, transactions_in_window,
        window::{MonthQuery, month_window},
    },
};

/// The state needed to list transactions.
#[derive(Debug, Clone)]
pub struct ListTransactionsState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The user whose transactions are listed.
    pub user_id: UserId,
    /// The offset used to resolve the default month.
    pub local_offset: UtcOffset,
}

impl FromRef<AppState> for ListTransactionsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            user_id: state.user_id,
            local_offset: state.local_offset,
        }
    }
}

/// A route handler for listing the income transactions of one month.
///
/// Defaults to the current local month when the query parameters are absent.
/// The response is a JSON array, empty when the month has no income.
pub async fn get_income_endpoint(
    State(state): State<ListTransactionsState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<Transaction>>, Error> {
    list_transactions(TransactionType::Income, query, &state).map(Json)
}

/// A route handler for listing the expense transactions of one month.
///
/// Defaults to the current local month when the query parameters are absent.
/// The response is a JSON array, empty when the month has no expenses.
pub async fn get_expenses_endpoint(
    State(state): State<ListTransactionsState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Vec<Transaction>>, Error> {
    list_transactions(TransactionType::Expense, query, &state).map(Json)
}

fn list_transactions(
    transaction_type: TransactionType,
    query: MonthQuery,
    state: &ListTransactionsState,
) -> Result<Vec<Transaction>, Error> {
    let (month, year) = query.resolve(state.local_offset);
    let (start, end) = month_window(month, year)?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    transactions_in_window(transaction_type, start, end, state.user_id, &connection)
}
