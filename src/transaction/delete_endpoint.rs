//! Route handlers for deleting transactions by id.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    database_id::{TransactionId, UserId},
    transaction::{TransactionType, delete_transaction},
};

/// The state needed to delete a transaction.
#[derive(Debug, Clone)]
pub struct DeleteTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The user whose transaction is deleted.
    pub user_id: UserId,
}

impl FromRef<AppState> for DeleteTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            user_id: state.user_id,
        }
    }
}

/// A route handler for deleting an income transaction.
///
/// Deleting an id that does not exist (or exists as an expense) affects zero
/// rows and still succeeds.
pub async fn delete_income_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(id): Path<TransactionId>,
) -> Result<StatusCode, Error> {
    delete(id, TransactionType::Income, &state)
}

/// A route handler for deleting an expense transaction.
///
/// Deleting an id that does not exist (or exists as income) affects zero
/// rows and still succeeds.
pub async fn delete_expense_endpoint(
    State(state): State<DeleteTransactionState>,
    Path(id): Path<TransactionId>,
) -> Result<StatusCode, Error> {
    delete(id, TransactionType::Expense, &state)
}

fn delete(
    id: TransactionId,
    transaction_type: TransactionType,
    state: &DeleteTransactionState,
) -> Result<StatusCode, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let rows_affected = delete_transaction(id, transaction_type, state.user_id, &connection)?;

    if rows_affected == 0 {
        tracing::debug!("delete for {} id {id} affected no rows", transaction_type.as_str());
    }

    Ok(StatusCode::OK)
}
