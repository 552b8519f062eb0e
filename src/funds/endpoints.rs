//! Route handlers for reading and replacing the funds record.

use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
    http::StatusCode,
};
use rusqlite::Connection;

use crate::{AppState, Error, database_id::UserId};

use super::{Fund, get_funds, update_funds};

/// The state needed to read or replace the funds record.
#[derive(Debug, Clone)]
pub struct FundsState {
    /// The database connection for the funds table.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The user the funds record belongs to.
    pub user_id: UserId,
}

impl FromRef<AppState> for FundsState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            user_id: state.user_id,
        }
    }
}

/// A route handler for reading the funds record.
pub async fn get_funds_endpoint(State(state): State<FundsState>) -> Result<Json<Fund>, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    get_funds(state.user_id, &connection).map(Json)
}

/// A route handler for replacing all four buckets of the funds record.
pub async fn update_funds_endpoint(
    State(state): State<FundsState>,
    Json(fund): Json<Fund>,
) -> Result<StatusCode, Error> {
    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    update_funds(&fund, state.user_id, &connection)?;

    Ok(StatusCode::OK)
}
