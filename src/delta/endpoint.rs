//! Route handler for the monthly delta.

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
    transaction::window::MonthQuery,
};

use super::{Delta, compute_delta};

/// The state needed to compute the delta.
#[derive(Debug, Clone)]
pub struct DeltaState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The user whose transactions are aggregated.
    pub user_id: UserId,
    /// The offset used to resolve the default month.
    pub local_offset: UtcOffset,
}

impl FromRef<AppState> for DeltaState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            user_id: state.user_id,
            local_offset: state.local_offset,
        }
    }
}

/// A route handler for the monthly income-vs-expense delta.
///
/// Defaults to the current local month when the query parameters are absent.
pub async fn get_delta_endpoint(
    State(state): State<DeltaState>,
    Query(query): Query<MonthQuery>,
) -> Result<Json<Delta>, Error> {
    let (month, year) = query.resolve(state.local_offset);

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    compute_delta(month, year, state.user_id, &connection).map(Json)
}
