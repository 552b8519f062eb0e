//! Implements a struct that holds the state of the API server.

use std::sync::{Arc, Mutex};

use rusqlite::Connection;
use time::UtcOffset;

use crate::{Error, database_id::UserId, db::initialize, timezone};

/// The state of the API server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The database connection.
    pub db_connection: Arc<Mutex<Connection>>,

    /// The user that owns every transaction and funds row.
    pub user_id: UserId,

    /// The UTC offset used to decide what "the current month" means.
    pub local_offset: UtcOffset,
}

impl AppState {
    /// Create a new [AppState] with a SQLite database connection.
    ///
    /// This function will initialize the database by adding the tables for
    /// the domain models and seeding the funds row for `user_id`.
    /// `local_timezone` should be a valid, canonical timezone name, e.g.
    /// "Pacific/Auckland".
    ///
    /// # Errors
    /// Returns an error if the database cannot be initialized or the
    /// timezone name cannot be resolved.
    pub fn new(
        db_connection: Connection,
        user_id: UserId,
        local_timezone: &str,
    ) -> Result<Self, Error> {
        initialize(&db_connection, user_id)?;

        let local_offset = timezone::get_local_offset(local_timezone)
            .ok_or_else(|| Error::InvalidTimezone(local_timezone.to_owned()))?;

        Ok(Self {
            db_connection: Arc::new(Mutex::new(db_connection)),
            user_id,
            local_offset,
        })
    }
}

#[cfg(test)]
mod app_state_tests {
    use rusqlite::Connection;

    use crate::{AppState, Error, database_id::DEFAULT_USER_ID};

    #[test]
    fn new_initializes_schema() {
        let state = AppState::new(
            Connection::open_in_memory().unwrap(),
            DEFAULT_USER_ID,
            "Etc/UTC",
        )
        .unwrap();

        let connection = state.db_connection.lock().unwrap();
        let table_count: i64 = connection
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master
                 WHERE type = 'table' AND name IN ('transactions', 'funds')",
                [],
                |row| row.get(0),
            )
            .unwrap();

        assert_eq!(table_count, 2);
    }

    #[test]
    fn new_rejects_unknown_timezone() {
        let result = AppState::new(
            Connection::open_in_memory().unwrap(),
            DEFAULT_USER_ID,
            "Not/A_Timezone",
        );

        assert_eq!(
            result.err(),
            Some(Error::InvalidTimezone("Not/A_Timezone".to_owned()))
        );
    }
}
