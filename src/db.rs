//! Database schema creation for the application.

use rusqlite::{Connection, Transaction as SqlTransaction};

use crate::{
    Error, database_id::UserId, funds::{create_funds_table, seed_funds_row},
    transaction::create_transaction_table,
};

/// Create the application tables and seed the singleton funds row for
/// `user_id` if it does not exist yet.
///
/// Safe to call on every startup.
///
/// # Errors
/// Returns an [Error::SqlError] if a table could not be created.
pub fn initialize(connection: &Connection, user_id: UserId) -> Result<(), Error> {
    let transaction =
        SqlTransaction::new_unchecked(connection, rusqlite::TransactionBehavior::Exclusive)?;

    create_transaction_table(&transaction)?;
    create_funds_table(&transaction)?;
    seed_funds_row(user_id, &transaction)?;

    transaction.commit()?;

    Ok(())
}
