//! Defines the funds model and its database queries.
//!
//! Each user has exactly one funds row holding four named savings buckets.
//! The row is seeded with zeros at startup and replaced whole on update,
//! never partially.

use rusqlite::{Connection, Row, params};
use serde::{Deserialize, Serialize};

use crate::{Error, database_id::UserId};

/// The four savings/investment buckets tracked per user.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fund {
    /// Money set aside for emergencies.
    pub emergency_fund: f64,
    /// Money set aside for education.
    pub education_fund: f64,
    /// Money held in investments.
    pub investments: f64,
    /// Everything else.
    pub other: f64,
}

/// Retrieve the funds record for `user_id`.
///
/// # Errors
/// This function will return an:
/// - [Error::NotFound] if the user has no funds row,
/// - or [Error::SqlError] if there is some other SQL error.
pub fn get_funds(user_id: UserId, connection: &Connection) -> Result<Fund, Error> {
    let fund = connection
        .prepare(
            "SELECT emergency_fund, education_fund, investments, other
             FROM funds WHERE user_id = ?1",
        )?
        .query_row(params![user_id], map_fund_row)?;

    Ok(fund)
}

/// Replace all four buckets of the funds record for `user_id`.
///
/// # Errors
/// This function will return an [Error::SqlError] if the update fails.
pub fn update_funds(fund: &Fund, user_id: UserId, connection: &Connection) -> Result<(), Error> {
    connection.execute(
        "UPDATE funds
         SET emergency_fund = ?1, education_fund = ?2, investments = ?3, other = ?4
         WHERE user_id = ?5",
        params![
            fund.emergency_fund,
            fund.education_fund,
            fund.investments,
            fund.other,
            user_id
        ],
    )?;

    Ok(())
}

/// Create the funds table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_funds_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS funds (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                user_id INTEGER NOT NULL UNIQUE,
                emergency_fund REAL NOT NULL,
                education_fund REAL NOT NULL,
                investments REAL NOT NULL,
                other REAL NOT NULL
                )",
        (),
    )?;

    Ok(())
}

/// Insert the zeroed funds row for `user_id` if it does not exist yet.
///
/// # Errors
/// Returns an error if there is an SQL error.
pub fn seed_funds_row(user_id: UserId, connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "INSERT OR IGNORE INTO funds
         (user_id, emergency_fund, education_fund, investments, other)
         VALUES (?1, 0, 0, 0, 0)",
        params![user_id],
    )?;

    Ok(())
}

fn map_fund_row(row: &Row) -> Result<Fund, rusqlite::Error> {
    Ok(Fund {
        emergency_fund: row.get(0)?,
        education_fund: row.get(1)?,
        investments: row.get(2)?,
        other: row.get(3)?,
    })
}
