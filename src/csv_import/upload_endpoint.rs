//! Route handler for importing transactions from a bank CSV export.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Multipart, State},
    http::StatusCode,
};
use csv::ReaderBuilder;
use rusqlite::Connection;

use crate::{
    AppState, Error,
    csv_import::{
        categorize::{build_category_lookup, classify_hint},
        csv::parse_statement_row,
    },
    database_id::UserId,
    transaction::{NewTransaction, create_transaction},
};

/// The state needed for importing transactions.
#[derive(Debug, Clone)]
pub struct UploadCsvState {
    /// The database connection for reading prior expenses and writing the
    /// imported transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The user the imported transactions are recorded for.
    pub user_id: UserId,
}

impl FromRef<AppState> for UploadCsvState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            user_id: state.user_id,
        }
    }
}

/// A route handler for importing transactions from an uploaded CSV export.
///
/// Reads the `file` field of the multipart form, replays the user's prior
/// expense categorizations by payee name, classifies the rest from the
/// bank's category hint, and persists each row. Rows that cannot be parsed
/// are skipped; the first store failure aborts the import and rows already
/// written stay written.
pub async fn upload_csv_endpoint(
    State(state): State<UploadCsvState>,
    multipart: Multipart,
) -> Result<StatusCode, Error> {
    let csv_text = read_file_field(multipart).await?;

    let connection = state
        .db_connection
        .lock()
        .map_err(|_| Error::DatabaseLockError)?;

    let counts = import_statement(&csv_text, state.user_id, &connection)?;
    tracing::info!(
        "imported {} transactions from CSV ({} rows skipped)",
        counts.imported,
        counts.skipped
    );

    Ok(StatusCode::OK)
}

async fn read_file_field(mut multipart: Multipart) -> Result<String, Error> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|error| Error::MultipartError(error.to_string()))?
    {
        if field.name() == Some("file") {
            return field
                .text()
                .await
                .map_err(|error| Error::MultipartError(error.to_string()));
        }
    }

    Err(Error::MissingFilePart)
}

struct ImportCounts {
    imported: usize,
    skipped: usize,
}

/// Import every data row of `text`, writing each transaction as it is
/// parsed.
///
/// There is deliberately no transaction wrapping: a failure partway leaves
/// the rows written so far in place, matching the behavior the web client
/// expects.
fn import_statement(
    text: &str,
    user_id: UserId,
    connection: &Connection,
) -> Result<ImportCounts, Error> {
    let lookup = build_category_lookup(user_id, connection)?;

    let reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(text.as_bytes());
    let mut records = reader.into_records();

    match records.next() {
        Some(Ok(_header)) => {}
        Some(Err(error)) => {
            return Err(Error::InvalidCsv(format!(
                "could not read the header row: {error}"
            )));
        }
        None => return Err(Error::InvalidCsv("missing header row".to_owned())),
    }

    let mut counts = ImportCounts {
        imported: 0,
        skipped: 0,
    };

    for (index, result) in records.enumerate() {
        // Record numbers are 1-based and count the header row.
        let record_number = (index + 2) as u64;
        let record = result.map_err(|error| {
            Error::InvalidCsv(format!("could not read row {record_number}: {error}"))
        })?;

        let Some(row) = parse_statement_row(&record, record_number) else {
            counts.skipped += 1;
            continue;
        };

        let new_transaction = if row.amount > 0.0 {
            NewTransaction::income(row.date, row.name, row.amount)
        } else {
            let category = match lookup.get(&row.name) {
                Some(category) => category.clone(),
                None => classify_hint(&row.category_hint).to_owned(),
            };
            NewTransaction::expense(row.date, row.name, -row.amount, category)
        };

        create_transaction(new_transaction, user_id, connection)?;
        counts.imported += 1;
    }

    Ok(counts)
}
