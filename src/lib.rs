//! Money Map is a single-user web app for tracking income, expenses, savings
//! funds, and the monthly gap between money in and money out.
//!
//! This library provides the JSON API consumed by the bundled single-page app:
//! transaction CRUD, a singleton funds record, a monthly income-vs-expense
//! delta, and bulk import of bank CSV exports with category inference.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod app_state;
mod csv_import;
mod database_id;
mod db;
mod delta;
mod endpoints;
mod funds;
mod logging;
mod routing;
mod timezone;
mod transaction;

pub use app_state::AppState;
pub use database_id::{DEFAULT_USER_ID, UserId};
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A date string in a request body could not be parsed.
    #[error("invalid date \"{0}\", expected the format YYYY-MM-DD")]
    InvalidDateFormat(String),

    /// The month/year pair does not name a representable calendar month.
    #[error("{month}/{year} is not a valid calendar month")]
    InvalidMonth {
        /// The month number from the request, expected to be in 1-12.
        month: u8,
        /// The year from the request.
        year: i32,
    },

    /// The multipart upload form did not contain the expected file field.
    #[error("multipart form is missing the \"file\" field")]
    MissingFilePart,

    /// The multipart form could not be read.
    #[error("could not read multipart form: {0}")]
    MultipartError(String),

    /// The CSV had issues that prevented it from being parsed.
    #[error("could not parse the CSV file: {0}")]
    InvalidCsv(String),

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// An error occurred while resolving a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezone(String),

    /// Could not acquire the database lock.
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    /// Map the error to an HTTP status code with the error text as a
    /// plain-text body, matching what the single-page app expects.
    fn into_response(self) -> Response {
        let status = match self {
            Error::InvalidDateFormat(_)
            | Error::InvalidMonth { .. }
            | Error::MissingFilePart
            | Error::MultipartError(_)
            | Error::InvalidCsv(_) => StatusCode::BAD_REQUEST,
            Error::NotFound => StatusCode::NOT_FOUND,
            Error::InvalidTimezone(_) | Error::DatabaseLockError | Error::SqlError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, self.to_string()).into_response()
    }
}

#[cfg(test)]
mod error_tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use crate::Error;

    #[test]
    fn client_errors_map_to_bad_request() {
        let cases = [
            Error::InvalidDateFormat("15/01/2024".to_owned()),
            Error::InvalidMonth {
                month: 13,
                year: 2024,
            },
            Error::MissingFilePart,
            Error::InvalidCsv("missing header row".to_owned()),
        ];

        for error in cases {
            let response = error.into_response();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn store_errors_map_to_internal_server_error() {
        let response = Error::SqlError(rusqlite::Error::InvalidQuery).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn query_returned_no_rows_becomes_not_found() {
        let error: Error = rusqlite::Error::QueryReturnedNoRows.into();

        assert_eq!(error, Error::NotFound);
    }
}
