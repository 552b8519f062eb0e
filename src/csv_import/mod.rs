//! Bulk import of bank CSV exports.
//!
//! The pipeline: read the uploaded file, build a payee-name to category map
//! from the user's stored expenses, then parse and persist each row. Income
//! and expenses are told apart by the sign of the amount column.

mod categorize;
mod csv;
mod upload_endpoint;

pub use upload_endpoint::upload_csv_endpoint;
