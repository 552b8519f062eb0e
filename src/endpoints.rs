//! The API endpoint URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/income/{id}', use
//! [format_endpoint].

/// The route for listing and creating income transactions.
pub const INCOME: &str = "/api/income";
/// The route for deleting a single income transaction.
pub const DELETE_INCOME: &str = "/api/income/{id}";
/// The route for listing and creating expense transactions.
pub const EXPENSES: &str = "/api/expenses";
/// The route for deleting a single expense transaction.
pub const DELETE_EXPENSE: &str = "/api/expenses/{id}";
/// The route for reading and replacing the funds record.
pub const FUNDS: &str = "/api/funds";
/// The route for the monthly income-vs-expense delta.
pub const DELTA: &str = "/api/delta";
/// The route for uploading a bank CSV export.
pub const UPLOAD: &str = "/api/upload";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is a string that starts with a left brace, followed by
/// lowercase letters or underscores, and ends with a right brace.
/// For example, in the endpoint path '/api/income/{id}', '{id}' is the
/// parameter.
///
/// If no parameter is found in `endpoint_path`, the function returns the
/// original `endpoint_path`.
pub fn format_endpoint(endpoint_path: &str, id: i64) -> String {
    let mut param_start = None;
    let mut param_end = None;

    for (i, c) in endpoint_path.chars().enumerate() {
        if c == '{' {
            param_start = Some(i);
        } else if param_start.is_some() && c == '}' {
            param_end = Some(i + 1);
            break;
        }
    }

    let param_start = match param_start {
        Some(start) => start,
        None => return endpoint_path.to_string(),
    };

    let param_end = param_end.unwrap_or(endpoint_path.len());

    format!(
        "{}{}{}",
        &endpoint_path[..param_start],
        id,
        &endpoint_path[param_end..]
    )
}

// These tests are here so that we know when we call `Uri::from_shared` it will not panic.
#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok());
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::INCOME);
        assert_endpoint_is_valid_uri(endpoints::DELETE_INCOME);
        assert_endpoint_is_valid_uri(endpoints::EXPENSES);
        assert_endpoint_is_valid_uri(endpoints::DELETE_EXPENSE);
        assert_endpoint_is_valid_uri(endpoints::FUNDS);
        assert_endpoint_is_valid_uri(endpoints::DELTA);
        assert_endpoint_is_valid_uri(endpoints::UPLOAD);
    }

    #[test]
    fn produces_valid_uri() {
        let formatted_path = format_endpoint(endpoints::DELETE_INCOME, 42);

        assert_eq!(formatted_path, "/api/income/42");
        assert!(formatted_path.parse::<Uri>().is_ok());
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        let formatted_path = format_endpoint(endpoints::FUNDS, 1);

        assert_eq!(formatted_path, endpoints::FUNDS);
    }
}
