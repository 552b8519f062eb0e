//! Application router configuration.

use std::path::Path;

use axum::{
    Router, middleware,
    routing::{delete, get, post},
};
use tower_http::services::{ServeDir, ServeFile};

use crate::{
    AppState,
    csv_import::upload_csv_endpoint,
    delta::get_delta_endpoint,
    endpoints,
    funds::{get_funds_endpoint, update_funds_endpoint},
    logging::logging_middleware,
    transaction::{
        create_expense_endpoint, create_income_endpoint, delete_expense_endpoint,
        delete_income_endpoint, get_expenses_endpoint, get_income_endpoint,
    },
};

/// Return a router with all the app's routes.
///
/// Requests that match no API route fall through to the single-page app in
/// `static_dir`, with unknown paths served the index file so the client-side
/// router can handle them.
pub fn build_router(state: AppState, static_dir: &str) -> Router {
    let api_routes = Router::new()
        .route(
            endpoints::INCOME,
            get(get_income_endpoint).post(create_income_endpoint),
        )
        .route(endpoints::DELETE_INCOME, delete(delete_income_endpoint))
        .route(
            endpoints::EXPENSES,
            get(get_expenses_endpoint).post(create_expense_endpoint),
        )
        .route(endpoints::DELETE_EXPENSE, delete(delete_expense_endpoint))
        .route(
            endpoints::FUNDS,
            get(get_funds_endpoint).put(update_funds_endpoint),
        )
        .route(endpoints::DELTA, get(get_delta_endpoint))
        .route(endpoints::UPLOAD, post(upload_csv_endpoint))
        .layer(middleware::from_fn(logging_middleware));

    let static_dir = Path::new(static_dir);
    let spa_service =
        ServeDir::new(static_dir).not_found_service(ServeFile::new(static_dir.join("index.html")));

    api_routes.fallback_service(spa_service).with_state(state)
}

#[cfg(test)]
mod api_route_tests {
    use axum::http::StatusCode;
    use axum_test::{
        TestServer,
        multipart::{MultipartForm, Part},
    };
    use rusqlite::Connection;
    use serde_json::json;

    use crate::{
        AppState, build_router,
        database_id::DEFAULT_USER_ID,
        delta::Delta,
        endpoints,
        funds::Fund,
        transaction::{Transaction, TransactionType},
    };

    fn new_test_server() -> TestServer {
        let state = AppState::new(
            Connection::open_in_memory().unwrap(),
            DEFAULT_USER_ID,
            "Etc/UTC",
        )
        .unwrap();

        TestServer::new(build_router(state, "web/build"))
    }

    #[tokio::test]
    async fn income_post_then_list_round_trips() {
        let server = new_test_server();

        let response = server
            .post(endpoints::INCOME)
            .json(&json!({
                "date": "2024-01-15",
                "name": "Paycheck",
                "amount": 2500.0,
                "category": ""
            }))
            .await;
        response.assert_status(StatusCode::CREATED);

        let transactions: Vec<Transaction> = server
            .get(endpoints::INCOME)
            .add_query_param("month", 1)
            .add_query_param("year", 2024)
            .await
            .json();

        assert_eq!(transactions.len(), 1);
        assert_eq!(transactions[0].name, "Paycheck");
        assert_eq!(transactions[0].category, "Income");
        assert_eq!(transactions[0].transaction_type, TransactionType::Income);
    }

    #[tokio::test]
    async fn empty_month_lists_as_empty_json_array() {
        let server = new_test_server();

        let response = server
            .get(endpoints::EXPENSES)
            .add_query_param("month", 6)
            .add_query_param("year", 2031)
            .await;

        response.assert_status_ok();
        assert_eq!(response.text(), "[]");
    }

    #[tokio::test]
    async fn malformed_date_is_a_client_error() {
        let server = new_test_server();

        let response = server
            .post(endpoints::EXPENSES)
            .json(&json!({
                "date": "15/01/2024",
                "name": "Trader Joes",
                "amount": 84.2,
                "category": "Core"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn non_numeric_month_is_a_client_error() {
        let server = new_test_server();

        let response = server
            .get(endpoints::INCOME)
            .add_query_param("month", "abc")
            .add_query_param("year", 2024)
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn deleting_a_missing_transaction_succeeds() {
        let server = new_test_server();

        let response = server
            .delete(&endpoints::format_endpoint(endpoints::DELETE_INCOME, 1337))
            .await;

        response.assert_status_ok();
    }

    #[tokio::test]
    async fn non_numeric_id_is_a_client_error() {
        let server = new_test_server();

        let response = server.delete("/api/income/not-a-number").await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn funds_update_then_get_round_trips() {
        let server = new_test_server();
        let want = Fund {
            emergency_fund: 10.0,
            education_fund: 20.0,
            investments: 30.0,
            other: 40.0,
        };

        let response = server.put(endpoints::FUNDS).json(&want).await;
        response.assert_status_ok();

        let got: Fund = server.get(endpoints::FUNDS).await.json();
        assert_eq!(got, want);
    }

    #[tokio::test]
    async fn delta_reflects_posted_transactions() {
        let server = new_test_server();

        for (path, body) in [
            (
                endpoints::INCOME,
                json!({"date": "2024-02-01", "name": "Paycheck", "amount": 3000.0, "category": ""}),
            ),
            (
                endpoints::EXPENSES,
                json!({"date": "2024-02-03", "name": "Rent", "amount": 1500.0, "category": "Core"}),
            ),
            (
                endpoints::EXPENSES,
                json!({"date": "2024-02-20", "name": "Cinema", "amount": 45.0, "category": "Choice"}),
            ),
        ] {
            server
                .post(path)
                .json(&body)
                .await
                .assert_status(StatusCode::CREATED);
        }

        let delta: Delta = server
            .get(endpoints::DELTA)
            .add_query_param("month", 2)
            .add_query_param("year", 2024)
            .await
            .json();

        assert_eq!(delta.total_income, 3000.0);
        assert_eq!(delta.core_expenses, 1500.0);
        assert_eq!(delta.choice_expenses, 45.0);
        assert_eq!(
            delta.total_expenses,
            delta.core_expenses + delta.choice_expenses
        );
        assert_eq!(
            delta.remaining_amount,
            delta.total_income - delta.total_expenses
        );
    }

    #[tokio::test]
    async fn csv_upload_imports_transactions() {
        let server = new_test_server();
        let csv = "\
            Transaction Number,Reference,Date,Description,Card,Category,Memo,Amount\n\
            101,ref,01/15/24,Coffee Shop,1234,Restaurants/Dining,memo,-4.50\n\
            102,ref,01/16/24,Employer Inc,1234,Paychecks/Salary,memo,\"$1,200.00\"";

        let form = MultipartForm::new().add_part(
            "file",
            Part::bytes(csv.as_bytes().to_vec())
                .file_name("export.csv")
                .mime_type("text/csv"),
        );

        let response = server.post(endpoints::UPLOAD).multipart(form).await;
        response.assert_status_ok();
        assert_eq!(response.text(), "", "a successful import has no body");

        let expenses: Vec<Transaction> = server
            .get(endpoints::EXPENSES)
            .add_query_param("month", 1)
            .add_query_param("year", 2024)
            .await
            .json();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].category, "Choice");

        let income: Vec<Transaction> = server
            .get(endpoints::INCOME)
            .add_query_param("month", 1)
            .add_query_param("year", 2024)
            .await
            .json();
        assert_eq!(income.len(), 1);
        assert_eq!(income[0].amount, 1200.0);
    }

    #[tokio::test]
    async fn unknown_path_falls_through_to_the_spa_service() {
        let server = new_test_server();

        // No static files exist in the test environment, so the fallback
        // can only 404; the point is that it is not routed to the API.
        let response = server.get("/budget").await;

        response.assert_status(StatusCode::NOT_FOUND);
    }
}
