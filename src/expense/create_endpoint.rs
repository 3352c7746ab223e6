//! Defines the endpoint for recording a new expense.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use time::UtcOffset;

use crate::{
    AppState,
    auth::Claims,
    calendar::now,
    envelope::ApiResponse,
    expense::core::{Expense, insert_expense},
    timezone::get_local_offset,
};

/// The state needed to add, update, or delete an expense.
#[derive(Clone)]
pub struct ExpenseState {
    /// The database connection for managing expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The canonical timezone name used for row timestamps.
    pub local_timezone: String,
}

impl FromRef<AppState> for ExpenseState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for recording a new expense.
pub async fn create_expense_endpoint(
    State(state): State<ExpenseState>,
    _claims: Claims,
    Json(expense): Json<Expense>,
) -> ApiResponse {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not acquire database lock: {error}");
            return ApiResponse::error("Internal server error");
        }
    };

    let local_offset = get_local_offset(&state.local_timezone).unwrap_or(UtcOffset::UTC);

    match insert_expense(&expense, now(local_offset), &connection) {
        Ok(_) => ApiResponse::data("Expense Added successfully"),
        Err(error) => {
            tracing::error!("Error while adding expense: {error}");
            ApiResponse::error(format!("Error while adding expense: {error}"))
        }
    }
}

#[cfg(test)]
mod create_expense_tests {
    use axum::{Router, routing::post};
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        AppState,
        auth::AuthState,
        category::{insert_category, test_category},
        expense::query::count_expenses_for_user,
        pagination::PaginationConfig,
    };

    use super::create_expense_endpoint;

    fn get_test_app_state() -> AppState {
        let connection = rusqlite::Connection::open_in_memory().unwrap();

        AppState::new(connection, "foobar", "Etc/UTC", PaginationConfig::default()).unwrap()
    }

    fn get_test_server(app_state: AppState) -> TestServer {
        let app = Router::new()
            .route("/expenses/addExpenses", post(create_expense_endpoint))
            .with_state(app_state);

        TestServer::new(app)
    }

    fn bearer_token() -> String {
        crate::auth::token::encode_jwt("alice", AuthState::new("foobar").encoding_key()).unwrap()
    }

    #[tokio::test]
    async fn create_expense_stores_the_row() {
        let app_state = get_test_app_state();
        let category = {
            let connection = app_state.db_connection.lock().unwrap();
            insert_category(&test_category("alice", "Groceries"), &connection).unwrap()
        };
        let server = get_test_server(app_state.clone());

        let response = server
            .post("/expenses/addExpenses")
            .authorization_bearer(bearer_token())
            .json(&json!({
                "userid": "alice",
                "categoryId": category.id,
                "amount": 42.5,
                "currency": "NZD",
                "date": "2025-03-14T18:00:00",
                "paymentMethod": "card",
            }))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["data"], "Expense Added successfully");

        let connection = app_state.db_connection.lock().unwrap();
        assert_eq!(count_expenses_for_user("alice", &connection).unwrap(), 1);
    }

    #[tokio::test]
    async fn create_expense_for_missing_category_reports_an_error() {
        let server = get_test_server(get_test_app_state());

        let response = server
            .post("/expenses/addExpenses")
            .authorization_bearer(bearer_token())
            .json(&json!({
                "userid": "alice",
                "categoryId": 999,
                "amount": 42.5,
                "date": "2025-03-14T18:00:00",
            }))
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert!(body["errors"].as_str().unwrap().starts_with("Error while adding expense:"));
    }
}
