//! Defines the endpoint for the paginated expense listing.
use std::sync::{Arc, Mutex};

use axum::extract::{FromRef, Query, State};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState,
    auth::Claims,
    envelope::ApiResponse,
    expense::query::{count_expenses_for_user, get_expense_page},
    pagination::{Paging, PaginationConfig},
};

/// The state needed to list expenses page by page.
#[derive(Clone)]
pub struct ExpenseListState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The page number and size to use when the query string omits them.
    pub pagination_config: PaginationConfig,
}

impl FromRef<AppState> for ExpenseListState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            pagination_config: state.pagination_config.clone(),
        }
    }
}

/// The query parameters accepted by the expense listing.
#[derive(Debug, Deserialize)]
pub struct ExpenseListQuery {
    /// The user whose expenses to list.
    #[serde(rename = "userId")]
    pub user_id: String,
    /// The zero-based page number.
    pub page: Option<u64>,
    /// How many expenses per page.
    pub size: Option<u64>,
}

/// A route handler that lists one page of a user's expenses, newest first,
/// and fills in the envelope's `paging` block.
pub async fn get_all_expenses_endpoint(
    State(state): State<ExpenseListState>,
    _claims: Claims,
    Query(query): Query<ExpenseListQuery>,
) -> ApiResponse {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not acquire database lock: {error}");
            return ApiResponse::error("Internal server error");
        }
    };

    let page = query.page.unwrap_or(state.pagination_config.default_page);
    let size = query.size.unwrap_or(state.pagination_config.default_page_size);

    let total_elements = match count_expenses_for_user(&query.user_id, &connection) {
        Ok(total_elements) => total_elements,
        Err(error) => {
            tracing::error!("Error while getting getAllExpenses: {error}");
            return ApiResponse::error(format!("Error while getting getAllExpenses: {error}"));
        }
    };

    match get_expense_page(&query.user_id, page, size, &connection) {
        Ok(expenses) => {
            ApiResponse::paged(expenses, Paging::new(page, size, total_elements))
        }
        Err(error) => {
            tracing::error!("Error while getting getAllExpenses: {error}");
            ApiResponse::error(format!("Error while getting getAllExpenses: {error}"))
        }
    }
}

#[cfg(test)]
mod list_expenses_tests {
    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use serde_json::Value;
    use time::macros::datetime;

    use crate::{
        AppState,
        auth::AuthState,
        category::{insert_category, test_category},
        expense::core::{insert_expense, test_expense},
        pagination::PaginationConfig,
    };

    use super::get_all_expenses_endpoint;

    fn get_test_app_state() -> AppState {
        let connection = rusqlite::Connection::open_in_memory().unwrap();

        AppState::new(connection, "foobar", "Etc/UTC", PaginationConfig::default()).unwrap()
    }

    fn get_test_server(app_state: AppState) -> TestServer {
        let app = Router::new()
            .route("/expenses/getAllExpenses", get(get_all_expenses_endpoint))
            .with_state(app_state);

        TestServer::new(app)
    }

    fn bearer_token() -> String {
        crate::auth::token::encode_jwt("alice", AuthState::new("foobar").encoding_key()).unwrap()
    }

    #[tokio::test]
    async fn listing_is_paged_and_sorted_newest_first() {
        let app_state = get_test_app_state();
        {
            let connection = app_state.db_connection.lock().unwrap();
            let category = insert_category(&test_category("alice", "Groceries"), &connection).unwrap();
            let now = datetime!(2025 - 03 - 15 10:00:00);
            for day in 1..=5 {
                let date = datetime!(2025 - 03 - 01 09:00:00).replace_day(day).unwrap();
                insert_expense(&test_expense("alice", category.id, date), now, &connection).unwrap();
            }
        }
        let server = get_test_server(app_state);

        let response = server
            .get("/expenses/getAllExpenses")
            .add_query_param("userId", "alice")
            .add_query_param("page", 0)
            .add_query_param("size", 2)
            .authorization_bearer(bearer_token())
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        let expenses = body["data"].as_array().unwrap();
        assert_eq!(expenses.len(), 2);
        assert_eq!(expenses[0]["date"], "2025-03-05T09:00:00");
        assert_eq!(expenses[1]["date"], "2025-03-04T09:00:00");

        assert_eq!(body["paging"]["page"], 0);
        assert_eq!(body["paging"]["size"], 2);
        assert_eq!(body["paging"]["totalElements"], 5);
        assert_eq!(body["paging"]["totalPages"], 3);
    }

    #[tokio::test]
    async fn listing_uses_default_paging_when_params_are_omitted() {
        let app_state = get_test_app_state();
        let server = get_test_server(app_state);

        let response = server
            .get("/expenses/getAllExpenses")
            .add_query_param("userId", "alice")
            .authorization_bearer(bearer_token())
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["paging"]["page"], 0);
        assert_eq!(body["paging"]["size"], 20);
        assert_eq!(body["paging"]["totalElements"], 0);
        assert_eq!(body["paging"]["totalPages"], 0);
    }
}
