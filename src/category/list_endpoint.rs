//! Defines the endpoint for listing a user's categories with their budget
//! amounts for the current month.
use std::sync::{Arc, Mutex};

use axum::extract::{FromRef, Path, State};
use rusqlite::Connection;
use time::UtcOffset;

use crate::{
    AppState,
    auth::Claims,
    budget::get_budget_amount,
    calendar::current_month_label,
    category::core::get_categories_by_user,
    envelope::ApiResponse,
    timezone::get_local_offset,
};

/// The state needed to list categories.
#[derive(Clone)]
pub struct CategoryListState {
    /// The database connection for reading categories and budgets.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The canonical timezone name used to decide what "this month" means.
    pub local_timezone: String,
}

impl FromRef<AppState> for CategoryListState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for listing the categories of the user `user_id`.
///
/// Each category that has a budget for the current month label gets that
/// budget's amount attached in its `budget` field.
pub async fn get_categories_endpoint(
    State(state): State<CategoryListState>,
    _claims: Claims,
    Path(user_id): Path<String>,
) -> ApiResponse {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not acquire database lock: {error}");
            return ApiResponse::error("Internal server error");
        }
    };

    let local_offset = get_local_offset(&state.local_timezone).unwrap_or(UtcOffset::UTC);
    let current_month = current_month_label(local_offset);

    let mut categories = match get_categories_by_user(&user_id, &connection) {
        Ok(categories) => categories,
        Err(error) => {
            tracing::error!("Failed in getCategories: {error}");
            return ApiResponse::error(format!("Failed in getCategories: {error}"));
        }
    };

    for category in &mut categories {
        match get_budget_amount(category.id, &category.userid, &current_month, &connection) {
            Ok(amount) => category.budget = amount,
            Err(error) => {
                tracing::error!("Failed in getCategories: {error}");
                return ApiResponse::error(format!("Failed in getCategories: {error}"));
            }
        }
    }

    ApiResponse::data(categories)
}

#[cfg(test)]
mod list_categories_tests {
    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use serde_json::Value;
    use time::UtcOffset;

    use crate::{
        AppState,
        auth::AuthState,
        budget::{insert_budget, test_budget},
        calendar::{current_month_label, now},
        category::core::{insert_category, test_category},
        pagination::PaginationConfig,
    };

    use super::get_categories_endpoint;

    fn get_test_app_state() -> AppState {
        let connection = rusqlite::Connection::open_in_memory().unwrap();

        AppState::new(connection, "foobar", "Etc/UTC", PaginationConfig::default()).unwrap()
    }

    fn get_test_server(app_state: AppState) -> TestServer {
        let app = Router::new()
            .route("/category/getCategories/{userId}", get(get_categories_endpoint))
            .with_state(app_state);

        TestServer::new(app)
    }

    fn bearer_token() -> String {
        crate::auth::token::encode_jwt("alice", AuthState::new("foobar").encoding_key()).unwrap()
    }

    #[tokio::test]
    async fn listing_attaches_current_month_budget_amounts() {
        let app_state = get_test_app_state();
        let current_month = current_month_label(UtcOffset::UTC);
        {
            let connection = app_state.db_connection.lock().unwrap();
            let groceries = insert_category(&test_category("alice", "Groceries"), &connection).unwrap();
            insert_category(&test_category("alice", "Rent"), &connection).unwrap();
            insert_budget(
                &test_budget("alice", groceries.id, &current_month),
                now(UtcOffset::UTC),
                &connection,
            )
            .unwrap();
        }
        let server = get_test_server(app_state);

        let response = server
            .get("/category/getCategories/alice")
            .authorization_bearer(bearer_token())
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        let categories = body["data"].as_array().unwrap();
        assert_eq!(categories.len(), 2);

        let groceries = categories.iter().find(|c| c["name"] == "Groceries").unwrap();
        let rent = categories.iter().find(|c| c["name"] == "Rent").unwrap();
        assert_eq!(groceries["budget"], 250.0);
        assert_eq!(rent["budget"], Value::Null);
    }

    #[tokio::test]
    async fn budgets_for_other_months_are_not_attached() {
        let app_state = get_test_app_state();
        {
            let connection = app_state.db_connection.lock().unwrap();
            let groceries = insert_category(&test_category("alice", "Groceries"), &connection).unwrap();
            insert_budget(
                &test_budget("alice", groceries.id, "January 1999"),
                now(UtcOffset::UTC),
                &connection,
            )
            .unwrap();
        }
        let server = get_test_server(app_state);

        let response = server
            .get("/category/getCategories/alice")
            .authorization_bearer(bearer_token())
            .await;

        let body = response.json::<Value>();
        assert_eq!(body["data"][0]["budget"], Value::Null);
    }

    #[tokio::test]
    async fn listing_requires_a_token() {
        let server = get_test_server(get_test_app_state());

        server
            .get("/category/getCategories/alice")
            .await
            .assert_status(axum::http::StatusCode::BAD_REQUEST);
    }
}
