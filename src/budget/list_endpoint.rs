//! Defines the endpoint for listing a user's budgets for the current month.
use std::sync::{Arc, Mutex};

use axum::extract::{FromRef, Path, State};
use rusqlite::Connection;
use time::UtcOffset;

use crate::{
    AppState,
    auth::Claims,
    budget::core::get_budgets_for_month,
    calendar::current_month_label,
    envelope::ApiResponse,
    timezone::get_local_offset,
};

/// The state needed to list budgets.
#[derive(Clone)]
pub struct BudgetListState {
    /// The database connection for reading budgets.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The canonical timezone name used to decide what "this month" means.
    pub local_timezone: String,
}

impl FromRef<AppState> for BudgetListState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for listing the budgets of `user_id` for the current
/// month label.
pub async fn get_budgets_endpoint(
    State(state): State<BudgetListState>,
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

    match get_budgets_for_month(&user_id, &current_month, &connection) {
        Ok(budgets) => ApiResponse::data(budgets),
        Err(error) => {
            tracing::error!("Failed in getBudgets: {error}");
            ApiResponse::error(format!("Failed in getBudgets: {error}"))
        }
    }
}

#[cfg(test)]
mod list_budgets_tests {
    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use serde_json::Value;
    use time::UtcOffset;

    use crate::{
        AppState,
        auth::AuthState,
        budget::core::{insert_budget, test_budget},
        calendar::{current_month_label, now},
        category::{insert_category, test_category},
        pagination::PaginationConfig,
    };

    use super::get_budgets_endpoint;

    fn get_test_app_state() -> AppState {
        let connection = rusqlite::Connection::open_in_memory().unwrap();

        AppState::new(connection, "foobar", "Etc/UTC", PaginationConfig::default()).unwrap()
    }

    fn get_test_server(app_state: AppState) -> TestServer {
        let app = Router::new()
            .route("/budgets/getBudgets/{userId}", get(get_budgets_endpoint))
            .with_state(app_state);

        TestServer::new(app)
    }

    fn bearer_token() -> String {
        crate::auth::token::encode_jwt("alice", AuthState::new("foobar").encoding_key()).unwrap()
    }

    #[tokio::test]
    async fn listing_returns_only_current_month_budgets() {
        let app_state = get_test_app_state();
        let current_month = current_month_label(UtcOffset::UTC);
        {
            let connection = app_state.db_connection.lock().unwrap();
            let groceries = insert_category(&test_category("alice", "Groceries"), &connection).unwrap();
            let rent = insert_category(&test_category("alice", "Rent"), &connection).unwrap();
            insert_budget(
                &test_budget("alice", groceries.id, &current_month),
                now(UtcOffset::UTC),
                &connection,
            )
            .unwrap();
            insert_budget(
                &test_budget("alice", rent.id, "January 1999"),
                now(UtcOffset::UTC),
                &connection,
            )
            .unwrap();
        }
        let server = get_test_server(app_state);

        let response = server
            .get("/budgets/getBudgets/alice")
            .authorization_bearer(bearer_token())
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        let budgets = body["data"].as_array().unwrap();
        assert_eq!(budgets.len(), 1);
        assert_eq!(budgets[0]["month"], current_month);
    }
}
