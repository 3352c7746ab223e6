//! Defines the endpoint for updating an existing budget.
use axum::{
    Json,
    extract::State,
};

use crate::{
    Error,
    auth::Claims,
    budget::core::{Budget, update_budget},
    budget::create_endpoint::BudgetState,
    envelope::ApiResponse,
};

/// A route handler that overwrites a budget's stored fields by its ID.
///
/// Moving a budget onto a (user, category, month) combination that another
/// budget already occupies is rejected the same way as a duplicate insert.
pub async fn update_budget_endpoint(
    State(state): State<BudgetState>,
    _claims: Claims,
    Json(budget): Json<Budget>,
) -> ApiResponse {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not acquire database lock: {error}");
            return ApiResponse::error("Internal server error");
        }
    };

    match update_budget(&budget, &connection) {
        Ok(()) => ApiResponse::data("Budget Updated successfully"),
        Err(Error::DuplicateBudget) => {
            ApiResponse::error("Cannot have multiple budgets for same category")
        }
        Err(error) => {
            tracing::error!("Error while updating Budget: {error}");
            ApiResponse::error(format!("Error while updating Budget: {error}"))
        }
    }
}

#[cfg(test)]
mod update_budget_tests {
    use axum::{Router, routing::post};
    use axum_test::TestServer;
    use serde_json::{Value, json};
    use time::UtcOffset;

    use crate::{
        AppState,
        auth::AuthState,
        budget::core::{get_budget_amount, insert_budget, test_budget},
        calendar::now,
        category::{insert_category, test_category},
        pagination::PaginationConfig,
    };

    use super::update_budget_endpoint;

    fn get_test_app_state() -> AppState {
        let connection = rusqlite::Connection::open_in_memory().unwrap();

        AppState::new(connection, "foobar", "Etc/UTC", PaginationConfig::default()).unwrap()
    }

    fn get_test_server(app_state: AppState) -> TestServer {
        let app = Router::new()
            .route("/budgets/updateBudget", post(update_budget_endpoint))
            .with_state(app_state);

        TestServer::new(app)
    }

    fn bearer_token() -> String {
        crate::auth::token::encode_jwt("alice", AuthState::new("foobar").encoding_key()).unwrap()
    }

    #[tokio::test]
    async fn update_changes_the_amount() {
        let app_state = get_test_app_state();
        let budget = {
            let connection = app_state.db_connection.lock().unwrap();
            let category = insert_category(&test_category("alice", "Groceries"), &connection).unwrap();
            insert_budget(
                &test_budget("alice", category.id, "March 2025"),
                now(UtcOffset::UTC),
                &connection,
            )
            .unwrap()
        };
        let server = get_test_server(app_state.clone());

        let response = server
            .post("/budgets/updateBudget")
            .authorization_bearer(bearer_token())
            .json(&json!({
                "id": budget.id,
                "userid": "alice",
                "categoryId": budget.category_id,
                "month": "March 2025",
                "amount": 500.0,
            }))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["data"], "Budget Updated successfully");

        let connection = app_state.db_connection.lock().unwrap();
        let amount = get_budget_amount(budget.category_id, "alice", "March 2025", &connection).unwrap();
        assert_eq!(amount, Some(500.0));
    }

    #[tokio::test]
    async fn moving_onto_an_occupied_month_reports_duplicate() {
        let app_state = get_test_app_state();
        let (category_id, second_id) = {
            let connection = app_state.db_connection.lock().unwrap();
            let category = insert_category(&test_category("alice", "Groceries"), &connection).unwrap();
            insert_budget(
                &test_budget("alice", category.id, "March 2025"),
                now(UtcOffset::UTC),
                &connection,
            )
            .unwrap();
            let second = insert_budget(
                &test_budget("alice", category.id, "April 2025"),
                now(UtcOffset::UTC),
                &connection,
            )
            .unwrap();
            (category.id, second.id)
        };
        let server = get_test_server(app_state);

        let response = server
            .post("/budgets/updateBudget")
            .authorization_bearer(bearer_token())
            .json(&json!({
                "id": second_id,
                "userid": "alice",
                "categoryId": category_id,
                "month": "March 2025",
                "amount": 250.0,
            }))
            .await;

        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>()["errors"],
            "Cannot have multiple budgets for same category"
        );
    }
}
