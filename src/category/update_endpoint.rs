//! Defines the endpoint for updating an existing category.
use axum::{
    Json,
    extract::State,
};

use crate::{
    auth::Claims,
    category::core::{Category, update_category},
    category::create_endpoint::CategoryState,
    envelope::ApiResponse,
};

/// A route handler that overwrites a category's stored fields by its ID.
pub async fn update_category_endpoint(
    State(state): State<CategoryState>,
    _claims: Claims,
    Json(category): Json<Category>,
) -> ApiResponse {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not acquire database lock: {error}");
            return ApiResponse::error("Internal server error");
        }
    };

    match update_category(&category, &connection) {
        Ok(()) => ApiResponse::data("Category Updated successfully"),
        Err(error) => {
            tracing::error!("Error while updating Category: {error}");
            ApiResponse::error(format!("Error while updating Category: {error}"))
        }
    }
}

#[cfg(test)]
mod update_category_tests {
    use axum::{Router, routing::post};
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{
        AppState,
        auth::AuthState,
        category::core::{get_categories_by_user, insert_category, test_category},
        pagination::PaginationConfig,
    };

    use super::update_category_endpoint;

    fn get_test_app_state() -> AppState {
        let connection = rusqlite::Connection::open_in_memory().unwrap();

        AppState::new(connection, "foobar", "Etc/UTC", PaginationConfig::default()).unwrap()
    }

    fn get_test_server(app_state: AppState) -> TestServer {
        let app = Router::new()
            .route("/category/updateCategory", post(update_category_endpoint))
            .with_state(app_state);

        TestServer::new(app)
    }

    fn bearer_token() -> String {
        crate::auth::token::encode_jwt("alice", AuthState::new("foobar").encoding_key()).unwrap()
    }

    #[tokio::test]
    async fn update_overwrites_the_stored_fields() {
        let app_state = get_test_app_state();
        let category = {
            let connection = app_state.db_connection.lock().unwrap();
            insert_category(&test_category("alice", "Groceries"), &connection).unwrap()
        };
        let server = get_test_server(app_state.clone());

        let response = server
            .post("/category/updateCategory")
            .authorization_bearer(bearer_token())
            .json(&json!({
                "id": category.id,
                "name": "Food",
                "colorCode": "#FF0000",
                "userid": "alice",
            }))
            .await;

        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["data"], "Category Updated successfully");

        let connection = app_state.db_connection.lock().unwrap();
        let categories = get_categories_by_user("alice", &connection).unwrap();
        assert_eq!(categories[0].name, "Food");
        assert_eq!(categories[0].color_code.as_deref(), Some("#FF0000"));
    }

    #[tokio::test]
    async fn updating_a_missing_category_reports_an_error() {
        let server = get_test_server(get_test_app_state());

        let response = server
            .post("/category/updateCategory")
            .authorization_bearer(bearer_token())
            .json(&json!({"id": 42, "name": "Food", "userid": "alice"}))
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["data"], Value::Null);
        assert!(body["errors"].as_str().unwrap().starts_with("Error while updating Category:"));
    }
}
