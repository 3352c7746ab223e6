//! Defines the endpoint for creating a new expense category.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState,
    auth::Claims,
    category::core::{Category, insert_category},
    envelope::ApiResponse,
};

/// The state needed to create or modify a category.
#[derive(Clone)]
pub struct CategoryState {
    /// The database connection for managing categories.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CategoryState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// A route handler for creating a new category.
pub async fn create_category_endpoint(
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

    match insert_category(&category, &connection) {
        Ok(_) => ApiResponse::data("Category Added successfully"),
        Err(error) => {
            tracing::error!("Error while adding Category: {error}");
            ApiResponse::error(format!("Error while adding Category: {error}"))
        }
    }
}
