//! Defines the endpoint for deleting a category.
use axum::extract::{Path, State};

use crate::{
    auth::Claims,
    category::core::{CategoryId, delete_category},
    category::create_endpoint::CategoryState,
    envelope::ApiResponse,
};

/// A route handler for deleting the category with ID `id`.
///
/// The delete fails if budgets or expenses still reference the category;
/// the foreign key violation is reported in the envelope's `errors` field.
pub async fn delete_category_endpoint(
    State(state): State<CategoryState>,
    _claims: Claims,
    Path(id): Path<CategoryId>,
) -> ApiResponse {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not acquire database lock: {error}");
            return ApiResponse::error("Internal server error");
        }
    };

    match delete_category(id, &connection) {
        Ok(()) => ApiResponse::data("Expense Deleted successfully"),
        Err(error) => {
            tracing::error!("Error while deleting Category: {error}");
            ApiResponse::error(format!("Error while deleting Category: {error}"))
        }
    }
}
