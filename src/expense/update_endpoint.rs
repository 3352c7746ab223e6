//! Defines the endpoint for updating an existing expense.
use axum::{
    Json,
    extract::State,
};
use time::UtcOffset;

use crate::{
    auth::Claims,
    calendar::now,
    envelope::ApiResponse,
    expense::core::{Expense, update_expense},
    expense::create_endpoint::ExpenseState,
    timezone::get_local_offset,
};

/// A route handler that overwrites an expense's stored fields by its ID and
/// stamps its `updated_at` time.
pub async fn update_expense_endpoint(
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

    match update_expense(&expense, now(local_offset), &connection) {
        Ok(()) => ApiResponse::data("Expense Updated successfully"),
        Err(error) => {
            tracing::error!("Error while updating expense: {error}");
            ApiResponse::error(format!("Error while updating expense: {error}"))
        }
    }
}
