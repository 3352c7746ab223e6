//! Defines the endpoint for deleting an expense.
use axum::extract::{Path, State};

use crate::{
    auth::Claims,
    envelope::ApiResponse,
    expense::core::{ExpenseId, delete_expense},
    expense::create_endpoint::ExpenseState,
};

/// A route handler for deleting the expense with ID `id`.
pub async fn delete_expense_endpoint(
    State(state): State<ExpenseState>,
    _claims: Claims,
    Path(id): Path<ExpenseId>,
) -> ApiResponse {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not acquire database lock: {error}");
            return ApiResponse::error("Internal server error");
        }
    };

    match delete_expense(id, &connection) {
        Ok(()) => ApiResponse::data("Expense Deleted successfully"),
        Err(error) => {
            tracing::error!("Error while deleting expense: {error}");
            ApiResponse::error(format!("Error while deleting expense: {error}"))
        }
    }
}
