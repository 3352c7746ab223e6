//! Defines the endpoint for adding a monthly budget.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use time::UtcOffset;

use crate::{
    AppState, Error,
    auth::Claims,
    budget::core::{Budget, insert_budget},
    calendar::now,
    envelope::ApiResponse,
    timezone::get_local_offset,
};

/// The state needed to add or update a budget.
#[derive(Clone)]
pub struct BudgetState {
    /// The database connection for managing budgets.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The canonical timezone name used for creation timestamps.
    pub local_timezone: String,
}

impl FromRef<AppState> for BudgetState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// A route handler for adding a budget for one (user, category, month).
pub async fn create_budget_endpoint(
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

    let local_offset = get_local_offset(&state.local_timezone).unwrap_or(UtcOffset::UTC);

    match insert_budget(&budget, now(local_offset), &connection) {
        Ok(_) => ApiResponse::data("Budget Added successfully"),
        Err(Error::DuplicateBudget) => {
            ApiResponse::error("Cannot have multiple budgets for same category")
        }
        Err(error) => {
            tracing::error!("Error while adding Budget: {error}");
            ApiResponse::error(format!("Error while adding Budget: {error}"))
        }
    }
}
