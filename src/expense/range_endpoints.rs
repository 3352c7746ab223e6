//! Defines the date-range expense listings: the last six months, a custom
//! number of whole months, and the current month.
use std::sync::{Arc, Mutex};

use axum::extract::{FromRef, Path, State};
use rusqlite::Connection;
use time::{PrimitiveDateTime, UtcOffset};

use crate::{
    AppState,
    auth::Claims,
    calendar::{end_of_month, now, shift_months, start_of_month},
    envelope::ApiResponse,
    expense::query::{get_expenses_after, get_expenses_between},
    timezone::get_local_offset,
};

/// The state needed for the date-range expense listings.
#[derive(Clone)]
pub struct ExpenseRangeState {
    /// The database connection for reading expenses.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The canonical timezone name the date ranges are anchored in.
    pub local_timezone: String,
}

impl FromRef<AppState> for ExpenseRangeState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

impl ExpenseRangeState {
    fn local_now(&self) -> PrimitiveDateTime {
        let local_offset = get_local_offset(&self.local_timezone).unwrap_or(UtcOffset::UTC);

        now(local_offset)
    }
}

/// A route handler listing `user_id`'s expenses dated within the last six
/// months.
pub async fn get_six_months_expenses_endpoint(
    State(state): State<ExpenseRangeState>,
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

    let local_now = state.local_now();
    let start = PrimitiveDateTime::new(shift_months(local_now.date(), -6), local_now.time());

    match get_expenses_after(&user_id, start, &connection) {
        Ok(expenses) => ApiResponse::data(expenses),
        Err(error) => {
            tracing::error!("Failed in getExpenses: {error}");
            ApiResponse::error(format!("Failed in getExpenses: {error}"))
        }
    }
}

/// A route handler listing `user_id`'s expenses from the start of the month
/// `duration` months ago up to (but excluding) the start of the current
/// month.
pub async fn get_custom_expenses_endpoint(
    State(state): State<ExpenseRangeState>,
    _claims: Claims,
    Path((user_id, duration)): Path<(String, i32)>,
) -> ApiResponse {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not acquire database lock: {error}");
            return ApiResponse::error("Internal server error");
        }
    };

    let today = state.local_now().date();
    let start = start_of_month(shift_months(today, -duration));
    let end = start_of_month(today);

    match get_expenses_between(&user_id, start, end, &connection) {
        Ok(expenses) => ApiResponse::data(expenses),
        Err(error) => {
            tracing::error!("Failed in getCustomExpenses: {error}");
            ApiResponse::error(format!("Failed in getCustomExpenses: {error}"))
        }
    }
}

/// A route handler listing `user_id`'s expenses within the current calendar
/// month.
pub async fn get_current_expenses_endpoint(
    State(state): State<ExpenseRangeState>,
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

    let today = state.local_now().date();

    match get_expenses_between(&user_id, start_of_month(today), end_of_month(today), &connection) {
        Ok(expenses) => ApiResponse::data(expenses),
        Err(error) => {
            tracing::error!("Failed in getCurrentExpenses: {error}");
            ApiResponse::error(format!("Failed in getCurrentExpenses: {error}"))
        }
    }
}
