//! Defines the endpoint for updating a user's profile.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    auth::register::UserForm,
    envelope::ApiResponse,
    password::PasswordHash,
    user::{get_user, update_user_profile},
};

/// The state needed to update a user's profile.
#[derive(Clone)]
pub struct UpdateUserState {
    /// The database connection for managing users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for UpdateUserState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

// Absent and empty-string fields both mean "leave unchanged".
fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|value| !value.is_empty())
}

/// A route handler for updating the username, password, or email of an
/// existing user. Fields left out of the request are left unchanged.
pub async fn update_user_endpoint(
    State(state): State<UpdateUserState>,
    Json(form): Json<UserForm>,
) -> ApiResponse {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not acquire database lock: {error}");
            return ApiResponse::error("Internal server error");
        }
    };

    match get_user(&form.userid, &connection) {
        Ok(_) => {}
        Err(Error::NotFound) => return ApiResponse::error("User not found"),
        Err(error) => {
            tracing::error!("Updating failed: {error}");
            return ApiResponse::error(format!("Updating failed: {error}"));
        }
    }

    let password_hash = match non_empty(&form.password) {
        Some(raw_password) => {
            match PasswordHash::from_raw_password(raw_password, PasswordHash::DEFAULT_COST) {
                Ok(password_hash) => Some(password_hash),
                Err(error) => return ApiResponse::error(format!("Updating failed: {error}")),
            }
        }
        None => None,
    };

    match update_user_profile(
        &form.userid,
        non_empty(&form.username),
        password_hash.as_ref(),
        non_empty(&form.email),
        &connection,
    ) {
        Ok(()) => {
            tracing::info!("Update successful for user {}", form.userid);
            ApiResponse::data("User updated successfully")
        }
        Err(error) => {
            tracing::error!("Updating failed: {error}");
            ApiResponse::error(format!("Updating failed: {error}"))
        }
    }
}
