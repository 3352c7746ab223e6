//! Defines the endpoint for resetting a forgotten password.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use rusqlite::Connection;
use serde::Deserialize;

use crate::{
    AppState, Error,
    envelope::ApiResponse,
    password::PasswordHash,
    user::{get_user, update_password},
};

/// The state needed to reset a password.
#[derive(Clone)]
pub struct ForgotPasswordState {
    /// The database connection for managing users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for ForgotPasswordState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The request body for resetting a password.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordForm {
    /// The ID of the user resetting their password.
    pub userid: String,
    /// The replacement password.
    pub new_password: String,
    /// Must match `new_password`.
    pub confirm_password: String,
}

/// A route handler for resetting a forgotten password.
pub async fn forgot_password_endpoint(
    State(state): State<ForgotPasswordState>,
    Json(form): Json<ForgotPasswordForm>,
) -> ApiResponse {
    if form.new_password != form.confirm_password {
        return ApiResponse::error("Passwords do not match");
    }

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not acquire database lock: {error}");
            return ApiResponse::error("Internal server error");
        }
    };

    let user = match get_user(&form.userid, &connection) {
        Ok(user) => user,
        Err(Error::NotFound) => return ApiResponse::error("User not found"),
        Err(error) => {
            tracing::error!("Password reset failed: {error}");
            return ApiResponse::error(format!("Password reset failed: {error}"));
        }
    };

    match user.password_hash.verify(&form.new_password) {
        Ok(true) => {
            return ApiResponse::error("New password cannot be the same as the old password");
        }
        Ok(false) => {}
        Err(error) => {
            tracing::error!("Error verifying password: {error}");
            return ApiResponse::error(format!("Password reset failed: {error}"));
        }
    }

    let password_hash =
        match PasswordHash::from_raw_password(&form.new_password, PasswordHash::DEFAULT_COST) {
            Ok(password_hash) => password_hash,
            Err(error) => return ApiResponse::error(format!("Password reset failed: {error}")),
        };

    match update_password(&form.userid, &password_hash, &connection) {
        Ok(()) => {
            tracing::info!("Password reset successful for user {}", form.userid);
            ApiResponse::data("Password reset successful")
        }
        Err(error) => {
            tracing::error!("Password reset failed: {error}");
            ApiResponse::error(format!("Password reset failed: {error}"))
        }
    }
}
