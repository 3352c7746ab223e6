//! Defines the endpoint for signing in with a user ID and password.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State},
};
use jsonwebtoken::EncodingKey;
use rusqlite::Connection;
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error,
    auth::token::encode_jwt,
    envelope::ApiResponse,
    user::get_user,
};

/// The state needed to sign a user in.
#[derive(Clone)]
pub struct LogInState {
    /// The database connection for looking up users.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The key for signing new tokens.
    pub encoding_key: EncodingKey,
}

impl FromRef<AppState> for LogInState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            encoding_key: state.auth_state.encoding_key().clone(),
        }
    }
}

/// The credentials entered during sign-in.
#[derive(Debug, Deserialize)]
pub struct Credentials {
    /// The user ID entered during sign-in.
    pub userid: String,
    /// The password entered during sign-in.
    pub password: String,
}

/// The payload returned in the envelope's `data` field after a successful
/// sign-in.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginData {
    /// A fixed success message.
    pub message: &'static str,
    /// The bearer token for subsequent requests.
    pub authorization: String,
    /// The user's display name.
    pub user_name: Option<String>,
    /// The user's email address.
    pub email: Option<String>,
    /// The user's role.
    pub role: Option<String>,
    /// The user's ID.
    pub user_id: String,
    /// The user's preferred currency code.
    pub default_currency: Option<String>,
}

/// A route handler for signing in.
pub async fn log_in_endpoint(
    State(state): State<LogInState>,
    Json(credentials): Json<Credentials>,
) -> ApiResponse {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not acquire database lock: {error}");
            return ApiResponse::error("Internal server error");
        }
    };

    let user = match get_user(&credentials.userid, &connection) {
        Ok(user) => user,
        Err(Error::NotFound) => return ApiResponse::error("Invalid username or password"),
        Err(error) => {
            tracing::error!("Login failed: {error}");
            return ApiResponse::error(format!("Login failed: {error}"));
        }
    };

    match user.password_hash.verify(&credentials.password) {
        Ok(true) => {}
        Ok(false) => return ApiResponse::error("Invalid username or password"),
        Err(error) => {
            tracing::error!("Error verifying password: {error}");
            return ApiResponse::error(format!("Login failed: {error}"));
        }
    }

    let token = match encode_jwt(&user.userid, &state.encoding_key) {
        Ok(token) => token,
        Err(error) => {
            tracing::error!("Could not sign token: {error:?}");
            return ApiResponse::error("Login failed: could not create token");
        }
    };

    tracing::info!("Login successful for user {:?}", user.username);

    ApiResponse::data(LoginData {
        message: "Login successful",
        authorization: token,
        user_name: user.username,
        email: user.email,
        role: user.role,
        user_id: user.userid,
        default_currency: user.default_currency,
    })
}
