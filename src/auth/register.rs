//! Defines the endpoint for registering a new user account.
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
    user::{User, get_user, insert_user},
};

/// The state needed to register a user.
#[derive(Clone)]
pub struct RegisterState {
    /// The database connection for managing users.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for RegisterState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The request body for registering or updating a user.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserForm {
    /// The unique ID the user signs in with.
    pub userid: String,
    /// The user's display name.
    #[serde(default)]
    pub username: Option<String>,
    /// The raw password. Only ever stored hashed.
    #[serde(default)]
    pub password: Option<String>,
    /// The user's email address.
    #[serde(default)]
    pub email: Option<String>,
    /// The user's role, e.g. "USER".
    #[serde(default)]
    pub role: Option<String>,
    /// The currency code to show amounts in by default.
    #[serde(default)]
    pub default_currency: Option<String>,
}

/// A route handler for registering a new user.
pub async fn register_endpoint(
    State(state): State<RegisterState>,
    Json(form): Json<UserForm>,
) -> ApiResponse {
    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("Could not acquire database lock: {error}");
            return ApiResponse::error("Internal server error");
        }
    };

    if get_user(&form.userid, &connection).is_ok() {
        return ApiResponse::error("User ID already taken");
    }

    let password_hash = match PasswordHash::from_raw_password(
        form.password.as_deref().unwrap_or_default(),
        PasswordHash::DEFAULT_COST,
    ) {
        Ok(password_hash) => password_hash,
        Err(error) => return ApiResponse::error(format!("Registration failed: {error}")),
    };

    let user = User {
        userid: form.userid,
        username: form.username,
        password_hash,
        email: form.email,
        role: form.role,
        default_currency: form.default_currency,
    };

    match insert_user(&user, &connection) {
        Ok(_) => {
            tracing::info!("Registration successful for user {:?}", user.username);
            ApiResponse::data("User registered successfully")
        }
        Err(Error::DuplicateUserId) => ApiResponse::error("User ID already taken"),
        Err(error) => {
            tracing::error!("Registration failed: {error}");
            ApiResponse::error(format!("Registration failed: {error}"))
        }
    }
}

#[cfg(test)]
mod register_tests {
    use axum::{Router, routing::post};
    use axum_test::TestServer;
    use serde_json::{Value, json};

    use crate::{AppState, pagination::PaginationConfig, user::get_user};

    use super::register_endpoint;

    fn get_test_app_state() -> AppState {
        let connection = rusqlite::Connection::open_in_memory().unwrap();

        AppState::new(connection, "foobar", "Etc/UTC", PaginationConfig::default()).unwrap()
    }

    fn get_test_server(app_state: AppState) -> TestServer {
        let app = Router::new()
            .route("/auth/register", post(register_endpoint))
            .with_state(app_state);

        TestServer::new(app)
    }

    #[tokio::test]
    async fn register_creates_user_with_hashed_password() {
        let app_state = get_test_app_state();
        let server = get_test_server(app_state.clone());

        let response = server
            .post("/auth/register")
            .json(&json!({
                "userid": "alice",
                "username": "Alice",
                "password": "hunter2",
                "email": "alice@example.com",
                "role": "USER",
                "defaultCurrency": "NZD",
            }))
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["data"], "User registered successfully");
        assert_eq!(body["errors"], Value::Null);

        let connection = app_state.db_connection.lock().unwrap();
        let user = get_user("alice", &connection).unwrap();
        assert_ne!(user.password_hash.to_string(), "hunter2");
        assert!(user.password_hash.verify("hunter2").unwrap());
    }

    #[tokio::test]
    async fn register_rejects_taken_user_id() {
        let app_state = get_test_app_state();
        let server = get_test_server(app_state.clone());
        let body = json!({"userid": "alice", "password": "hunter2"});

        server.post("/auth/register").json(&body).await.assert_status_ok();

        let response = server
            .post("/auth/register")
            .json(&json!({"userid": "alice", "password": "different"}))
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["errors"], "User ID already taken");
        assert_eq!(body["data"], Value::Null);

        // The original row must be unchanged.
        let connection = app_state.db_connection.lock().unwrap();
        let user = get_user("alice", &connection).unwrap();
        assert!(user.password_hash.verify("hunter2").unwrap());
    }
}
