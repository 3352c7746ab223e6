//! Defines the token-check endpoint used by the frontend to probe whether
//! its stored token is still valid.

use axum::Json;
use serde_json::{Value, json};

use crate::auth::token::Claims;

/// A route handler that succeeds only with a valid, unexpired bearer token.
///
/// Unlike the rest of the API this returns a bare JSON object, not the
/// response envelope.
pub async fn me_endpoint(_claims: Claims) -> Json<Value> {
    Json(json!({"message": "secured endpoint works"}))
}
