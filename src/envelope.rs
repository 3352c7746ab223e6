//! The uniform response envelope returned by every endpoint.

use axum::{Json, http::StatusCode, response::IntoResponse, response::Response};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::pagination::Paging;

/// The wrapper every endpoint returns:
/// `{data, errors, warnings, informations, authorization, paging}`.
///
/// Application failures are reported as a message string in `errors` while
/// the HTTP status stays 200; only authentication failures use a non-200
/// status (see [crate::auth::AuthError]).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// The payload, or a human-readable success message for write endpoints.
    pub data: Option<Value>,
    /// A message describing why the operation failed, if it did.
    pub errors: Option<String>,
    /// Non-fatal notes about the operation.
    pub warnings: Option<String>,
    /// Informational notes about the operation.
    pub informations: Option<String>,
    /// Reserved for token material; login returns its token inside `data`.
    pub authorization: Option<String>,
    /// Page metadata for paginated listings.
    pub paging: Option<Paging>,
}

impl ApiResponse {
    /// An envelope carrying `data` as its payload.
    ///
    /// If `data` cannot be serialized the envelope carries an error message
    /// instead, so route handlers never have to deal with this case.
    pub fn data(data: impl Serialize) -> Self {
        match serde_json::to_value(data) {
            Ok(value) => Self {
                data: Some(value),
                ..Self::default()
            },
            Err(error) => {
                tracing::error!("could not serialize response data: {error}");
                Self::error("Internal server error")
            }
        }
    }

    /// An envelope reporting a failed operation.
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            errors: Some(message.into()),
            ..Self::default()
        }
    }

    /// An envelope carrying one page of a listing.
    pub fn paged(data: impl Serialize, paging: Paging) -> Self {
        let mut response = Self::data(data);
        if response.errors.is_none() {
            response.paging = Some(paging);
        }
        response
    }
}

impl IntoResponse for ApiResponse {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

#[cfg(test)]
mod api_response_tests {
    use serde_json::json;

    use crate::pagination::Paging;

    use super::ApiResponse;

    #[test]
    fn data_envelope_has_no_errors() {
        let response = ApiResponse::data("Expense Added successfully");

        assert_eq!(response.data, Some(json!("Expense Added successfully")));
        assert_eq!(response.errors, None);
    }

    #[test]
    fn error_envelope_has_no_data() {
        let response = ApiResponse::error("User ID already taken");

        assert_eq!(response.data, None);
        assert_eq!(response.errors, Some("User ID already taken".to_owned()));
    }

    #[test]
    fn serializes_all_envelope_fields() {
        let response = ApiResponse::data(json!({"foo": 1}));
        let value = serde_json::to_value(&response).unwrap();

        for field in [
            "data",
            "errors",
            "warnings",
            "informations",
            "authorization",
            "paging",
        ] {
            assert!(
                value.get(field).is_some(),
                "expected envelope field {field:?} to be present"
            );
        }
    }

    #[test]
    fn paged_envelope_carries_paging() {
        let paging = Paging::new(0, 20, 41);
        let response = ApiResponse::paged(json!([]), paging.clone());

        assert_eq!(response.paging, Some(paging));
    }
}
