//! JSON Web Token issue and validation, and the extractor that guards
//! protected routes.

use axum::{
    RequestPartsExt,
    body::Body,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    http::{Response, StatusCode},
    response::IntoResponse,
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Bearer},
};
use jsonwebtoken::{
    DecodingKey, EncodingKey, Header, TokenData, Validation, decode, encode,
    errors::ErrorKind,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use time::{Duration, OffsetDateTime};

// Code in this module is adapted from https://github.com/ezesundayeze/axum--auth and https://github.com/tokio-rs/axum/blob/main/examples/jwt/src/main.rs

/// How long a token stays valid after login.
pub const TOKEN_LIFETIME: Duration = Duration::minutes(60);

/// The keys used for signing and validating auth tokens.
#[derive(Clone)]
pub struct AuthState {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl AuthState {
    /// Create signing and validation keys from a shared secret.
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// The key for signing tokens.
    pub fn encoding_key(&self) -> &EncodingKey {
        &self.encoding_key
    }

    /// The key for validating tokens.
    pub fn decoding_key(&self) -> &DecodingKey {
        &self.decoding_key
    }
}

/// The contents of a JSON Web Token.
#[derive(Serialize, Deserialize)]
pub struct Claims {
    /// The expiry time of the token.
    pub exp: usize,
    /// The time the token was issued.
    pub iat: usize,
    /// The user ID the token was issued to.
    pub sub: String,
}

impl<S> FromRequestParts<S> for Claims
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| AuthError::InvalidToken)?;

        let auth_state = AuthState::from_ref(state);

        let token_data = decode_jwt(bearer.token(), auth_state.decoding_key())?;

        Ok(token_data.claims)
    }
}

/// The ways validating or issuing a token can fail.
#[derive(Debug, PartialEq)]
pub enum AuthError {
    /// The token's expiry time has passed.
    ExpiredToken,
    /// The header was missing, garbled, or the signature did not check out.
    InvalidToken,
    /// Signing a new token failed.
    TokenCreation,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response<Body> {
        let (status, body) = match self {
            AuthError::ExpiredToken => (
                StatusCode::UNAUTHORIZED,
                json!({"error": "Logged In Session has ended", "status": 401}),
            ),
            AuthError::InvalidToken => (StatusCode::BAD_REQUEST, json!({"error": "Invalid token"})),
            AuthError::TokenCreation => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({"error": "Token creation error"}),
            ),
        };

        (status, axum::Json(body)).into_response()
    }
}

/// Issue a signed token for `userid`, valid for [TOKEN_LIFETIME].
pub fn encode_jwt(userid: &str, encoding_key: &EncodingKey) -> Result<String, AuthError> {
    let now = OffsetDateTime::now_utc();
    let claims = Claims {
        exp: (now + TOKEN_LIFETIME).unix_timestamp() as usize,
        iat: now.unix_timestamp() as usize,
        sub: userid.to_owned(),
    };

    encode(&Header::default(), &claims, encoding_key).map_err(|_| AuthError::TokenCreation)
}

fn decode_jwt(jwt_token: &str, decoding_key: &DecodingKey) -> Result<TokenData<Claims>, AuthError> {
    decode(jwt_token, decoding_key, &Validation::default()).map_err(|error| {
        match error.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        }
    })
}

#[cfg(test)]
pub(crate) fn encode_expired_jwt(userid: &str, encoding_key: &EncodingKey) -> String {
    let now = OffsetDateTime::now_utc();
    let claims = Claims {
        exp: (now - Duration::hours(2)).unix_timestamp() as usize,
        iat: (now - Duration::hours(3)).unix_timestamp() as usize,
        sub: userid.to_owned(),
    };

    encode(&Header::default(), &claims, encoding_key).unwrap()
}
