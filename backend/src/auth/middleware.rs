//! Bearer credential extraction
//!
//! The gateway does not validate tokens itself. It forwards them to the
//! upstream, which is the only party able to judge them.

use crate::error::ApiError;
use crate::upstream::{RotatedTokens, Session};
use axum::{
    http::{header::AUTHORIZATION, request::Parts, HeaderMap, HeaderName, HeaderValue},
    response::{IntoResponse, Response},
};

/// Optional request header carrying the caller's refresh token
pub const REFRESH_TOKEN_HEADER: &str = "x-refresh-token";
/// Response header carrying a rotated access token
pub const ACCESS_TOKEN_HEADER: &str = "x-access-token";

/// Upstream session built from the caller's headers
#[derive(Debug)]
pub struct AuthSession(pub Session);

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthSession
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .ok_or_else(|| ApiError::Unauthorized("Invalid authorization format".to_string()))?;

        let refresh = parts
            .headers
            .get(REFRESH_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(str::to_string);

        Ok(AuthSession(Session::new(token, refresh)))
    }
}

impl AuthSession {
    /// Attach rotated tokens, if any, to a handler's response, errors included
    pub async fn respond<T: IntoResponse>(self, body: T) -> Response {
        let mut response = body.into_response();
        if let Some(rotated) = self.0.rotated().await {
            insert_token_headers(response.headers_mut(), &rotated);
        }
        response
    }
}

fn insert_token_headers(headers: &mut HeaderMap, rotated: &RotatedTokens) {
    let pairs = [
        (ACCESS_TOKEN_HEADER, &rotated.access_token),
        (REFRESH_TOKEN_HEADER, &rotated.refresh_token),
    ];
    for (name, token) in pairs {
        if let Ok(value) = HeaderValue::from_str(token) {
            headers.insert(HeaderName::from_static(name), value);
        }
    }
}
