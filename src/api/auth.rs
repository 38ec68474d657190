//! Bearer-token session extraction.
//!
//! Handlers declare a [`Session`] parameter and get the resolved session for
//! the request's `Authorization: Bearer` token, or a 401 before the handler
//! body runs. There is no ambient current-user state anywhere; everything a
//! handler knows about the caller arrives through this extractor.

use crate::access::Session;
use crate::api::AppState;
use crate::errors::Error;
use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

impl FromRequestParts<AppState> for Session {
    type Rejection = Error;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .map(str::trim);

        let Some(token) = token else {
            tracing::warn!(uri = %parts.uri, "request without bearer token");
            return Err(Error::Unauthenticated);
        };

        state.sessions.resolve(token).ok_or_else(|| {
            tracing::warn!(uri = %parts.uri, "unknown bearer token");
            Error::Unauthenticated
        })
    }
}
