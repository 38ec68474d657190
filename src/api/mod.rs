//! HTTP interface.
//!
//! Each resource gets its own module with a `router()` function; this module
//! merges them, attaches the tower-http middleware stack, and owns the shared
//! [`AppState`]. All business rules live in `core`; handlers only extract,
//! authorize and translate.

use crate::config::sessions::SessionProvider;
use crate::config::settings::{BucketSettings, CoefficientSumCheck, Settings};
use crate::errors::{Error, Result};
use axum::{
    Json, Router,
    extract::rejection::JsonRejection,
    routing::get,
};
use sea_orm::DatabaseConnection;
use serde::Serialize;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Session bearer-token extraction
pub mod auth;

/// Expense record-keeping routes
pub mod expenses;

/// Payment recording routes
pub mod payments;

/// Settlement preview, confirm and history routes
pub mod settlements;

/// Unit management and statement routes
pub mod units;

/// Shared state available to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Database handle
    pub db: DatabaseConnection,
    /// Expense category to bucket mapping
    pub buckets: Arc<BucketSettings>,
    /// Coefficient-sum policy applied by the calculator
    pub coefficient_policy: CoefficientSumCheck,
    /// Bearer-token session table
    pub sessions: Arc<SessionProvider>,
}

impl AppState {
    /// Builds the state from a database connection and loaded settings.
    ///
    /// # Errors
    /// Returns `Error::Config` if the session table fails validation.
    pub fn new(db: DatabaseConnection, settings: &Settings) -> Result<Self> {
        let sessions = SessionProvider::from_settings(settings)?;
        Ok(Self {
            db,
            buckets: Arc::new(settings.buckets.clone()),
            coefficient_policy: settings.liquidation.coefficient_sum_check,
            sessions: Arc::new(sessions),
        })
    }
}

/// Unwraps an extracted JSON body, mapping rejections to a validation error.
///
/// Missing or malformed request bodies answer 400 like any other bad input
/// instead of axum's default rejection response.
pub(crate) fn parse_json<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => Err(Error::Validation {
            message: rejection.body_text(),
        }),
    }
}

/// Builds a router with all routes registered (no middleware, no state).
pub fn build_router() -> Router<AppState> {
    Router::new()
        .merge(settlements::router())
        .merge(expenses::router())
        .merge(units::router())
        .merge(payments::router())
        // Public liveness probe
        .route("/health", get(health))
}

/// Builds the fully configured application with middleware and state.
pub fn build_app(state: AppState) -> Router {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use crate::test_utils::{api_request, setup_test_app};
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn test_health_is_public() {
        let (app, _db) = setup_test_app().await.unwrap();
        let (status, body) = api_request(&app, Method::GET, "/health", None, None)
            .await
            .unwrap();
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_api_routes_require_a_token() {
        let (app, _db) = setup_test_app().await.unwrap();
        let (status, body) = api_request(&app, Method::GET, "/api/settlements", None, None)
            .await
            .unwrap();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_token_is_unauthorized() {
        let (app, _db) = setup_test_app().await.unwrap();
        let (status, _body) = api_request(
            &app,
            Method::GET,
            "/api/settlements",
            Some("not-a-real-token"),
            None,
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }
}
