//! Shared test utilities for the ledger service.
//!
//! This module provides common helper functions for setting up test
//! databases, creating test entities with sensible defaults, and driving
//! the HTTP router with in-process requests.

use crate::{
    access::PlanTier,
    api::AppState,
    config::settings::Settings,
    core::{condominium, expense, payment, unit},
    entities,
    errors::{Error, Result},
};
use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use chrono::NaiveDate;
use sea_orm::DatabaseConnection;

/// Settings used by router tests: a PRO condominium with admin and resident
/// tokens, and a FREE condominium with its own admin token.
const TEST_SETTINGS: &str = r#"
    [buckets]
    b = ["services"]
    c = ["extraordinary"]

    [[condominiums]]
    id = "torre-alba"
    name = "Torre Alba"
    plan = "PRO"

    [[condominiums]]
    id = "libre-casa"
    name = "Libre Casa"
    plan = "FREE"

    [[sessions]]
    token = "admin-token"
    condominium = "torre-alba"
    role = "ADMIN"
    plan = "PRO"

    [[sessions]]
    token = "resident-token"
    condominium = "torre-alba"
    role = "RESIDENT"
    plan = "PRO"

    [[sessions]]
    token = "free-admin-token"
    condominium = "libre-casa"
    role = "ADMIN"
    plan = "FREE"
"#;

/// Creates an in-memory `SQLite` database with all tables initialized.
/// This is the standard setup for all integration tests.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// Builds the full application over a fresh in-memory database, with the
/// condominiums and session tokens from [`TEST_SETTINGS`] seeded.
///
/// Returns the router plus the underlying connection so tests can arrange
/// data directly.
pub async fn setup_test_app() -> Result<(Router, DatabaseConnection)> {
    let db = setup_test_db().await?;
    let settings: Settings = toml::from_str(TEST_SETTINGS).map_err(|e| Error::Config {
        message: format!("test settings failed to parse: {e}"),
    })?;
    crate::config::seed::seed_condominiums(&db, &settings).await?;
    let state = AppState::new(db.clone(), &settings)?;
    Ok((crate::api::build_app(state), db))
}

fn request_error(e: impl std::fmt::Display) -> Error {
    Error::Config {
        message: format!("test request failed: {e}"),
    }
}

/// Sends one request through the router and returns the status plus the
/// JSON-decoded body (`Null` for empty bodies).
pub async fn api_request(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Result<(StatusCode, serde_json::Value)> {
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    let request = if let Some(json) = body {
        let bytes = serde_json::to_vec(&json).map_err(request_error)?;
        builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(bytes))
            .map_err(request_error)?
    } else {
        builder.body(Body::empty()).map_err(request_error)?
    };

    let response = match app.clone().oneshot(request).await {
        Ok(response) => response,
        Err(infallible) => match infallible {},
    };

    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .map_err(request_error)?
        .to_bytes();
    let value = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).map_err(request_error)?
    };

    Ok((status, value))
}

/// Creates a test condominium with the given id and plan.
///
/// The display name is derived from the id; use `core::condominium::create`
/// directly when a test cares about the name.
pub async fn create_test_condominium(
    db: &DatabaseConnection,
    id: &str,
    plan: PlanTier,
) -> Result<entities::condominium::Model> {
    condominium::create(db, id, &format!("Test {id}"), plan).await
}

/// Creates a test unit with sensible defaults.
///
/// # Defaults
/// * `contact_name`: `"Owner <number>"`
/// * `access_pin`: `"0000"`
pub async fn create_test_unit(
    db: &DatabaseConnection,
    condominium_id: &str,
    number: &str,
    coefficient: f64,
) -> Result<entities::unit::Model> {
    unit::create(
        db,
        condominium_id,
        number,
        coefficient,
        &format!("Owner {number}"),
        "0000",
    )
    .await
}

/// Creates a test expense dated on the given day.
///
/// # Defaults
/// * `description`: `"Test expense"`
pub async fn create_test_expense(
    db: &DatabaseConnection,
    condominium_id: &str,
    amount: f64,
    category: &str,
    date: NaiveDate,
) -> Result<entities::expense::Model> {
    expense::create(db, condominium_id, "Test expense", amount, category, date).await
}

/// Records a test payment from a unit on the given day.
pub async fn create_test_payment(
    db: &DatabaseConnection,
    condominium_id: &str,
    unit_id: &str,
    amount: f64,
    date: NaiveDate,
) -> Result<entities::payment::Model> {
    payment::create(db, condominium_id, unit_id, amount, date).await
}
