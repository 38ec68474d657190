//! Unit management and statement routes.
//!
//! Creation and edits require the `ManageUnits` permission (admin role, any
//! plan). The statements route is the resident-facing view: the snapshot
//! history of one unit across all settled periods.

use crate::access::{Permission, Session};
use crate::api::{AppState, parse_json};
use crate::core::{settlement, unit};
use crate::entities::UnitModel;
use crate::errors::Result;
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::{get, post, put},
};
use serde::{Deserialize, Serialize};

/// Unit routes, all session-authenticated.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/units", post(create).get(list))
        .route("/api/units/{id}", put(update))
        .route("/api/units/{id}/statements", get(statements))
}

/// Request body for creating a unit.
#[derive(Debug, Deserialize)]
pub struct CreateUnitRequest {
    /// Door/apartment number
    pub number: String,
    /// Percentage share of common expenses (0-100)
    pub coefficient: f64,
    /// Name of the registered owner or contact person
    #[serde(default)]
    pub contact_name: String,
    /// PIN used by the resident to access their statements
    #[serde(default)]
    pub access_pin: String,
}

/// Request body for a partial unit update; absent fields stay unchanged.
#[derive(Debug, Deserialize)]
pub struct UpdateUnitRequest {
    /// New door/apartment number
    pub number: Option<String>,
    /// New coefficient (0-100)
    pub coefficient: Option<f64>,
    /// New contact name
    pub contact_name: Option<String>,
    /// New access PIN
    pub access_pin: Option<String>,
}

/// One line of a unit's statement history.
#[derive(Debug, Serialize)]
pub struct StatementEntry {
    /// Settlement the snapshot was written for
    pub settlement_id: String,
    /// Billing period, ISO `"YYYY-MM"`
    pub period: String,
    /// Unpaid amount carried in from the previous period
    pub previous_balance: f64,
    /// Payments received during the period
    pub payments_amount: f64,
    /// Interest charged on the previous balance
    pub interest_amount: f64,
    /// The unit's share of the period's pooled expenses
    pub current_period_share: f64,
    /// Reserve-fund surcharge on the share
    pub reserve_fund_amount: f64,
    /// Net amount due; negative means credit
    pub total_to_pay: f64,
}

async fn create(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<CreateUnitRequest>, JsonRejection>,
) -> Result<Json<UnitModel>> {
    let request = parse_json(payload)?;
    session.require_permission(Permission::ManageUnits)?;

    let unit = unit::create(
        &state.db,
        &session.condominium_id,
        &request.number,
        request.coefficient,
        &request.contact_name,
        &request.access_pin,
    )
    .await?;
    Ok(Json(unit))
}

async fn list(State(state): State<AppState>, session: Session) -> Result<Json<Vec<UnitModel>>> {
    session.require_permission(Permission::ViewFinancials)?;
    let units = unit::list(&state.db, &session.condominium_id).await?;
    Ok(Json(units))
}

async fn update(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUnitRequest>, JsonRejection>,
) -> Result<Json<UnitModel>> {
    let request = parse_json(payload)?;
    session.require_permission(Permission::ManageUnits)?;

    let existing = unit::get(&state.db, &id).await?;
    session.require_condominium(&existing.condominium_id)?;

    let updated = unit::update(
        &state.db,
        &id,
        request.number,
        request.coefficient,
        request.contact_name,
        request.access_pin,
    )
    .await?;
    Ok(Json(updated))
}

async fn statements(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<Vec<StatementEntry>>> {
    session.require_permission(Permission::ViewFinancials)?;

    let unit = unit::get(&state.db, &id).await?;
    session.require_condominium(&unit.condominium_id)?;

    let statements = settlement::statements_for_unit(&state.db, &id).await?;
    let entries = statements
        .into_iter()
        .map(|(snapshot, settlement)| StatementEntry {
            settlement_id: settlement.id,
            period: settlement.period,
            previous_balance: snapshot.previous_balance,
            payments_amount: snapshot.payments_amount,
            interest_amount: snapshot.interest_amount,
            current_period_share: snapshot.current_period_share,
            reserve_fund_amount: snapshot.reserve_fund_amount,
            total_to_pay: snapshot.total_to_pay,
        })
        .collect();
    Ok(Json(entries))
}
