//! Settlement routes: preview, confirm, and history.
//!
//! Preview and confirm share one request shape. Preview answers with the
//! full breakdown and writes nothing; confirm persists the breakdown and
//! answers with the new settlement id. Both cross-check the requested
//! condominium against the session before touching the calculator.

use crate::access::{Permission, Session};
use crate::api::{AppState, parse_json};
use crate::core::settlement::{self, SettlementBreakdown, SettlementInput};
use crate::entities::{SettlementModel, UnitAccountStatusModel};
use crate::errors::Result;
use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

/// Settlement routes, all session-authenticated.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/settlements/preview", post(preview))
        .route("/api/settlements/confirm", post(confirm))
        .route("/api/settlements", get(list))
        .route("/api/settlements/{id}", get(get_one))
}

/// Request body shared by preview and confirm.
#[derive(Debug, Deserialize)]
pub struct SettlementRequest {
    /// Condominium being settled; must match the session
    pub condominium_id: String,
    /// Calendar year of the billing period
    pub year: i32,
    /// Calendar month of the billing period (1-12)
    pub month: u32,
    /// Interest rate on positive previous balances, in `[0, 1]`
    pub interest_rate: f64,
    /// Reserve-fund rate on each unit's share, in `[0, 1]`
    pub reserve_fund_rate: f64,
}

impl SettlementRequest {
    fn into_input(self) -> SettlementInput {
        SettlementInput {
            condominium_id: self.condominium_id,
            year: self.year,
            month: self.month,
            interest_rate: self.interest_rate,
            reserve_fund_rate: self.reserve_fund_rate,
        }
    }
}

/// Response of a successful confirmation.
#[derive(Debug, Serialize)]
pub struct ConfirmResponse {
    /// Always `true`; failures answer with an error body instead
    pub success: bool,
    /// Id of the persisted settlement
    pub settlement_id: String,
}

/// One settlement with its per-unit snapshots.
#[derive(Debug, Serialize)]
pub struct SettlementDetail {
    /// The settlement row
    pub settlement: SettlementModel,
    /// Per-unit ledger snapshots, ordered by owner name
    pub units: Vec<UnitAccountStatusModel>,
}

async fn preview(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<SettlementRequest>, JsonRejection>,
) -> Result<Json<SettlementBreakdown>> {
    let request = parse_json(payload)?;
    session.require_condominium(&request.condominium_id)?;
    session.require_permission(Permission::ViewFinancials)?;

    let breakdown = settlement::calculate(
        &state.db,
        &state.buckets,
        state.coefficient_policy,
        &request.into_input(),
    )
    .await?;
    Ok(Json(breakdown))
}

async fn confirm(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<SettlementRequest>, JsonRejection>,
) -> Result<Json<ConfirmResponse>> {
    let request = parse_json(payload)?;
    session.require_condominium(&request.condominium_id)?;
    session.require_permission(Permission::ManageExpenses)?;

    let settlement = settlement::confirm(
        &state.db,
        &state.buckets,
        state.coefficient_policy,
        &request.into_input(),
    )
    .await?;

    Ok(Json(ConfirmResponse {
        success: true,
        settlement_id: settlement.id,
    }))
}

async fn list(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<SettlementModel>>> {
    session.require_permission(Permission::ViewFinancials)?;
    let settlements = settlement::list(&state.db, &session.condominium_id).await?;
    Ok(Json(settlements))
}

async fn get_one(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<SettlementDetail>> {
    session.require_permission(Permission::ViewFinancials)?;

    let (settlement, units) = settlement::get_with_snapshots(&state.db, &id).await?;
    session.require_condominium(&settlement.condominium_id)?;

    Ok(Json(SettlementDetail { settlement, units }))
}
