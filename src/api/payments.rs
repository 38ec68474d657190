//! Payment recording routes.
//!
//! Recording needs the `RecordPayments` permission (admin role, any plan);
//! the list is open to every session of the condominium and is always
//! scoped to one unit.

use crate::access::{Permission, Session};
use crate::api::{AppState, parse_json};
use crate::core::{payment, unit};
use crate::entities::PaymentModel;
use crate::errors::Result;
use axum::{
    Json, Router,
    extract::{Query, State, rejection::JsonRejection},
    routing::post,
};
use chrono::NaiveDate;
use serde::Deserialize;

/// Payment routes, all session-authenticated.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/payments", post(create).get(list))
}

/// Request body for recording a payment.
#[derive(Debug, Deserialize)]
pub struct CreatePaymentRequest {
    /// Unit the payment was received from
    pub unit_id: String,
    /// Amount received, finite and positive
    pub amount: f64,
    /// Calendar day the payment is attributed to, ISO `YYYY-MM-DD`
    pub date: NaiveDate,
}

/// Unit selector for the payment list.
#[derive(Debug, Deserialize)]
pub struct PaymentListQuery {
    /// Unit whose payments are listed
    pub unit_id: String,
}

async fn create(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<CreatePaymentRequest>, JsonRejection>,
) -> Result<Json<PaymentModel>> {
    let request = parse_json(payload)?;
    session.require_permission(Permission::RecordPayments)?;

    let payment = payment::create(
        &state.db,
        &session.condominium_id,
        &request.unit_id,
        request.amount,
        request.date,
    )
    .await?;
    Ok(Json(payment))
}

async fn list(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<PaymentListQuery>,
) -> Result<Json<Vec<PaymentModel>>> {
    session.require_permission(Permission::ViewFinancials)?;

    let unit = unit::get(&state.db, &query.unit_id).await?;
    session.require_condominium(&unit.condominium_id)?;

    let payments = payment::list_for_unit(&state.db, &query.unit_id).await?;
    Ok(Json(payments))
}
