//! Expense record-keeping routes.
//!
//! Creation and deletion are management actions behind the PRO plan gate;
//! listing is open to every authenticated session of the condominium.
//! There is no update route: expenses are immutable records.

use crate::access::{Permission, Session};
use crate::api::{AppState, parse_json};
use crate::core::{expense, period::Period};
use crate::entities::ExpenseModel;
use crate::errors::{Error, Result};
use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    routing::{delete, post},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Expense routes, all session-authenticated.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/expenses", post(create).get(list))
        .route("/api/expenses/{id}", delete(remove))
}

/// Request body for recording an expense.
#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    /// Human-readable description
    pub description: String,
    /// Amount, finite and positive
    pub amount: f64,
    /// Free-form category used for bucket mapping
    pub category: String,
    /// Calendar day the expense is attributed to, ISO `YYYY-MM-DD`
    pub date: NaiveDate,
}

/// Optional month filter for the expense list.
#[derive(Debug, Deserialize)]
pub struct ExpenseListQuery {
    /// Calendar month (1-12); requires `year`
    pub month: Option<u32>,
    /// Calendar year; requires `month`
    pub year: Option<i32>,
}

/// Response for mutations that return no resource body.
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    /// Always `true`; failures answer with an error body instead
    pub success: bool,
}

async fn create(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<CreateExpenseRequest>, JsonRejection>,
) -> Result<Json<ExpenseModel>> {
    let request = parse_json(payload)?;
    session.require_permission(Permission::ManageExpenses)?;

    let expense = expense::create(
        &state.db,
        &session.condominium_id,
        &request.description,
        request.amount,
        &request.category,
        request.date,
    )
    .await?;
    Ok(Json(expense))
}

async fn list(
    State(state): State<AppState>,
    session: Session,
    Query(query): Query<ExpenseListQuery>,
) -> Result<Json<Vec<ExpenseModel>>> {
    session.require_permission(Permission::ViewFinancials)?;

    let expenses = match (query.year, query.month) {
        (Some(year), Some(month)) => {
            let period = Period::new(year, month)?;
            expense::list_for_month(&state.db, &session.condominium_id, period).await?
        }
        (None, None) => expense::list(&state.db, &session.condominium_id).await?,
        _ => {
            return Err(Error::Validation {
                message: "month and year must be provided together".to_string(),
            });
        }
    };
    Ok(Json(expenses))
}

async fn remove(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<Json<SuccessResponse>> {
    session.require_permission(Permission::ManageExpenses)?;

    expense::delete(&state.db, &session.condominium_id, &id).await?;
    Ok(Json(SuccessResponse { success: true }))
}
