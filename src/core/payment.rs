//! Payment recording business logic.
//!
//! Payments are money received from a unit. They never mutate a balance
//! directly; the settlement calculator picks up the payments dated inside
//! the billing period and offsets the unit's bill with their sum.

use crate::{
    core::{period::Period, unit},
    entities::{Payment, payment},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use uuid::Uuid;

/// Records a payment received from a unit.
///
/// # Errors
/// Returns `Error::InvalidAmount` unless `amount` is finite and positive,
/// and `Error::NotFound` if the unit does not exist in this condominium.
pub async fn create(
    db: &DatabaseConnection,
    condominium_id: &str,
    unit_id: &str,
    amount: f64,
    date: Date,
) -> Result<payment::Model> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidAmount { amount });
    }

    let unit = unit::get(db, unit_id).await?;
    if unit.condominium_id != condominium_id {
        // From this condominium's point of view the unit does not exist.
        return Err(Error::NotFound {
            entity: format!("Unit '{unit_id}'"),
        });
    }

    let payment = payment::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        condominium_id: Set(condominium_id.to_string()),
        unit_id: Set(unit_id.to_string()),
        amount: Set(amount),
        date: Set(date),
        recorded_at: Set(chrono::Utc::now()),
    };

    let result = payment.insert(db).await?;
    Ok(result)
}

/// Retrieves all payments received from a unit, newest first.
pub async fn list_for_unit(db: &DatabaseConnection, unit_id: &str) -> Result<Vec<payment::Model>> {
    Payment::find()
        .filter(payment::Column::UnitId.eq(unit_id))
        .order_by_desc(payment::Column::Date)
        .order_by_desc(payment::Column::RecordedAt)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Sums the unit's payments dated inside one billing period.
///
/// Returns the raw sum; callers round at their own computation points.
pub async fn sum_for_period(db: &DatabaseConnection, unit_id: &str, period: Period) -> Result<f64> {
    let (first_day, last_day) = period.day_bounds()?;

    let payments = Payment::find()
        .filter(payment::Column::UnitId.eq(unit_id))
        .filter(payment::Column::Date.between(first_day, last_day))
        .all(db)
        .await?;

    Ok(payments.iter().map(|p| p.amount).sum())
}
