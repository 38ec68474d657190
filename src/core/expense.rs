//! Expense record-keeping business logic.
//!
//! Expenses are the raw material of a settlement: whatever is dated inside
//! a billing period gets pooled and split across units. Records are
//! immutable once created; correcting a mistake means deleting the record
//! and entering a new one.

use crate::{
    core::{condominium, period::Period},
    entities::{Expense, expense},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use uuid::Uuid;

/// Creates a new expense record.
///
/// # Errors
/// Returns `Error::NotFound` if the condominium does not exist,
/// `Error::Validation` for an empty description or category, and
/// `Error::InvalidAmount` unless `amount` is finite and positive.
pub async fn create(
    db: &DatabaseConnection,
    condominium_id: &str,
    description: &str,
    amount: f64,
    category: &str,
    date: Date,
) -> Result<expense::Model> {
    condominium::get(db, condominium_id).await?;

    if description.trim().is_empty() {
        return Err(Error::Validation {
            message: "Expense description cannot be empty".to_string(),
        });
    }
    if category.trim().is_empty() {
        return Err(Error::Validation {
            message: "Expense category cannot be empty".to_string(),
        });
    }
    if !amount.is_finite() || amount <= 0.0 {
        return Err(Error::InvalidAmount { amount });
    }

    let expense = expense::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        condominium_id: Set(condominium_id.to_string()),
        description: Set(description.trim().to_string()),
        amount: Set(amount),
        category: Set(category.trim().to_string()),
        date: Set(date),
    };

    let result = expense.insert(db).await?;
    Ok(result)
}

/// Retrieves all expenses of a condominium, newest first.
pub async fn list(db: &DatabaseConnection, condominium_id: &str) -> Result<Vec<expense::Model>> {
    Expense::find()
        .filter(expense::Column::CondominiumId.eq(condominium_id))
        .order_by_desc(expense::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Retrieves the expenses of a condominium dated inside one billing period.
///
/// Both period bounds are inclusive; an expense dated on the last day of
/// the month belongs to that month.
pub async fn list_for_month(
    db: &DatabaseConnection,
    condominium_id: &str,
    period: Period,
) -> Result<Vec<expense::Model>> {
    let (first_day, last_day) = period.day_bounds()?;

    Expense::find()
        .filter(expense::Column::CondominiumId.eq(condominium_id))
        .filter(expense::Column::Date.between(first_day, last_day))
        .order_by_asc(expense::Column::Date)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Deletes an expense of a condominium.
///
/// The condominium filter makes the operation tenant-safe: an expense id
/// belonging to another condominium behaves exactly like a missing one.
///
/// # Errors
/// Returns `Error::NotFound` if no matching expense exists.
pub async fn delete(db: &DatabaseConnection, condominium_id: &str, expense_id: &str) -> Result<()> {
    let result = Expense::delete_many()
        .filter(expense::Column::Id.eq(expense_id))
        .filter(expense::Column::CondominiumId.eq(condominium_id))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::NotFound {
            entity: format!("Expense '{expense_id}'"),
        });
    }
    Ok(())
}
