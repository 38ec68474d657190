//! Unit management business logic.
//!
//! Units carry the ownership coefficient that drives settlement shares.
//! The coefficient is administrator-entered and validated to [0, 100];
//! whether the coefficients of a condominium sum to 100 is deliberately
//! left to the configurable check in `core::settlement`.

use crate::{
    core::condominium,
    entities::{Unit, unit},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*};
use uuid::Uuid;

fn validate_coefficient(coefficient: f64) -> Result<()> {
    if !coefficient.is_finite() || !(0.0..=100.0).contains(&coefficient) {
        return Err(Error::Validation {
            message: format!("coefficient must be between 0 and 100, got {coefficient}"),
        });
    }
    Ok(())
}

/// Creates a new unit inside a condominium.
///
/// # Errors
/// Returns `Error::NotFound` if the condominium does not exist and
/// `Error::Validation` for an empty number or out-of-range coefficient.
pub async fn create(
    db: &DatabaseConnection,
    condominium_id: &str,
    number: &str,
    coefficient: f64,
    contact_name: &str,
    access_pin: &str,
) -> Result<unit::Model> {
    condominium::get(db, condominium_id).await?;

    if number.trim().is_empty() {
        return Err(Error::Validation {
            message: "Unit number cannot be empty".to_string(),
        });
    }
    validate_coefficient(coefficient)?;

    let unit = unit::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        condominium_id: Set(condominium_id.to_string()),
        number: Set(number.trim().to_string()),
        coefficient: Set(coefficient),
        access_pin: Set(access_pin.to_string()),
        contact_name: Set(contact_name.trim().to_string()),
    };

    let result = unit.insert(db).await?;
    Ok(result)
}

/// Retrieves all units of a condominium, ordered by unit number.
pub async fn list(db: &DatabaseConnection, condominium_id: &str) -> Result<Vec<unit::Model>> {
    Unit::find()
        .filter(unit::Column::CondominiumId.eq(condominium_id))
        .order_by_asc(unit::Column::Number)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Fetches a unit by id.
///
/// # Errors
/// Returns `Error::NotFound` if no unit has this id.
pub async fn get(db: &DatabaseConnection, id: &str) -> Result<unit::Model> {
    Unit::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: format!("Unit '{id}'"),
        })
}

/// Applies a partial update to a unit. `None` fields are left unchanged.
///
/// # Errors
/// Returns `Error::NotFound` if the unit does not exist and
/// `Error::Validation` for an empty number or out-of-range coefficient.
pub async fn update(
    db: &DatabaseConnection,
    id: &str,
    number: Option<String>,
    coefficient: Option<f64>,
    contact_name: Option<String>,
    access_pin: Option<String>,
) -> Result<unit::Model> {
    let existing = get(db, id).await?;
    let mut active: unit::ActiveModel = existing.into();

    if let Some(number) = number {
        if number.trim().is_empty() {
            return Err(Error::Validation {
                message: "Unit number cannot be empty".to_string(),
            });
        }
        active.number = Set(number.trim().to_string());
    }
    if let Some(coefficient) = coefficient {
        validate_coefficient(coefficient)?;
        active.coefficient = Set(coefficient);
    }
    if let Some(contact_name) = contact_name {
        active.contact_name = Set(contact_name.trim().to_string());
    }
    if let Some(access_pin) = access_pin {
        active.access_pin = Set(access_pin);
    }

    let updated = active.update(db).await?;
    Ok(updated)
}
