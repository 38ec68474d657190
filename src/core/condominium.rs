//! Condominium registry operations.
//!
//! Condominiums are tenant rows. They come from the settings file at startup
//! (see `config::seed`), so creation takes the operator-assigned id instead
//! of generating one; there is no API route that creates condominiums.

use crate::access::PlanTier;
use crate::entities::{Condominium, condominium};
use crate::errors::{Error, Result};
use sea_orm::{Set, prelude::*};

/// Finds a condominium by id, returning `None` if absent.
pub async fn find(db: &DatabaseConnection, id: &str) -> Result<Option<condominium::Model>> {
    Condominium::find_by_id(id).one(db).await.map_err(Into::into)
}

/// Fetches a condominium by id.
///
/// # Errors
/// Returns `Error::NotFound` if no condominium has this id.
pub async fn get(db: &DatabaseConnection, id: &str) -> Result<condominium::Model> {
    find(db, id).await?.ok_or_else(|| Error::NotFound {
        entity: format!("Condominium '{id}'"),
    })
}

/// Creates a condominium with an explicit id.
///
/// # Errors
/// Returns `Error::Config` for an empty id or name; these values come from
/// the settings file, not from request input.
pub async fn create(
    db: &DatabaseConnection,
    id: &str,
    name: &str,
    plan: PlanTier,
) -> Result<condominium::Model> {
    if id.trim().is_empty() {
        return Err(Error::Config {
            message: "Condominium id cannot be empty".to_string(),
        });
    }
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Condominium name cannot be empty".to_string(),
        });
    }

    let condominium = condominium::ActiveModel {
        id: Set(id.trim().to_string()),
        name: Set(name.trim().to_string()),
        plan: Set(plan.as_str().to_string()),
    };

    let result = condominium.insert(db).await?;
    Ok(result)
}
