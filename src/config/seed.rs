//! First-run seeding of condominiums and their units from the settings file.
//!
//! Condominiums are provisioned by the operator, not through the API, so the
//! `[[condominiums]]` entries of condo.toml are materialized into the
//! database at startup. Seeding is idempotent per condominium id: an id that
//! already exists is left untouched, including its units, so restarts never
//! duplicate or overwrite data the service has since been mutating.

use crate::access::PlanTier;
use crate::config::settings::Settings;
use crate::core;
use crate::errors::Result;
use sea_orm::DatabaseConnection;

/// Seeds the configured condominiums and units into the database.
///
/// # Errors
/// Returns an error if a configured plan or coefficient is invalid or a
/// database operation fails.
pub async fn seed_condominiums(db: &DatabaseConnection, settings: &Settings) -> Result<()> {
    for condominium in &settings.condominiums {
        let plan = PlanTier::parse(&condominium.plan)?;

        if core::condominium::find(db, &condominium.id).await?.is_some() {
            tracing::debug!(
                "Condominium '{}' already exists, skipping seed",
                condominium.id
            );
            continue;
        }

        core::condominium::create(db, &condominium.id, &condominium.name, plan).await?;
        for unit in &condominium.units {
            core::unit::create(
                db,
                &condominium.id,
                &unit.number,
                unit.coefficient,
                &unit.contact_name,
                &unit.access_pin,
            )
            .await?;
        }

        tracing::info!(
            "Seeded condominium '{}' with {} unit(s)",
            condominium.id,
            condominium.units.len()
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::entities::{Condominium, Unit};
    use sea_orm::EntityTrait;

    fn settings_with_one_condominium() -> Settings {
        toml::from_str(
            r#"
            [[condominiums]]
            id = "torre-alba"
            name = "Torre Alba"
            plan = "pro"

            [[condominiums.units]]
            number = "1A"
            coefficient = 60.0
            contact_name = "Ana Souto"
            access_pin = "4821"

            [[condominiums.units]]
            number = "1B"
            coefficient = 40.0
            contact_name = "Bruno Lima"
            access_pin = "7035"
        "#,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn test_seed_creates_condominium_and_units() -> Result<()> {
        let db = crate::test_utils::setup_test_db().await?;
        let settings = settings_with_one_condominium();

        seed_condominiums(&db, &settings).await?;

        let condominium = core::condominium::get(&db, "torre-alba").await?;
        assert_eq!(condominium.name, "Torre Alba");
        // Plan strings are canonicalized before hitting the database.
        assert_eq!(condominium.plan, "PRO");

        let units = Unit::find().all(&db).await?;
        assert_eq!(units.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_is_idempotent() -> Result<()> {
        let db = crate::test_utils::setup_test_db().await?;
        let settings = settings_with_one_condominium();

        seed_condominiums(&db, &settings).await?;
        seed_condominiums(&db, &settings).await?;

        assert_eq!(Condominium::find().all(&db).await?.len(), 1);
        assert_eq!(Unit::find().all(&db).await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_seed_rejects_unknown_plan() {
        let db = crate::test_utils::setup_test_db().await.unwrap();
        let settings: Settings = toml::from_str(
            r#"
            [[condominiums]]
            id = "torre-alba"
            name = "Torre Alba"
            plan = "PLATINUM"
        "#,
        )
        .unwrap();

        assert!(seed_condominiums(&db, &settings).await.is_err());
    }
}
