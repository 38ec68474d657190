//! Unit entity - one dwelling inside a condominium.
//!
//! The `coefficient` is the unit's percentage share (0-100) of common
//! expenses, entered by the administrator. The system does not force the
//! coefficients of a condominium to sum to 100; see the configurable
//! check in `core::settlement`.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Unit database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "units")]
pub struct Model {
    /// Unique identifier for the unit
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Condominium this unit belongs to
    pub condominium_id: String,
    /// Door/apartment number, e.g. `"1A"`
    pub number: String,
    /// Percentage share of common expenses (0-100)
    pub coefficient: f64,
    /// PIN used by the resident to access their statements
    pub access_pin: String,
    /// Name of the registered owner or contact person
    pub contact_name: String,
}

/// Defines relationships between Unit and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each unit belongs to one condominium
    #[sea_orm(
        belongs_to = "super::condominium::Entity",
        from = "Column::CondominiumId",
        to = "super::condominium::Column::Id"
    )]
    Condominium,
    /// Payments received from this unit
    #[sea_orm(has_many = "super::payment::Entity")]
    Payment,
    /// Ledger snapshots recorded for this unit
    #[sea_orm(has_many = "super::unit_account_status::Entity")]
    UnitAccountStatus,
}

impl Related<super::condominium::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Condominium.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payment.def()
    }
}

impl Related<super::unit_account_status::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UnitAccountStatus.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
