//! Condominium entity - the tenant registry.
//!
//! Each row is one managed condominium. Rows are seeded from the config file
//! with operator-assigned ids; the `plan` column carries the subscription
//! tier (`"FREE"` or `"PRO"`) that gates financial-management features.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Condominium database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "condominiums")]
pub struct Model {
    /// Operator-assigned identifier (document id)
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Display name of the condominium
    pub name: String,
    /// Subscription tier: `"FREE"` or `"PRO"`
    pub plan: String,
}

/// Defines relationships between Condominium and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// A condominium owns many units
    #[sea_orm(has_many = "super::unit::Entity")]
    Unit,
    /// A condominium owns many expense records
    #[sea_orm(has_many = "super::expense::Entity")]
    Expense,
    /// A condominium owns many settlements
    #[sea_orm(has_many = "super::settlement::Entity")]
    Settlement,
}

impl Related<super::unit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Unit.def()
    }
}

impl Related<super::expense::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Expense.def()
    }
}

impl Related<super::settlement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Settlement.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
