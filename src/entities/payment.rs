//! Payment entity - money received from a unit.
//!
//! The sum of a unit's payments dated within a billing period becomes the
//! `payments_amount` that offsets that period's bill.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Payment database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    /// Unique identifier for the payment
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Condominium the paying unit belongs to
    pub condominium_id: String,
    /// Unit the payment was received from
    pub unit_id: String,
    /// Amount received, always positive
    pub amount: f64,
    /// Calendar day the payment is attributed to
    pub date: Date,
    /// When the payment was entered into the system
    pub recorded_at: DateTimeUtc,
}

/// Defines relationships between Payment and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each payment belongs to one unit
    #[sea_orm(
        belongs_to = "super::unit::Entity",
        from = "Column::UnitId",
        to = "super::unit::Column::Id"
    )]
    Unit,
}

impl Related<super::unit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Unit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
