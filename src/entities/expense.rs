//! Expense entity - a common expense recorded against a condominium.
//!
//! Expenses are immutable once created: there is no update path anywhere in
//! the crate, only creation and individual deletion. The `date` decides
//! which monthly period the expense is liquidated in.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Expense database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "expenses")]
pub struct Model {
    /// Unique identifier for the expense
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Condominium this expense belongs to
    pub condominium_id: String,
    /// Human-readable description, e.g. `"Elevator maintenance"`
    pub description: String,
    /// Amount in the condominium's currency, always positive
    pub amount: f64,
    /// Free-form category; mapped to bucket A/B/C via configuration
    pub category: String,
    /// Calendar day the expense is attributed to
    pub date: Date,
}

/// Defines relationships between Expense and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each expense belongs to one condominium
    #[sea_orm(
        belongs_to = "super::condominium::Entity",
        from = "Column::CondominiumId",
        to = "super::condominium::Column::Id"
    )]
    Condominium,
}

impl Related<super::condominium::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Condominium.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
