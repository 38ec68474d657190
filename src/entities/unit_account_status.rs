//! Unit account status entity - a per-unit ledger snapshot.
//!
//! Written in bulk when a settlement is confirmed, one row per unit. These
//! are point-in-time historical records: `owner_name` and `coefficient`
//! capture the unit as it was at computation time, and no field is ever
//! mutated afterwards.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Unit account status database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "unit_account_statuses")]
pub struct Model {
    /// Unique identifier for the snapshot
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Settlement this snapshot was written for
    pub settlement_id: String,
    /// Unit the snapshot describes
    pub unit_id: String,
    /// Owner name at computation time
    pub owner_name: String,
    /// Coefficient at computation time (0-100)
    pub coefficient: f64,
    /// Unpaid amount carried in from the previous period
    pub previous_balance: f64,
    /// Payments received from the unit during the period
    pub payments_amount: f64,
    /// Interest charged on the previous balance
    pub interest_amount: f64,
    /// The unit's share of the period's pooled expenses
    pub current_period_share: f64,
    /// Reserve-fund surcharge on the share
    pub reserve_fund_amount: f64,
    /// Net amount due; negative means the unit is in credit
    pub total_to_pay: f64,
}

/// Defines relationships between `UnitAccountStatus` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each snapshot belongs to one settlement
    #[sea_orm(
        belongs_to = "super::settlement::Entity",
        from = "Column::SettlementId",
        to = "super::settlement::Column::Id"
    )]
    Settlement,
    /// Each snapshot describes one unit
    #[sea_orm(
        belongs_to = "super::unit::Entity",
        from = "Column::UnitId",
        to = "super::unit::Column::Id"
    )]
    Unit,
}

impl Related<super::settlement::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Settlement.def()
    }
}

impl Related<super::unit::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Unit.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
