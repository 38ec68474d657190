//! Settlement entity - a closed monthly billing period.
//!
//! One row per `(condominium, period)`, enforced by a unique index created
//! in `config::database`. Settlements are append-only: once written they are
//! never updated or replaced, and correcting a mistake means issuing a new
//! period or a compensating record, never editing history.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Status a settlement is written with once confirmed.
pub const STATUS_SENT: &str = "SENT";

/// Settlement database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "settlements")]
pub struct Model {
    /// Unique identifier for the settlement
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Condominium this settlement belongs to
    pub condominium_id: String,
    /// Canonical period key, ISO `"YYYY-MM"`
    pub period: String,
    /// Total of bucket-A expenses for the period
    pub total_amount_a: f64,
    /// Total of bucket-B expenses for the period
    pub total_amount_b: f64,
    /// Total of bucket-C expenses for the period
    pub total_amount_c: f64,
    /// Reserve-fund rate applied, in `[0, 1]`
    pub reserve_fund_rate: f64,
    /// Settlement status; currently always `"SENT"`
    pub status: String,
    /// When the settlement was confirmed
    pub processed_at: DateTimeUtc,
}

/// Defines relationships between Settlement and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each settlement belongs to one condominium
    #[sea_orm(
        belongs_to = "super::condominium::Entity",
        from = "Column::CondominiumId",
        to = "super::condominium::Column::Id"
    )]
    Condominium,
    /// Per-unit ledger snapshots written alongside this settlement
    #[sea_orm(has_many = "super::unit_account_status::Entity")]
    UnitAccountStatus,
}

impl Related<super::condominium::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Condominium.def()
    }
}

impl Related<super::unit_account_status::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UnitAccountStatus.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
