//! Database connection and schema management.
//!
//! Connections go through `SeaORM` against `SQLite`. The schema is generated
//! straight from the entity definitions with `Schema::create_table_from_entity`,
//! so the database always matches the Rust structs without hand-written SQL.
//! Everything runs with `IF NOT EXISTS`, making `create_tables` safe to call
//! on every startup.

use crate::entities::{
    Condominium, Expense, Payment, Settlement, Unit, UnitAccountStatus, settlement,
};
use crate::errors::Result;
use sea_orm::sea_query::Index;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, Schema};

/// Returns the database URL from `DATABASE_URL`, falling back to a local
/// `SQLite` file (created on demand via `mode=rwc`).
#[must_use]
pub fn get_database_url() -> String {
    std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://data/condo_ledger.sqlite?mode=rwc".to_string())
}

/// Opens the database connection used by the whole service.
pub async fn create_connection() -> Result<DatabaseConnection> {
    let database_url = get_database_url();

    Database::connect(&database_url).await.map_err(Into::into)
}

/// Creates the tables for condominiums, units, expenses, payments,
/// settlements and unit account statuses, plus the unique index that keeps
/// a condominium from holding two settlements for the same period.
pub async fn create_tables(db: &DatabaseConnection) -> Result<()> {
    let builder = db.get_database_backend();
    let schema = Schema::new(builder);

    let mut condominium_table = schema.create_table_from_entity(Condominium);
    let mut unit_table = schema.create_table_from_entity(Unit);
    let mut expense_table = schema.create_table_from_entity(Expense);
    let mut payment_table = schema.create_table_from_entity(Payment);
    let mut settlement_table = schema.create_table_from_entity(Settlement);
    let mut unit_account_status_table = schema.create_table_from_entity(UnitAccountStatus);

    db.execute(builder.build(condominium_table.if_not_exists()))
        .await?;
    db.execute(builder.build(unit_table.if_not_exists())).await?;
    db.execute(builder.build(expense_table.if_not_exists()))
        .await?;
    db.execute(builder.build(payment_table.if_not_exists()))
        .await?;
    db.execute(builder.build(settlement_table.if_not_exists()))
        .await?;
    db.execute(builder.build(unit_account_status_table.if_not_exists()))
        .await?;

    // One settlement per condominium and period, enforced at the database
    // level so concurrent confirms cannot both succeed.
    let settlement_period_index = Index::create()
        .name("idx_settlements_condominium_period")
        .table(settlement::Entity)
        .col(settlement::Column::CondominiumId)
        .col(settlement::Column::Period)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(builder.build(&settlement_period_index)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{
        condominium::Model as CondominiumModel, expense::Model as ExpenseModel,
        payment::Model as PaymentModel, settlement::Model as SettlementModel,
        unit::Model as UnitModel, unit_account_status::Model as UnitAccountStatusModel,
    };
    use sea_orm::{EntityTrait, QuerySelect};

    /// Tests the database connection by executing a simple query
    async fn test_connection(db: &DatabaseConnection) -> Result<()> {
        // Test the connection with a simple query
        let _: Vec<CondominiumModel> = Condominium::find().limit(1).all(db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_connection() -> Result<()> {
        // Use in-memory database for testing to avoid schema conflicts with existing database
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that we can execute a query to verify the connection is working
        let _: Vec<CondominiumModel> = Condominium::find().limit(1).all(&db).await?;
        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;

        // Test that tables exist by querying them
        let _: Vec<CondominiumModel> = Condominium::find().limit(1).all(&db).await?;
        let _: Vec<UnitModel> = Unit::find().limit(1).all(&db).await?;
        let _: Vec<ExpenseModel> = Expense::find().limit(1).all(&db).await?;
        let _: Vec<PaymentModel> = Payment::find().limit(1).all(&db).await?;
        let _: Vec<SettlementModel> = Settlement::find().limit(1).all(&db).await?;
        let _: Vec<UnitAccountStatusModel> = UnitAccountStatus::find().limit(1).all(&db).await?;

        Ok(())
    }

    #[tokio::test]
    async fn test_create_tables_is_idempotent() -> Result<()> {
        let db = Database::connect("sqlite::memory:").await?;
        create_tables(&db).await?;
        create_tables(&db).await?;
        test_connection(&db).await?;
        Ok(())
    }
}
