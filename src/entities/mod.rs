//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod condominium;
pub mod expense;
pub mod payment;
pub mod settlement;
pub mod unit;
pub mod unit_account_status;

// Re-export specific types to avoid conflicts
pub use condominium::{
    Column as CondominiumColumn, Entity as Condominium, Model as CondominiumModel,
};
pub use expense::{Column as ExpenseColumn, Entity as Expense, Model as ExpenseModel};
pub use payment::{Column as PaymentColumn, Entity as Payment, Model as PaymentModel};
pub use settlement::{Column as SettlementColumn, Entity as Settlement, Model as SettlementModel};
pub use unit::{Column as UnitColumn, Entity as Unit, Model as UnitModel};
pub use unit_account_status::{
    Column as UnitAccountStatusColumn, Entity as UnitAccountStatus,
    Model as UnitAccountStatusModel,
};
