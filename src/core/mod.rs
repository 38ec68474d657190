/// Condominium registry operations
pub mod condominium;

/// Expense record-keeping
pub mod expense;

/// Payment recording
pub mod payment;

/// Billing period handling
pub mod period;

/// Text summaries of settlement results
pub mod report;

/// Settlement calculator with preview and confirm entry points
pub mod settlement;

/// Unit management
pub mod unit;
