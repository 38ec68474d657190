//! Settlement calculation and lifecycle.
//!
//! The calculator is read-only: it pools the period's expenses, splits them
//! across units by coefficient, applies reserve-fund and interest
//! adjustments, and returns a breakdown without writing anything. Confirming
//! persists that breakdown as a settlement row plus one ledger snapshot per
//! unit inside a single database transaction. The unique index on
//! `(condominium_id, period)` turns a race between two concurrent confirms
//! into a constraint violation, which is reported the same way as an
//! ordinary duplicate period.

use crate::{
    config::settings::{Bucket, BucketSettings, CoefficientSumCheck},
    core::{condominium, expense, payment, period::Period, report},
    entities::{Settlement, UnitAccountStatus, settlement, unit, unit_account_status},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, SqlErr, TransactionTrait, prelude::*};
use serde::Serialize;
use std::collections::HashMap;
use uuid::Uuid;

/// Coefficients may miss 100 by this much before the sum policy kicks in.
const COEFFICIENT_SUM_TOLERANCE: f64 = 0.01;

/// Input for one settlement calculation.
#[derive(Debug, Clone)]
pub struct SettlementInput {
    /// Condominium being settled
    pub condominium_id: String,
    /// Calendar year of the billing period
    pub year: i32,
    /// Calendar month of the billing period (1-12)
    pub month: u32,
    /// Interest rate applied to positive previous balances, in `[0, 1]`
    pub interest_rate: f64,
    /// Reserve-fund rate applied to each unit's share, in `[0, 1]`
    pub reserve_fund_rate: f64,
}

/// One unit's line in a settlement breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct UnitShare {
    /// Unit this line is for
    pub unit_id: String,
    /// Door/apartment number at computation time
    pub unit_number: String,
    /// Owner name at computation time
    pub owner_name: String,
    /// Coefficient at computation time (0-100)
    pub coefficient: f64,
    /// Unpaid amount carried in from the previous settled period
    pub previous_balance: f64,
    /// Payments received from the unit during the period
    pub payments_amount: f64,
    /// Interest charged on a positive previous balance
    pub interest_amount: f64,
    /// The unit's share of the period's pooled expenses
    pub current_period_share: f64,
    /// Reserve-fund surcharge on the share
    pub reserve_fund_amount: f64,
    /// Net amount due; negative means the unit is in credit
    pub total_to_pay: f64,
}

/// Complete result of a settlement calculation.
#[derive(Debug, Clone, Serialize)]
pub struct SettlementBreakdown {
    /// Canonical period key, ISO `"YYYY-MM"`
    pub period: String,
    /// Pooled expense total for the period
    pub total_amount: f64,
    /// Bucket-A portion of the total
    pub total_amount_a: f64,
    /// Bucket-B portion of the total
    pub total_amount_b: f64,
    /// Bucket-C portion of the total
    pub total_amount_c: f64,
    /// Per-unit lines, ordered by unit number
    pub units: Vec<UnitShare>,
}

/// Rounds a currency amount to 2 decimal places.
///
/// Applied at every computation point, not just at the end, so intermediate
/// amounts are always representable cents. Downstream totals accumulate the
/// rounded values.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn validate_rate(name: &str, rate: f64) -> Result<()> {
    if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
        return Err(Error::Validation {
            message: format!("{name} must be between 0 and 1, got {rate}"),
        });
    }
    Ok(())
}

fn check_coefficient_sum(units: &[unit::Model], policy: CoefficientSumCheck) -> Result<()> {
    let sum: f64 = units.iter().map(|u| u.coefficient).sum();
    if (sum - 100.0).abs() <= COEFFICIENT_SUM_TOLERANCE {
        return Ok(());
    }

    match policy {
        CoefficientSumCheck::Off => Ok(()),
        CoefficientSumCheck::Warn => {
            tracing::warn!("unit coefficients sum to {sum}, expected 100");
            Ok(())
        }
        CoefficientSumCheck::Reject => Err(Error::Validation {
            message: format!("unit coefficients sum to {sum}, expected 100"),
        }),
    }
}

/// Loads each unit's balance carried in from the most recent settled period.
///
/// The period key is lexicographic ISO `"YYYY-MM"`, so a plain string
/// comparison finds the latest settlement strictly before the requested one.
/// Units without a snapshot there (or when no prior settlement exists) carry
/// a zero balance.
async fn prior_balances(
    db: &DatabaseConnection,
    condominium_id: &str,
    period_key: &str,
) -> Result<HashMap<String, f64>> {
    let prior = Settlement::find()
        .filter(settlement::Column::CondominiumId.eq(condominium_id))
        .filter(settlement::Column::Period.lt(period_key))
        .order_by_desc(settlement::Column::Period)
        .one(db)
        .await?;

    let Some(prior) = prior else {
        return Ok(HashMap::new());
    };

    let snapshots = UnitAccountStatus::find()
        .filter(unit_account_status::Column::SettlementId.eq(prior.id))
        .all(db)
        .await?;

    Ok(snapshots
        .into_iter()
        .map(|s| (s.unit_id, s.total_to_pay))
        .collect())
}

/// Calculates the settlement breakdown for one condominium and period.
///
/// Reads expenses, units, payments and prior snapshots; writes nothing.
/// Calling it any number of times returns identical output for identical
/// database state and input.
///
/// # Errors
/// * `Error::Validation` - month or a rate out of range, or the coefficient
///   sum policy is `reject` and the coefficients miss 100
/// * `Error::NotFound` - condominium absent, or it has no units
/// * `Error::NoExpenses` - the period's expense total is exactly zero
pub async fn calculate(
    db: &DatabaseConnection,
    buckets: &BucketSettings,
    coefficient_policy: CoefficientSumCheck,
    input: &SettlementInput,
) -> Result<SettlementBreakdown> {
    validate_rate("interest_rate", input.interest_rate)?;
    validate_rate("reserve_fund_rate", input.reserve_fund_rate)?;
    let period = Period::new(input.year, input.month)?;
    let period_key = period.to_string();

    condominium::get(db, &input.condominium_id).await?;

    let expenses = expense::list_for_month(db, &input.condominium_id, period).await?;
    let total_amount = round2(expenses.iter().map(|e| e.amount).sum());
    if total_amount == 0.0 {
        return Err(Error::NoExpenses { period: period_key });
    }

    let (mut total_a, mut total_b, mut total_c) = (0.0_f64, 0.0_f64, 0.0_f64);
    for expense in &expenses {
        match buckets.bucket_for(&expense.category) {
            Bucket::A => total_a += expense.amount,
            Bucket::B => total_b += expense.amount,
            Bucket::C => total_c += expense.amount,
        }
    }

    let units = crate::core::unit::list(db, &input.condominium_id).await?;
    if units.is_empty() {
        return Err(Error::NotFound {
            entity: format!("Units of condominium '{}'", input.condominium_id),
        });
    }
    check_coefficient_sum(&units, coefficient_policy)?;

    let prior = prior_balances(db, &input.condominium_id, &period_key).await?;

    let mut shares = Vec::with_capacity(units.len());
    for unit in units {
        let previous_balance = prior.get(&unit.id).copied().unwrap_or(0.0);
        let payments_amount = round2(payment::sum_for_period(db, &unit.id, period).await?);

        let current_period_share = round2(total_amount * (unit.coefficient / 100.0));
        let reserve_fund_amount = round2(current_period_share * input.reserve_fund_rate);
        // Interest accrues on debt only; a credit balance earns nothing.
        let interest_amount = if previous_balance > 0.0 {
            round2(previous_balance * input.interest_rate)
        } else {
            0.0
        };
        // The previous balance is reported but not folded into the total.
        // No clamping either: payments above the bill leave a credit.
        let total_to_pay = round2(
            current_period_share + reserve_fund_amount + interest_amount - payments_amount,
        );

        shares.push(UnitShare {
            unit_id: unit.id,
            unit_number: unit.number,
            owner_name: unit.contact_name,
            coefficient: unit.coefficient,
            previous_balance,
            payments_amount,
            interest_amount,
            current_period_share,
            reserve_fund_amount,
            total_to_pay,
        });
    }

    Ok(SettlementBreakdown {
        period: period_key,
        total_amount,
        total_amount_a: round2(total_a),
        total_amount_b: round2(total_b),
        total_amount_c: round2(total_c),
        units: shares,
    })
}

/// Finds the settlement of a condominium for one period key, if any.
pub async fn find_settlement(
    db: &DatabaseConnection,
    condominium_id: &str,
    period_key: &str,
) -> Result<Option<settlement::Model>> {
    Settlement::find()
        .filter(settlement::Column::CondominiumId.eq(condominium_id))
        .filter(settlement::Column::Period.eq(period_key))
        .one(db)
        .await
        .map_err(Into::into)
}

/// Confirms a settlement: calculates it and persists the result.
///
/// The settlement row and all per-unit snapshots are written in one
/// transaction, so a failure part-way leaves no orphan rows. Losing a
/// confirm race to another caller surfaces as `Error::AlreadyExists`, the
/// same answer an up-front duplicate gets from the pre-check.
///
/// # Errors
/// Everything [`calculate`] returns, plus `Error::AlreadyExists` when the
/// period is already settled.
pub async fn confirm(
    db: &DatabaseConnection,
    buckets: &BucketSettings,
    coefficient_policy: CoefficientSumCheck,
    input: &SettlementInput,
) -> Result<settlement::Model> {
    let period_key = Period::new(input.year, input.month)?.to_string();
    if find_settlement(db, &input.condominium_id, &period_key)
        .await?
        .is_some()
    {
        return Err(Error::AlreadyExists { period: period_key });
    }

    let breakdown = calculate(db, buckets, coefficient_policy, input).await?;

    let txn = db.begin().await?;

    let settlement_model = settlement::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        condominium_id: Set(input.condominium_id.clone()),
        period: Set(breakdown.period.clone()),
        total_amount_a: Set(breakdown.total_amount_a),
        total_amount_b: Set(breakdown.total_amount_b),
        total_amount_c: Set(breakdown.total_amount_c),
        reserve_fund_rate: Set(input.reserve_fund_rate),
        status: Set(settlement::STATUS_SENT.to_string()),
        processed_at: Set(chrono::Utc::now()),
    };

    let inserted = match settlement_model.insert(&txn).await {
        Ok(model) => model,
        Err(err) => {
            // Dropping the transaction uncommitted rolls it back.
            return Err(match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => Error::AlreadyExists {
                    period: breakdown.period,
                },
                _ => err.into(),
            });
        }
    };

    let snapshots: Vec<unit_account_status::ActiveModel> = breakdown
        .units
        .iter()
        .map(|share| unit_account_status::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            settlement_id: Set(inserted.id.clone()),
            unit_id: Set(share.unit_id.clone()),
            owner_name: Set(share.owner_name.clone()),
            coefficient: Set(share.coefficient),
            previous_balance: Set(share.previous_balance),
            payments_amount: Set(share.payments_amount),
            interest_amount: Set(share.interest_amount),
            current_period_share: Set(share.current_period_share),
            reserve_fund_amount: Set(share.reserve_fund_amount),
            total_to_pay: Set(share.total_to_pay),
        })
        .collect();
    UnitAccountStatus::insert_many(snapshots).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!("{}", report::format_settlement_summary(&breakdown));

    Ok(inserted)
}

/// Retrieves all settlements of a condominium, newest period first.
pub async fn list(
    db: &DatabaseConnection,
    condominium_id: &str,
) -> Result<Vec<settlement::Model>> {
    Settlement::find()
        .filter(settlement::Column::CondominiumId.eq(condominium_id))
        .order_by_desc(settlement::Column::Period)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Fetches one settlement together with its per-unit snapshots.
///
/// # Errors
/// Returns `Error::NotFound` if no settlement has this id.
pub async fn get_with_snapshots(
    db: &DatabaseConnection,
    settlement_id: &str,
) -> Result<(settlement::Model, Vec<unit_account_status::Model>)> {
    let settlement = Settlement::find_by_id(settlement_id)
        .one(db)
        .await?
        .ok_or_else(|| Error::NotFound {
            entity: format!("Settlement '{settlement_id}'"),
        })?;

    let snapshots = UnitAccountStatus::find()
        .filter(unit_account_status::Column::SettlementId.eq(settlement_id))
        .order_by_asc(unit_account_status::Column::OwnerName)
        .all(db)
        .await?;

    Ok((settlement, snapshots))
}

/// Retrieves a unit's snapshot history with the settlement each snapshot
/// belongs to, newest period first.
pub async fn statements_for_unit(
    db: &DatabaseConnection,
    unit_id: &str,
) -> Result<Vec<(unit_account_status::Model, settlement::Model)>> {
    let rows = UnitAccountStatus::find()
        .filter(unit_account_status::Column::UnitId.eq(unit_id))
        .find_also_related(Settlement)
        .order_by_desc(settlement::Column::Period)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter_map(|(snapshot, settlement)| settlement.map(|s| (snapshot, s)))
        .collect())
}
