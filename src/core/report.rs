//! Text summaries of settlement results.
//!
//! Framework-agnostic formatting used by the confirm path's logging. The
//! functions here only shape data that was already computed; they never
//! touch the database.

use crate::core::settlement::SettlementBreakdown;

/// Formats a settlement breakdown into a human-readable multi-line summary.
#[must_use]
pub fn format_settlement_summary(breakdown: &SettlementBreakdown) -> String {
    use std::fmt::Write;

    let mut summary = format!(
        "Settlement {} - Total ${:.2} across {} unit(s)\n",
        breakdown.period,
        breakdown.total_amount,
        breakdown.units.len()
    );

    // write! to a String cannot fail
    writeln!(
        summary,
        "  Buckets: A ${:.2} | B ${:.2} | C ${:.2}",
        breakdown.total_amount_a, breakdown.total_amount_b, breakdown.total_amount_c
    )
    .unwrap();

    for unit in &breakdown.units {
        writeln!(
            summary,
            "  {} ({}) | share ${:.2} + reserve ${:.2} + interest ${:.2} - payments ${:.2} = due ${:.2}",
            unit.unit_number,
            unit.owner_name,
            unit.current_period_share,
            unit.reserve_fund_amount,
            unit.interest_amount,
            unit.payments_amount,
            unit.total_to_pay
        )
        .unwrap();
    }

    summary
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use crate::core::settlement::UnitShare;

    fn sample_breakdown() -> SettlementBreakdown {
        SettlementBreakdown {
            period: "2024-03".to_string(),
            total_amount: 1000.0,
            total_amount_a: 900.0,
            total_amount_b: 100.0,
            total_amount_c: 0.0,
            units: vec![UnitShare {
                unit_id: "u-1".to_string(),
                unit_number: "1A".to_string(),
                owner_name: "Ana Souto".to_string(),
                coefficient: 60.0,
                previous_balance: 0.0,
                payments_amount: 50.0,
                interest_amount: 0.0,
                current_period_share: 600.0,
                reserve_fund_amount: 30.0,
                total_to_pay: 580.0,
            }],
        }
    }

    #[test]
    fn test_format_settlement_summary() {
        let summary = format_settlement_summary(&sample_breakdown());

        assert!(summary.contains("Settlement 2024-03 - Total $1000.00 across 1 unit(s)"));
        assert!(summary.contains("Buckets: A $900.00 | B $100.00 | C $0.00"));
        assert!(summary.contains(
            "1A (Ana Souto) | share $600.00 + reserve $30.00 + interest $0.00 - payments $50.00 = due $580.00"
        ));
    }
}
