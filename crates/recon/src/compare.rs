use std::collections::HashMap;

use crate::config::RunConfig;
use crate::model::{ComparisonRow, GapSummary, MatchStatus, PivotRow};

/// Treat the ledger pivot as ground truth: every ledger order strictly above
/// the threshold is checked against the combined operational pivot.
///
/// Two tolerances apply independently: `tolerance.status` decides between
/// Match and Amount mismatch; `tolerance.rollup` decides the coarse isMatch
/// flag. An order absent from the operational pivot fails both.
pub fn compare(mbr: &[PivotRow], vsb: &[PivotRow], config: &RunConfig) -> (Vec<ComparisonRow>, GapSummary) {
    let vsb_by_order: HashMap<&str, &PivotRow> =
        vsb.iter().map(|row| (row.order_id.as_str(), row)).collect();

    let mut rows = Vec::new();
    let mut sum_missing = 0.0;
    let mut count_missing = 0;
    let mut matched = 0;
    let mut amount_mismatches = 0;

    for ledger_row in mbr.iter().filter(|r| r.amount > config.threshold) {
        let hit = vsb_by_order.get(ledger_row.order_id.as_str());
        let vsb_amount = hit.map(|r| r.amount);
        let delta = vsb_amount.map(|v| ledger_row.amount - v);

        let status = match delta {
            None => MatchStatus::MissingInVsb,
            Some(d) if d.abs() > config.tolerance.status => MatchStatus::AmountMismatch,
            Some(_) => MatchStatus::Match,
        };
        let is_match = delta.is_some_and(|d| d.abs() < config.tolerance.rollup);

        match status {
            MatchStatus::Match => matched += 1,
            MatchStatus::AmountMismatch => amount_mismatches += 1,
            MatchStatus::MissingInVsb => {
                sum_missing += ledger_row.amount;
                count_missing += 1;
            }
        }

        rows.push(ComparisonRow {
            order_id: ledger_row.order_id.clone(),
            mbr_amount: ledger_row.amount,
            vsb_amount,
            delta,
            status,
            is_match,
            type_label: hit.map(|r| r.type_label.clone()).unwrap_or_default(),
            extras: ledger_row.extras.clone(),
        });
    }

    let summary = GapSummary {
        total: rows.len(),
        matched,
        amount_mismatches,
        sum_missing,
        count_missing,
    };
    (rows, summary)
}
