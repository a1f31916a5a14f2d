use std::collections::HashMap;

use crate::classify;
use crate::compare::compare;
use crate::config::RunConfig;
use crate::error::ReconError;
use crate::model::{Detection, RawTable, ReconReport, Role, RunMeta, RunOutcome};
use crate::normalize;
use crate::pivot::pivot;
use crate::report;

/// Run one reconciliation over pre-loaded tables.
///
/// Per-file problems (unrecognized type, unresolvable operational columns)
/// become warnings and skip decisions; only whole-run-fatal conditions
/// return an error. The empty-input cases come back as explicit outcomes,
/// never as errors.
pub fn run(config: &RunConfig, inputs: Vec<RawTable>) -> Result<RunOutcome, ReconError> {
    let mut warnings = Vec::new();
    let mut selected: HashMap<Role, (RawTable, Detection)> = HashMap::new();

    for table in inputs {
        if table.is_empty() {
            warnings.push(format!("'{}': empty table, skipping", table.source));
            continue;
        }
        match classify::detect(&table) {
            Some(detection) => {
                if let Some((previous, _)) = selected.get(&detection.role) {
                    warnings.push(format!(
                        "role {}: '{}' replaces '{}' (last file wins)",
                        detection.role, table.source, previous.source
                    ));
                }
                selected.insert(detection.role, (table, detection));
            }
            None => {
                warnings.push(format!("'{}': unrecognized file type, skipping", table.source));
            }
        }
    }

    if !Role::OPERATIONAL.iter().any(|r| selected.contains_key(r)) {
        return Ok(RunOutcome::NoOperationalData { warnings });
    }
    let Some((ledger_table, ledger_detection)) = selected.remove(&Role::Mbr) else {
        return Ok(RunOutcome::NoLedger { warnings });
    };

    // Concatenate operational records in canonical role order, then pivot
    // once; an order split across extracts sums into a single row.
    let mut operational = Vec::new();
    for role in Role::OPERATIONAL {
        let Some((table, detection)) = selected.get(&role) else {
            continue;
        };
        match normalize::normalize(table, *detection, config) {
            Ok(mut records) => operational.append(&mut records),
            Err(e) => warnings.push(format!("{e}; excluding from aggregation")),
        }
    }
    if operational.is_empty() {
        return Ok(RunOutcome::NoOperationalData { warnings });
    }
    let vsb_pivot = pivot(&operational);

    // Ledger column failures are fatal: no comparison is possible.
    let ledger_records = normalize::normalize(&ledger_table, ledger_detection, config)?;
    let mbr_pivot = pivot(&ledger_records);

    let (mut rows, summary) = compare(&mbr_pivot, &vsb_pivot, config);
    report::sort_rows(&mut rows);

    Ok(RunOutcome::Report(ReconReport {
        meta: RunMeta {
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            run_at: chrono::Utc::now().to_rfc3339(),
            threshold: config.threshold,
        },
        summary,
        rows,
        warnings,
        mbr_pivot,
        vsb_pivot,
    }))
}
