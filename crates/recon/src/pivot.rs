use std::collections::BTreeMap;

use crate::model::{NormalizedRecord, PivotRow};

/// Group records by order id, summing amounts. The type label and each
/// auxiliary column keep the first non-empty value in original row order.
/// Records with a blank order id never aggregate. Output order is
/// deterministic by key.
pub fn pivot(records: &[NormalizedRecord]) -> Vec<PivotRow> {
    let mut groups: BTreeMap<String, PivotRow> = BTreeMap::new();

    for record in records {
        if record.order_id.is_empty() {
            continue;
        }
        let row = groups.entry(record.order_id.clone()).or_insert_with(|| PivotRow {
            order_id: record.order_id.clone(),
            amount: 0.0,
            type_label: String::new(),
            extras: BTreeMap::new(),
        });
        row.amount += record.amount;
        if row.type_label.is_empty() && !record.type_label.is_empty() {
            row.type_label = record.type_label.clone();
        }
        for (name, value) in &record.extras {
            if !value.is_empty() {
                row.extras.entry(name.clone()).or_insert_with(|| value.clone());
            }
        }
    }

    groups.into_values().collect()
}
