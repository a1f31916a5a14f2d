use std::path::Path;

use crate::model::{Detection, MbrLayout, RawTable, Role};

/// Header cell that marks an operational extract.
const TYPE_COLUMN: &str = "Type";

/// First-cell marker of a raw ledger report (banner row above the header).
const RAW_LEDGER_MARKER: &str = "SS Bookings 360";
/// First-cell marker of an already-preprocessed ledger (header row first).
const CLEAN_LEDGER_MARKER: &str = "Sales Order Number";

/// Ordered keyword groups for the Type-column heuristic. Evaluated
/// top-to-bottom, first match wins; a value matching none falls through to
/// the filename fallback.
const KEYWORD_GROUPS: &[(&[&str], Role)] = &[
    (&["direct"], Role::Direct),
    (&["pos"], Role::Pos),
    (&["xaas"], Role::Xaas),
    (&["manual"], Role::ManualRevenue),
    (&["credit", "memo"], Role::CreditMemo),
];

/// Assign a role to one source table, or `None` for a table matching no
/// rule (the caller drops it with a warning).
pub fn detect(table: &RawTable) -> Option<Detection> {
    let header = table.header()?;

    if let Some(type_idx) = header.iter().position(|h| h == TYPE_COLUMN) {
        let type_value = table
            .rows
            .get(1)
            .and_then(|row| row.get(type_idx))
            .map(|v| v.trim().to_lowercase())
            .unwrap_or_default();

        for (keywords, role) in KEYWORD_GROUPS {
            if keywords.iter().any(|k| type_value.contains(k)) {
                return Some(Detection { role: *role, layout: None });
            }
        }
        return detect_from_filename(&table.source);
    }

    // No Type column: candidate ledger file. Probe the first cell for a
    // recognized marker; the two markers imply different leading-row skips.
    let first = table.first_cell().unwrap_or_default();
    if first.contains(RAW_LEDGER_MARKER) {
        return Some(Detection { role: Role::Mbr, layout: Some(MbrLayout::RawExport) });
    }
    if first.contains(CLEAN_LEDGER_MARKER) {
        return Some(Detection { role: Role::Mbr, layout: Some(MbrLayout::Preprocessed) });
    }
    None
}

/// Fallback: match canonical role tokens against the file name,
/// case-insensitively, in `Role::ALL` order.
fn detect_from_filename(source: &str) -> Option<Detection> {
    let name = Path::new(source).file_name()?.to_string_lossy().to_lowercase();
    for role in Role::ALL {
        if name.contains(&role.token().to_lowercase()) {
            let layout = (role == Role::Mbr).then_some(MbrLayout::Preprocessed);
            return Some(Detection { role, layout });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(source: &str, rows: &[&[&str]]) -> RawTable {
        RawTable::new(
            source,
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn type_column_keywords() {
        let cases = [
            ("Direct Sale", Role::Direct),
            ("POS bookings", Role::Pos),
            ("XaaS recurring", Role::Xaas),
            ("Manual Revenue", Role::ManualRevenue),
            ("Credit/Debit Memo", Role::CreditMemo),
            ("debit memo", Role::CreditMemo),
        ];
        for (value, expected) in cases {
            let t = table("x.csv", &[&["SO", "Bookings", "Type"], &["1", "2", value]]);
            assert_eq!(detect(&t).unwrap().role, expected, "value: {value}");
        }
    }

    #[test]
    fn keyword_order_is_first_match_wins() {
        // "direct" outranks "pos" even though both substrings appear.
        let t = table(
            "x.csv",
            &[&["SO", "Type"], &["1", "direct point-of-sale (pos)"]],
        );
        assert_eq!(detect(&t).unwrap().role, Role::Direct);
    }

    #[test]
    fn filename_fallback_when_type_value_unrecognized() {
        let t = table(
            "/data/pos-export-june.csv",
            &[&["SO", "Type"], &["1", "wholesale"]],
        );
        assert_eq!(detect(&t).unwrap().role, Role::Pos);
    }

    #[test]
    fn filename_fallback_respects_token_order() {
        // Both DIRECT and POS appear; DIRECT is scanned first.
        let t = table("direct-pos.csv", &[&["SO", "Type"], &["1", "other"]]);
        assert_eq!(detect(&t).unwrap().role, Role::Direct);
    }

    #[test]
    fn raw_ledger_marker() {
        let t = table(
            "ledger.xlsx",
            &[
                &["SS Bookings 360 Report - FY26"],
                &["Sales Order Number", "Total Bookings"],
            ],
        );
        let d = detect(&t).unwrap();
        assert_eq!(d.role, Role::Mbr);
        assert_eq!(d.layout, Some(MbrLayout::RawExport));
    }

    #[test]
    fn preprocessed_ledger_marker() {
        let t = table(
            "ledger.xlsx",
            &[&["Sales Order Number", "Total Bookings"], &["1001", "30000"]],
        );
        let d = detect(&t).unwrap();
        assert_eq!(d.role, Role::Mbr);
        assert_eq!(d.layout, Some(MbrLayout::Preprocessed));
    }

    #[test]
    fn unknown_table_is_dropped() {
        let t = table("mystery.csv", &[&["a", "b"], &["1", "2"]]);
        assert!(detect(&t).is_none());
        let empty = RawTable::new("empty.csv", vec![]);
        assert!(detect(&empty).is_none());
    }

    #[test]
    fn type_header_with_no_data_rows_falls_back_to_filename() {
        let t = table("CREMEMO-w12.csv", &[&["SO Number", "Bookings", "Type"]]);
        assert_eq!(detect(&t).unwrap().role, Role::CreditMemo);
    }
}
