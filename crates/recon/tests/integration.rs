//! End-to-end pipeline tests over in-memory tables: classification through
//! report rendering, exercising the documented tolerance and gap semantics.

use bookrec_recon::model::{MatchStatus, RawTable, RunOutcome};
use bookrec_recon::{report, run, RunConfig};

fn table(source: &str, rows: &[&[&str]]) -> RawTable {
    RawTable::new(
        source,
        rows.iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect(),
    )
}

/// One of each input shape, amounts chosen to hit every status bucket.
fn fixture() -> Vec<RawTable> {
    vec![
        // Order 1001 is split across two direct rows: 20k + 10000.005.
        table(
            "direct-w26.csv",
            &[
                &["Sales Order Number", "Total Bookings", "Type"],
                &["1001", "$20,000.00", "Direct Sale"],
                &["1001", "10000.005", "Direct Sale"],
                &["1003", "$39,500.00", "Direct Sale"],
            ],
        ),
        // POS file resolving both columns through lower-ranked aliases.
        table(
            "pos-w26.csv",
            &[
                &["Web Order ID", "Bookings", "Type"],
                &["1004", "$88,000.00", "POS"],
            ],
        ),
        table(
            "xaas-w26.csv",
            &[
                &["SO", "Bookings", "Type"],
                &["1005", "26,500", "XaaS recurring"],
            ],
        ),
        table(
            "manrev-w26.csv",
            &[
                &["SO Number", "Revenue (Original)", "Type"],
                &["1005", "500", "Manual Revenue"],
            ],
        ),
        // Credit memo with a blank order id: sentinel, never matches.
        table(
            "crememo-w26.csv",
            &[
                &["SO Number", "Bookings", "Type"],
                &["", "-9,000", "Credit/Debit Memo"],
            ],
        ),
        // Raw ledger export: banner, header, data, blank row, footer.
        table(
            "mbr-fy26.xlsx",
            &[
                &["SS Bookings 360 Export"],
                &[
                    "Sales Order Number",
                    "Total Bookings",
                    "End Customer Company Name",
                    "L4",
                ],
                &["1001", "30000", "Acme Corp", "West"],
                &["1002", "$40,000.00", "Globex", "East"],
                &["1003", "40000", "Initech", "West"],
                &["1004", "88000", "Umbrella", "North"],
                &["1005", "27000", "Hooli", "South"],
                &["1006", "24999.99", "Wayne", "East"],
                &[""],
                &["Grand Total", "249999.99", "", ""],
            ],
        ),
    ]
}

fn run_fixture() -> bookrec_recon::ReconReport {
    match run(&RunConfig::default(), fixture()).unwrap() {
        RunOutcome::Report(report) => report,
        other => panic!("expected a report, got {other:?}"),
    }
}

#[test]
fn statuses_cover_all_buckets() {
    let report = run_fixture();

    let by_id = |id: &str| report.rows.iter().find(|r| r.order_id == id).unwrap();

    // 20000 + 10000.005 = 30000.005, within 0.01 of the ledger's 30000.
    let split = by_id("1001");
    assert_eq!(split.status, MatchStatus::Match);
    assert!(split.is_match);
    assert_eq!(split.type_label, "Direct Sale");

    // Absent everywhere operational.
    let missing = by_id("1002");
    assert_eq!(missing.status, MatchStatus::MissingInVsb);
    assert_eq!(missing.vsb_amount, None);
    assert!(!missing.is_match);

    // delta 500: status mismatch, rollup still yes.
    let near = by_id("1003");
    assert_eq!(near.status, MatchStatus::AmountMismatch);
    assert!(near.is_match);
    assert_eq!(near.delta, Some(500.0));

    // Exact match resolved through the Web Order ID alias.
    let pos = by_id("1004");
    assert_eq!(pos.status, MatchStatus::Match);
    assert_eq!(pos.type_label, "POS");

    // XAAS 26500 + MANREV 500 = 27000 across two extracts.
    let combined = by_id("1005");
    assert_eq!(combined.status, MatchStatus::Match);
    assert_eq!(combined.type_label, "XaaS recurring");
}

#[test]
fn threshold_and_footer_rows_are_excluded() {
    let report = run_fixture();
    // 1006 is below 25k; banner/footer rows never become orders.
    assert!(report.rows.iter().all(|r| r.order_id != "1006"));
    assert!(report.rows.iter().all(|r| !r.order_id.contains("Grand")));
    assert_eq!(report.rows.len(), 5);
}

#[test]
fn gap_analytics_count_only_absent_orders() {
    let report = run_fixture();
    assert_eq!(report.summary.sum_missing, 40_000.0);
    assert_eq!(report.summary.count_missing, 1);
    assert_eq!(report.summary.total, 5);
    assert_eq!(report.summary.matched, 3);
    assert_eq!(report.summary.amount_mismatches, 1);
}

#[test]
fn sentinel_memo_never_matches_a_real_order() {
    let report = run_fixture();
    assert!(report.vsb_pivot.iter().any(|r| r.order_id == "-9999"));
    assert!(report.rows.iter().all(|r| r.order_id != "-9999"));
}

#[test]
fn ledger_extras_reach_the_artifact() {
    let report = run_fixture();
    let extra_columns = RunConfig::default().columns.extra;
    let text = report::render_csv(&report.rows, &extra_columns).unwrap();
    let mut lines = text.lines();
    assert_eq!(
        lines.next().unwrap(),
        "SO#,MBR$,Vsb$,Delta$,isMatch,Type,End Customer Company Name,L4,Product Family,Month ID"
    );
    // Sorted by ledger amount descending: 1004 (88k) first.
    let first = lines.next().unwrap();
    assert!(first.starts_with("1004,"), "got: {first}");
    assert!(first.contains("Umbrella"));
    assert!(first.contains("North"));
    let missing = text.lines().find(|l| l.starts_with("1002,")).unwrap();
    assert!(missing.contains("N/A,N/A,no"));
}

#[test]
fn identical_inputs_render_identical_artifacts() {
    let extra_columns = RunConfig::default().columns.extra;
    let first = report::render_csv(&run_fixture().rows, &extra_columns).unwrap();
    let second = report::render_csv(&run_fixture().rows, &extra_columns).unwrap();
    assert_eq!(first, second);
}

#[test]
fn payload_serializes_without_pivot_noise() {
    let report = run_fixture();
    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["summary"]["count_missing"], 1);
    assert_eq!(json["summary"]["sum_missing"], 40000.0);
    assert!(json.get("mbr_pivot").is_none());
    assert!(json["rows"][0]["status"].is_string());
}
