use std::collections::BTreeMap;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

/// An unlabelled grid of cells as read from one source file.
///
/// Row 0 is usually a header row, but ledger exports may carry banner rows
/// above it; nothing here assumes a header until classification has decided
/// what the table is.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// Display identifier, normally the file path.
    pub source: String,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn new(source: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self { source: source.into(), rows }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The first row, treated as the header by consumers that have decided
    /// this table starts with one.
    pub fn header(&self) -> Option<&[String]> {
        self.rows.first().map(|r| r.as_slice())
    }

    /// Cell (0, 0), used by the ledger marker probe.
    pub fn first_cell(&self) -> Option<&str> {
        self.rows.first().and_then(|r| r.first()).map(|s| s.as_str())
    }
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// The role a source file plays in the reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Direct,
    Pos,
    Xaas,
    ManualRevenue,
    CreditMemo,
    Mbr,
}

impl Role {
    /// Every role, in canonical precedence order (also the filename-fallback
    /// scan order).
    pub const ALL: [Role; 6] = [
        Role::Direct,
        Role::Pos,
        Role::Xaas,
        Role::ManualRevenue,
        Role::CreditMemo,
        Role::Mbr,
    ];

    /// The operational extract roles, in the order their records are
    /// concatenated before pivoting.
    pub const OPERATIONAL: [Role; 5] = [
        Role::Direct,
        Role::Pos,
        Role::Xaas,
        Role::ManualRevenue,
        Role::CreditMemo,
    ];

    /// Canonical token, as it appears in file names and type-label stamps.
    pub fn token(&self) -> &'static str {
        match self {
            Self::Direct => "DIRECT",
            Self::Pos => "POS",
            Self::Xaas => "XAAS",
            Self::ManualRevenue => "MANREV",
            Self::CreditMemo => "CREMEMO",
            Self::Mbr => "MBR",
        }
    }

    pub fn is_operational(&self) -> bool {
        !matches!(self, Self::Mbr)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.token())
    }
}

/// Which shape of ledger export was recognized. The raw report carries a
/// banner row above the header; the preprocessed form starts at the header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MbrLayout {
    RawExport,
    Preprocessed,
}

impl MbrLayout {
    /// Leading rows to drop before ledger cleaning.
    pub fn skip_rows(&self) -> usize {
        match self {
            Self::RawExport => 1,
            Self::Preprocessed => 0,
        }
    }
}

/// Outcome of classifying one source table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    pub role: Role,
    /// Present only for `Role::Mbr`.
    pub layout: Option<MbrLayout>,
}

// ---------------------------------------------------------------------------
// Normalization + Aggregation
// ---------------------------------------------------------------------------

/// One projected record: order id, cleaned amount, type label, plus any
/// auxiliary ledger columns carried through to the report.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRecord {
    pub order_id: String,
    pub amount: f64,
    pub type_label: String,
    pub extras: BTreeMap<String, String>,
}

/// Records sharing one order id, amounts summed. Order ids are unique
/// within a pivot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotRow {
    pub order_id: String,
    pub amount: f64,
    pub type_label: String,
    pub extras: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MatchStatus {
    Match,
    AmountMismatch,
    MissingInVsb,
}

impl std::fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Match => write!(f, "Match"),
            Self::AmountMismatch => write!(f, "Amount mismatch"),
            Self::MissingInVsb => write!(f, "Missing in VSB"),
        }
    }
}

/// One qualifying ledger order checked against the operational pivot.
/// Created once, immutable thereafter.
#[derive(Debug, Clone, Serialize)]
pub struct ComparisonRow {
    pub order_id: String,
    pub mbr_amount: f64,
    /// Absent when the order never appears in the operational extracts.
    pub vsb_amount: Option<f64>,
    pub delta: Option<f64>,
    pub status: MatchStatus,
    /// Coarse rollup flag, independent of `status`.
    pub is_match: bool,
    pub type_label: String,
    pub extras: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Summary + Output
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GapSummary {
    pub total: usize,
    pub matched: usize,
    pub amount_mismatches: usize,
    /// Sum of ledger amounts for orders absent from the operational pivot.
    pub sum_missing: f64,
    /// Count of orders absent from the operational pivot.
    pub count_missing: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunMeta {
    pub engine_version: String,
    pub run_at: String,
    pub threshold: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReconReport {
    pub meta: RunMeta,
    pub summary: GapSummary,
    pub rows: Vec<ComparisonRow>,
    pub warnings: Vec<String>,
    /// Pivot snapshots for staging/inspection; not part of the payload.
    #[serde(skip)]
    pub mbr_pivot: Vec<PivotRow>,
    #[serde(skip)]
    pub vsb_pivot: Vec<PivotRow>,
}

/// What one reconciliation run produced. The two empty-input cases are
/// results, not errors: callers get an explicit "nothing to compare".
#[derive(Debug)]
pub enum RunOutcome {
    Report(ReconReport),
    NoLedger { warnings: Vec<String> },
    NoOperationalData { warnings: Vec<String> },
}
