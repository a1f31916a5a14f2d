// File ingestion and report output

pub mod csv;
pub mod load;
pub mod report;
pub mod stage;
pub mod xlsx;

/// Fixed name of the reconciliation artifact; identical inputs produce an
/// identical artifact at an identical path.
pub const REPORT_FILE_NAME: &str = "bookings-gap.csv";
