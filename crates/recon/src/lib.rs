//! `bookrec-recon` — bookings-vs-ledger reconciliation engine.
//!
//! Pure engine crate: receives pre-loaded tables, returns a classified
//! comparison report. No CLI or file-system dependencies.

pub mod classify;
pub mod columns;
pub mod compare;
pub mod config;
pub mod engine;
pub mod error;
pub mod model;
pub mod normalize;
pub mod pivot;
pub mod report;

pub use config::RunConfig;
pub use engine::run;
pub use error::ReconError;
pub use model::{ComparisonRow, RawTable, ReconReport, Role, RunOutcome};
