use serde::Deserialize;

use crate::error::ReconError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Run configuration. Every field is defaulted, so an empty TOML document is
/// a valid config reproducing the stock reconciliation.
#[derive(Debug, Clone, Deserialize)]
pub struct RunConfig {
    /// Ledger orders at or below this amount are not compared.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
    #[serde(default)]
    pub tolerance: ToleranceConfig,
    #[serde(default)]
    pub columns: ColumnConfig,
    #[serde(default)]
    pub ledger: LedgerConfig,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            tolerance: ToleranceConfig::default(),
            columns: ColumnConfig::default(),
            ledger: LedgerConfig::default(),
        }
    }
}

fn default_threshold() -> f64 {
    25_000.0
}

// ---------------------------------------------------------------------------
// Tolerances
// ---------------------------------------------------------------------------

/// Two independent tolerances: `status` drives the per-row status detail,
/// `rollup` drives the coarse isMatch flag.
#[derive(Debug, Clone, Deserialize)]
pub struct ToleranceConfig {
    #[serde(default = "default_status_tolerance")]
    pub status: f64,
    #[serde(default = "default_rollup_tolerance")]
    pub rollup: f64,
}

impl Default for ToleranceConfig {
    fn default() -> Self {
        Self {
            status: default_status_tolerance(),
            rollup: default_rollup_tolerance(),
        }
    }
}

fn default_status_tolerance() -> f64 {
    0.01
}

fn default_rollup_tolerance() -> f64 {
    1_000.0
}

// ---------------------------------------------------------------------------
// Column aliases
// ---------------------------------------------------------------------------

/// Ranked alias lists. Order is a disambiguation contract: the first alias
/// present in a file wins.
#[derive(Debug, Clone, Deserialize)]
pub struct ColumnConfig {
    #[serde(default = "default_order_id_aliases")]
    pub order_id: Vec<String>,
    #[serde(default = "default_amount_aliases")]
    pub amount: Vec<String>,
    /// Ledger columns carried through to the report when present.
    #[serde(default = "default_extra_columns")]
    pub extra: Vec<String>,
}

impl Default for ColumnConfig {
    fn default() -> Self {
        Self {
            order_id: default_order_id_aliases(),
            amount: default_amount_aliases(),
            extra: default_extra_columns(),
        }
    }
}

fn default_order_id_aliases() -> Vec<String> {
    ["Sales Order Number", "SO Number", "Web Order ID", "SO"]
        .map(String::from)
        .to_vec()
}

fn default_amount_aliases() -> Vec<String> {
    ["Total Bookings", "Bookings"].map(String::from).to_vec()
}

fn default_extra_columns() -> Vec<String> {
    ["End Customer Company Name", "L4", "Product Family", "Month ID"]
        .map(String::from)
        .to_vec()
}

// ---------------------------------------------------------------------------
// Ledger cleaning
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Rows whose first cell contains one of these phrases
    /// (case-insensitive) are dropped before the ledger is pivoted.
    #[serde(default = "default_exclusions")]
    pub exclude: Vec<String>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self { exclude: default_exclusions() }
    }
}

fn default_exclusions() -> Vec<String> {
    ["grand total", "ss bookings 360"].map(String::from).to_vec()
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl RunConfig {
    pub fn from_toml(input: &str) -> Result<Self, ReconError> {
        let config: RunConfig =
            toml::from_str(input).map_err(|e| ReconError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ReconError> {
        if !self.threshold.is_finite() || self.threshold <= 0.0 {
            return Err(ReconError::ConfigValidation(format!(
                "threshold must be a positive number, got {}",
                self.threshold
            )));
        }
        for (name, value) in [
            ("tolerance.status", self.tolerance.status),
            ("tolerance.rollup", self.tolerance.rollup),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ReconError::ConfigValidation(format!(
                    "{name} must be a positive number, got {value}"
                )));
            }
        }
        if self.columns.order_id.is_empty() {
            return Err(ReconError::ConfigValidation(
                "columns.order_id must list at least one alias".into(),
            ));
        }
        if self.columns.amount.is_empty() {
            return Err(ReconError::ConfigValidation(
                "columns.amount must list at least one alias".into(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_stock_config() {
        let config = RunConfig::from_toml("").unwrap();
        assert_eq!(config.threshold, 25_000.0);
        assert_eq!(config.tolerance.status, 0.01);
        assert_eq!(config.tolerance.rollup, 1_000.0);
        assert_eq!(config.columns.order_id[0], "Sales Order Number");
        assert_eq!(config.columns.amount, vec!["Total Bookings", "Bookings"]);
        assert_eq!(config.ledger.exclude.len(), 2);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = RunConfig::from_toml(
            r#"
threshold = 50000.0

[tolerance]
rollup = 250.0
"#,
        )
        .unwrap();
        assert_eq!(config.threshold, 50_000.0);
        assert_eq!(config.tolerance.status, 0.01);
        assert_eq!(config.tolerance.rollup, 250.0);
    }

    #[test]
    fn reject_non_positive_threshold() {
        let err = RunConfig::from_toml("threshold = 0.0").unwrap_err();
        assert!(err.to_string().contains("threshold"));
    }

    #[test]
    fn reject_empty_alias_list() {
        let err = RunConfig::from_toml(
            r#"
[columns]
order_id = []
"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("order_id"));
    }

    #[test]
    fn reject_bad_toml() {
        assert!(matches!(
            RunConfig::from_toml("threshold = \"lots\""),
            Err(ReconError::ConfigParse(_))
        ));
    }
}
