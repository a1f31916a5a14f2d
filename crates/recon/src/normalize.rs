use crate::columns;
use crate::config::RunConfig;
use crate::error::ReconError;
use crate::model::{Detection, MbrLayout, NormalizedRecord, RawTable, Role};

/// Stand-in order id for credit/debit memos that carry none; never collides
/// with a real ledger order.
pub const SENTINEL_ORDER_ID: &str = "-9999";

/// Manual revenue adjustments use a fixed column triple, no alias scan.
const MANREV_COLUMNS: [&str; 3] = ["SO Number", "Revenue (Original)", "Type"];
/// Credit/debit memos likewise.
const CREMEMO_COLUMNS: [&str; 3] = ["SO Number", "Bookings", "Type"];

/// Strip currency symbol and thousands separators, then parse. Anything
/// unparseable coerces to 0.0 rather than failing the batch; the result is
/// always finite.
pub fn clean_amount(raw: &str) -> f64 {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| *c != '$' && *c != ',')
        .collect();
    match cleaned.parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Project one classified table to normalized records.
pub fn normalize(
    table: &RawTable,
    detection: Detection,
    config: &RunConfig,
) -> Result<Vec<NormalizedRecord>, ReconError> {
    match detection.role {
        Role::ManualRevenue => fixed_triple(table, &MANREV_COLUMNS, false),
        Role::CreditMemo => fixed_triple(table, &CREMEMO_COLUMNS, true),
        Role::Mbr => {
            let layout = detection.layout.unwrap_or(MbrLayout::Preprocessed);
            let cleaned = clean_ledger(table, layout, &config.ledger.exclude);
            normalize_ledger(&cleaned, config)
        }
        role => aliased(table, role, config),
    }
}

/// DIRECT/POS/XAAS: resolve the order-id and amount columns from the alias
/// lists; stamp the role token as the type label when no Type column exists.
fn aliased(table: &RawTable, role: Role, config: &RunConfig) -> Result<Vec<NormalizedRecord>, ReconError> {
    let header = table.header().unwrap_or_default();
    let resolved = columns::resolve(header, &config.columns).map_err(|class| {
        ReconError::MissingColumn { source: table.source.clone(), column: class.into() }
    })?;
    let type_idx = columns::position(header, "Type");

    let records = table
        .rows
        .iter()
        .skip(1)
        .map(|row| NormalizedRecord {
            order_id: cell(row, resolved.order_id).trim().to_string(),
            amount: clean_amount(cell(row, resolved.amount)),
            type_label: match type_idx {
                Some(i) => cell(row, i).trim().to_string(),
                None => role.token().to_string(),
            },
            extras: Default::default(),
        })
        .collect();
    Ok(records)
}

/// MANREV/CREMEMO: fixed triple, no dynamic resolution. A memo without an
/// order id gets the sentinel instead.
fn fixed_triple(
    table: &RawTable,
    names: &[&str; 3],
    sentinel_blank_ids: bool,
) -> Result<Vec<NormalizedRecord>, ReconError> {
    let header = table.header().unwrap_or_default();
    let mut idx = [0usize; 3];
    for (slot, name) in idx.iter_mut().zip(names) {
        *slot = columns::position(header, name).ok_or_else(|| ReconError::MissingColumn {
            source: table.source.clone(),
            column: (*name).into(),
        })?;
    }
    let [id_idx, amount_idx, type_idx] = idx;

    let records = table
        .rows
        .iter()
        .skip(1)
        .map(|row| {
            let mut order_id = cell(row, id_idx).trim().to_string();
            if sentinel_blank_ids && order_id.is_empty() {
                order_id = SENTINEL_ORDER_ID.to_string();
            }
            NormalizedRecord {
                order_id,
                amount: clean_amount(cell(row, amount_idx)),
                type_label: cell(row, type_idx).trim().to_string(),
                extras: Default::default(),
            }
        })
        .collect();
    Ok(records)
}

/// Drop the layout's leading rows, then every row whose first cell is blank
/// or contains a configured exclusion phrase (banner and footer lines).
/// The first surviving row is the header.
pub fn clean_ledger(table: &RawTable, layout: MbrLayout, exclude: &[String]) -> RawTable {
    let rows = table
        .rows
        .iter()
        .skip(layout.skip_rows())
        .filter(|row| {
            let first = row.first().map(|c| c.trim()).unwrap_or_default();
            if first.is_empty() {
                return false;
            }
            let lowered = first.to_lowercase();
            !exclude.iter().any(|phrase| lowered.contains(&phrase.to_lowercase()))
        })
        .cloned()
        .collect();
    RawTable::new(table.source.clone(), rows)
}

/// Ledger projection: aliased columns plus the configured auxiliary columns.
/// Missing required columns here are fatal for the run, which the caller
/// enforces by propagating the error.
fn normalize_ledger(cleaned: &RawTable, config: &RunConfig) -> Result<Vec<NormalizedRecord>, ReconError> {
    let header = cleaned.header().unwrap_or_default();
    let resolved = columns::resolve(header, &config.columns).map_err(|class| {
        ReconError::MissingColumn { source: cleaned.source.clone(), column: class.into() }
    })?;
    let type_idx = columns::position(header, "Type");
    let extra_idx: Vec<(String, usize)> = config
        .columns
        .extra
        .iter()
        .filter_map(|name| columns::position(header, name).map(|i| (name.clone(), i)))
        .collect();

    let records = cleaned
        .rows
        .iter()
        .skip(1)
        .map(|row| NormalizedRecord {
            order_id: cell(row, resolved.order_id).trim().to_string(),
            amount: clean_amount(cell(row, resolved.amount)),
            type_label: match type_idx {
                Some(i) => cell(row, i).trim().to_string(),
                None => String::new(),
            },
            extras: extra_idx
                .iter()
                .map(|(name, i)| (name.clone(), cell(row, *i).to_string()))
                .collect(),
        })
        .collect();
    Ok(records)
}

/// Ragged rows read as empty cells.
fn cell(row: &[String], idx: usize) -> &str {
    row.get(idx).map(|s| s.as_str()).unwrap_or_default()
}
