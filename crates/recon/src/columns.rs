use crate::config::ColumnConfig;

/// Resolved indices of the two required columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedColumns {
    pub order_id: usize,
    pub amount: usize,
}

/// First alias present in `headers`, scanning aliases in priority order.
/// The alias ranking is a disambiguation contract: a file carrying both
/// "Sales Order Number" and "SO" always resolves to the former.
pub fn find_column(headers: &[String], aliases: &[String]) -> Option<usize> {
    aliases
        .iter()
        .find_map(|alias| headers.iter().position(|h| h == alias))
}

/// Exact-name lookup for a single column.
pub fn position(headers: &[String], name: &str) -> Option<usize> {
    headers.iter().position(|h| h == name)
}

/// Resolve both required columns, or report which class is missing.
pub fn resolve(headers: &[String], config: &ColumnConfig) -> Result<ResolvedColumns, &'static str> {
    let order_id = find_column(headers, &config.order_id).ok_or("order id")?;
    let amount = find_column(headers, &config.amount).ok_or("amount")?;
    Ok(ResolvedColumns { order_id, amount })
}
