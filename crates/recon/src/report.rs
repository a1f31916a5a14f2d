use std::cmp::Ordering;

use crate::error::ReconError;
use crate::model::ComparisonRow;

/// Fixed leading columns of the report artifact, in output order.
pub const BASE_COLUMNS: [&str; 6] = ["SO#", "MBR$", "Vsb$", "Delta$", "isMatch", "Type"];

/// Largest-first by ledger amount; rows without a usable amount sort last.
/// Stable, so equal amounts keep pivot order.
pub fn sort_rows(rows: &mut [ComparisonRow]) {
    rows.sort_by(|a, b| cmp_amount_desc(a.mbr_amount, b.mbr_amount));
}

fn cmp_amount_desc(a: f64, b: f64) -> Ordering {
    match (a.is_finite(), b.is_finite()) {
        (true, true) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}

/// `$1,234,567.89`-style rendering, two decimals, sign between `$` and the
/// digits.
pub fn format_currency(value: f64) -> String {
    let fixed = format!("{value:.2}");
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let (sign, digits) = match int_part.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", int_part),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("${sign}{grouped}.{frac_part}")
}

pub fn format_optional_currency(value: Option<f64>) -> String {
    match value {
        Some(v) => format_currency(v),
        None => "N/A".to_string(),
    }
}

/// Numeric-looking order ids (digits with at most one dot) render as plain
/// integers; everything else passes through untouched.
pub fn format_order_id(raw: &str) -> String {
    let mut dots = 0usize;
    let numeric_looking = !raw.is_empty()
        && raw.chars().all(|c| {
            if c == '.' {
                dots += 1;
                true
            } else {
                c.is_ascii_digit()
            }
        })
        && dots <= 1
        && raw.chars().any(|c| c.is_ascii_digit());

    if numeric_looking {
        if let Ok(v) = raw.parse::<f64>() {
            if v.is_finite() && v.abs() < 9.0e15 {
                return (v.trunc() as i64).to_string();
            }
        }
    }
    raw.to_string()
}

/// Serialize sorted rows to the delimited artifact: header plus one line
/// per qualifying order, auxiliary columns appended in configured order.
pub fn render_csv(rows: &[ComparisonRow], extra_columns: &[String]) -> Result<String, ReconError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    let mut header: Vec<&str> = BASE_COLUMNS.to_vec();
    header.extend(extra_columns.iter().map(|s| s.as_str()));
    writer
        .write_record(&header)
        .map_err(|e| ReconError::Render(e.to_string()))?;

    for row in rows {
        let mut record = vec![
            format_order_id(&row.order_id),
            format_currency(row.mbr_amount),
            format_optional_currency(row.vsb_amount),
            format_optional_currency(row.delta),
            if row.is_match { "yes" } else { "no" }.to_string(),
            row.type_label.clone(),
        ];
        for column in extra_columns {
            record.push(row.extras.get(column).cloned().unwrap_or_default());
        }
        writer
            .write_record(&record)
            .map_err(|e| ReconError::Render(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ReconError::Render(e.to_string()))?;
    String::from_utf8(bytes).map_err(|e| ReconError::Render(e.to_string()))
}
