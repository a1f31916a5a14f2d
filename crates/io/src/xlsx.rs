// Excel import (xlsx, xls, xlsb, ods) via calamine. One-way conversion:
// the first worksheet becomes a string grid, which is all the pipeline needs.

use std::path::Path;

use bookrec_recon::model::RawTable;
use calamine::{open_workbook_auto, Data, Reader};

pub fn import(path: &Path) -> Result<RawTable, String> {
    let mut workbook = open_workbook_auto(path).map_err(|e| e.to_string())?;
    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| format!("{}: workbook has no sheets", path.display()))?;
    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| e.to_string())?;

    let rows = range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect();
    Ok(RawTable::new(path.display().to_string(), rows))
}

/// Render one cell the way the pipeline expects to see it: numbers without
/// a trailing `.0`, empty for blanks and error cells.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty | Data::Error(_) => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => format_float(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
        Data::DateTime(dt) => format_float(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => s.clone(),
    }
}

fn format_float(f: f64) -> String {
    if f.fract() == 0.0 && f.abs() < 9.0e15 {
        (f as i64).to_string()
    } else {
        f.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integral_floats_lose_the_decimal_tail() {
        assert_eq!(cell_to_string(&Data::Float(1001.0)), "1001");
        assert_eq!(cell_to_string(&Data::Float(30000.005)), "30000.005");
        assert_eq!(cell_to_string(&Data::Float(-9999.0)), "-9999");
    }

    #[test]
    fn blanks_and_errors_are_empty() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::String("Grand Total".into())), "Grand Total");
    }

    #[test]
    fn unreadable_workbook_is_an_error_string() {
        let err = import(Path::new("/no/such/book.xlsx")).unwrap_err();
        assert!(!err.is_empty());
    }
}
