// Extension dispatch for source files

use std::path::Path;

use bookrec_recon::model::RawTable;

/// Extensions eligible when scanning a data directory.
const ELIGIBLE_EXTENSIONS: [&str; 5] = ["csv", "tsv", "xlsx", "xls", "ods"];

/// Load one source file into a grid, dispatching on extension.
pub fn load_table(path: &Path) -> Result<RawTable, String> {
    match extension(path).as_deref() {
        Some("csv") => crate::csv::import(path),
        Some("tsv") => crate::csv::import_tsv(path),
        Some("xlsx") | Some("xls") | Some("xlsb") | Some("ods") => crate::xlsx::import(path),
        _ => Err(format!("{}: unsupported file type", path.display())),
    }
}

/// Whether a directory-scan candidate should be picked up.
pub fn eligible(path: &Path) -> bool {
    matches!(extension(path).as_deref(), Some(ext) if ELIGIBLE_EXTENSIONS.contains(&ext))
}

fn extension(path: &Path) -> Option<String> {
    path.extension().map(|e| e.to_string_lossy().to_lowercase())
}
