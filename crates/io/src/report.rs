// Report artifact output

use std::path::{Path, PathBuf};

use crate::REPORT_FILE_NAME;

/// Write the rendered artifact into the destination directory, creating it
/// if needed. Returns the artifact path.
pub fn write_report(dest_dir: &Path, csv_text: &str) -> Result<PathBuf, String> {
    std::fs::create_dir_all(dest_dir)
        .map_err(|e| format!("cannot create {}: {e}", dest_dir.display()))?;
    let path = dest_dir.join(REPORT_FILE_NAME);
    std::fs::write(&path, csv_text).map_err(|e| format!("cannot write {}: {e}", path.display()))?;
    Ok(path)
}
