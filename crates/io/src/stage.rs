// Run-scoped staging area for intermediate artifacts

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use bookrec_recon::model::PivotRow;
use tempfile::TempDir;

/// Scratch directory holding one run's intermediate artifacts (pivot
/// snapshots). Removal is tied to `Drop`, so cleanup happens on success and
/// failure paths alike.
pub struct Stage {
    dir: TempDir,
}

impl Stage {
    pub fn new() -> Result<Self, String> {
        let dir = TempDir::with_prefix("bookrec-")
            .map_err(|e| format!("cannot create scratch directory: {e}"))?;
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Dump one pivot as a CSV snapshot: order id, amount, type, then the
    /// union of auxiliary columns.
    pub fn dump_pivot(&self, name: &str, rows: &[PivotRow]) -> Result<PathBuf, String> {
        let extra_names: BTreeSet<&str> = rows
            .iter()
            .flat_map(|r| r.extras.keys().map(|k| k.as_str()))
            .collect();

        let path = self.dir.path().join(name);
        let mut writer = csv::Writer::from_path(&path).map_err(|e| e.to_string())?;

        let mut header = vec!["SO", "Bookings", "Type"];
        header.extend(extra_names.iter().copied());
        writer.write_record(&header).map_err(|e| e.to_string())?;

        for row in rows {
            let mut record = vec![
                row.order_id.clone(),
                row.amount.to_string(),
                row.type_label.clone(),
            ];
            for name in &extra_names {
                record.push(row.extras.get(*name).cloned().unwrap_or_default());
            }
            writer.write_record(&record).map_err(|e| e.to_string())?;
        }
        writer.flush().map_err(|e| e.to_string())?;
        Ok(path)
    }

    /// Copy every staged file into `dest` for post-run inspection.
    pub fn keep_into(&self, dest: &Path) -> Result<(), String> {
        std::fs::create_dir_all(dest).map_err(|e| format!("cannot create {}: {e}", dest.display()))?;
        let entries = std::fs::read_dir(self.dir.path()).map_err(|e| e.to_string())?;
        for entry in entries {
            let entry = entry.map_err(|e| e.to_string())?;
            if entry.path().is_file() {
                std::fs::copy(entry.path(), dest.join(entry.file_name()))
                    .map_err(|e| e.to_string())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn pivot_row(order_id: &str, amount: f64) -> PivotRow {
        let mut extras = BTreeMap::new();
        extras.insert("L4".to_string(), "West".to_string());
        PivotRow { order_id: order_id.into(), amount, type_label: "DIRECT".into(), extras }
    }

    #[test]
    fn snapshot_layout() {
        let stage = Stage::new().unwrap();
        let path = stage.dump_pivot("vsb-pivot.csv", &[pivot_row("1001", 250.5)]).unwrap();
        let text = std::fs::read_to_string(path).unwrap();
        assert_eq!(text, "SO,Bookings,Type,L4\n1001,250.5,DIRECT,West\n");
    }

    #[test]
    fn scratch_is_removed_on_drop() {
        let stage = Stage::new().unwrap();
        stage.dump_pivot("mbr-pivot.csv", &[pivot_row("1", 1.0)]).unwrap();
        let path = stage.path().to_path_buf();
        assert!(path.exists());
        drop(stage);
        assert!(!path.exists());
    }

    #[test]
    fn keep_into_copies_snapshots_out() {
        let dest = tempfile::tempdir().unwrap();
        let kept = dest.path().join("stage");
        {
            let stage = Stage::new().unwrap();
            stage.dump_pivot("vsb-pivot.csv", &[pivot_row("1", 1.0)]).unwrap();
            stage.keep_into(&kept).unwrap();
        }
        assert!(kept.join("vsb-pivot.csv").exists());
    }
}
