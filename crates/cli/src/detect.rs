//! `bookrec detect` — classify source files without running anything.

use std::path::Path;

use crate::exit_codes::EXIT_NO_INPUT;
use crate::CliError;

pub fn cmd_detect(files: &[std::path::PathBuf], data_dir: Option<&Path>) -> Result<(), CliError> {
    let paths = crate::run::gather_inputs(files, data_dir)?;
    if paths.is_empty() {
        return Err(CliError::with_hint(
            EXIT_NO_INPUT,
            "no input files",
            "pass source files as arguments or use --data-dir",
        ));
    }

    for path in &paths {
        match bookrec_io::load::load_table(path) {
            Ok(table) => match bookrec_recon::classify::detect(&table) {
                Some(detection) => println!("{}: {}", path.display(), detection.role),
                None => println!("{}: unknown", path.display()),
            },
            Err(e) => println!("{}: unreadable ({e})", path.display()),
        }
    }
    Ok(())
}
