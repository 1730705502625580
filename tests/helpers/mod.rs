//! Test helpers for catalog-import integration tests
//!
//! Shared sample files and temporary directory handling.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Header line used by every sample file
#[allow(dead_code)]
pub const HEADER: &str = "name,price,description,features,benefits";

/// The two-row sample with one invalid row (row 3)
pub const MIXED_SAMPLE: &str = "name,price,description,features,benefits\n\"Product A\",\"$99\",\"Desc A\",\"F1;F2\",\"B1\"\n\"\",\"$50\",\"Desc B\",\"\",\"\"";

/// Three valid products
pub const CLEAN_SAMPLE: &str = "name,price,description,features,benefits\n\"Zeta Suite\",\"$30\",\"Analytics for teams\",\"Dashboards;Exports\",\"\"\n\"alpha kit\",\"$10\",\"Starter bundle\",\"Templates\",\"Fast setup\"\n\"Beta Pack\",\"$20\",\"Smith, Jones and partners\",\"Audit; Review\",\"\"\n";

/// Helper function to create a temp directory for tests, respecting CARGO_TARGET_TMPDIR if set
pub fn create_temp_dir() -> Result<TempDir, Box<dyn std::error::Error>> {
    if let Ok(cargo_target_tmpdir) = env::var("CARGO_TARGET_TMPDIR") {
        fs::create_dir_all(&cargo_target_tmpdir)?;
        Ok(TempDir::new_in(cargo_target_tmpdir)?)
    } else {
        Ok(TempDir::new()?)
    }
}

/// Helper function to write a CSV file with custom contents
pub fn create_custom_csv(
    dir: &Path,
    filename: &str,
    content: &str,
) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Quote a row the way the template does
#[allow(dead_code)]
pub fn quoted_row(cells: &[&str]) -> String {
    cells
        .iter()
        .map(|cell| format!("\"{}\"", cell))
        .collect::<Vec<_>>()
        .join(",")
}
