// Shared helpers for command implementations

use std::path::Path;

use rollfwd_grid::Workbook;
use rollfwd_io::xlsx;
use rollfwd_io::{ExportResult, ImportResult};

use crate::CliError;

pub fn load_workbook(path: &Path) -> Result<(Workbook, ImportResult), CliError> {
    xlsx::import(path).map_err(|e| CliError::io(format!("{}: {}", path.display(), e)))
}

pub fn save_workbook(workbook: &Workbook, path: &Path) -> Result<ExportResult, CliError> {
    xlsx::export(workbook, path).map_err(|e| CliError::io(format!("{}: {}", path.display(), e)))
}

/// Pretty-print a JSON value to stdout. Status lines go to stderr, so JSON
/// output stays pipeable.
pub fn print_json(value: &serde_json::Value) -> Result<(), CliError> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;
    println!("{text}");
    Ok(())
}
