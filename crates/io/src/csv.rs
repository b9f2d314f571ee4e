// CSV export for quick inspection of a single sheet

use std::path::Path;

use rollfwd_grid::Sheet;

/// Export one sheet as CSV using display values.
///
/// A formula cell exports its cached value and error values export their
/// literal. Blank rows are skipped, trailing empty fields are trimmed.
/// Returns the number of rows written.
pub fn export_sheet(sheet: &Sheet, path: &Path) -> Result<usize, String> {
    // Rows may be variable width because trailing empties are omitted.
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| format!("Failed to create CSV file: {}", e))?;

    let last_row = sheet.last_row();
    let last_col = sheet.last_col();
    let mut rows_written = 0;

    for row in 1..=last_row {
        let mut record: Vec<String> = Vec::new();
        let mut last_non_empty = 0;

        for col in 1..=last_col {
            let value = sheet.value(row, col).display_string();
            if !value.is_empty() {
                last_non_empty = col;
            }
            record.push(value);
        }

        if last_non_empty > 0 {
            record.truncate(last_non_empty);
            writer.write_record(&record).map_err(|e| e.to_string())?;
            rows_written += 1;
        }
    }

    writer.flush().map_err(|e| e.to_string())?;
    Ok(rows_written)
}
