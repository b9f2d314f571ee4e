// Excel file import (xlsx, xls, xlsb, ods) and export (xlsx only)
//
// Import keeps the full workbook: every sheet, cell values, formula sources,
// and date/time formats. A formula cell keeps the value its file cached for
// it; the source text rides alongside and is never evaluated.

use std::path::Path;

use calamine::{open_workbook_auto, CellErrorType, Data, Range, Reader};
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};
use serde::Serialize;

use rollfwd_grid::addr::{cell_name, MAX_COLS, MAX_ROWS};
use rollfwd_grid::{Cell, CellValue, NumberFormat, Sheet, Workbook};

// ---------------------------------------------------------------------------
// Import
// ---------------------------------------------------------------------------

/// Statistics from an Excel import
#[derive(Debug, Default, Clone, Serialize)]
pub struct ImportResult {
    pub sheets_imported: usize,
    pub cells_imported: usize,
    pub formulas_imported: usize,
    pub dates_imported: usize,
    pub error_cells: usize,
    /// True if data beyond Excel's sheet limits was dropped
    pub truncated: bool,
}

impl ImportResult {
    /// One-line summary for status output
    pub fn summary(&self) -> String {
        let mut parts = vec![
            format!(
                "{} sheet{}",
                self.sheets_imported,
                if self.sheets_imported == 1 { "" } else { "s" }
            ),
            format!("{} cells", self.cells_imported),
        ];
        if self.formulas_imported > 0 {
            parts.push(format!("{} formulas", self.formulas_imported));
        }
        if self.dates_imported > 0 {
            parts.push(format!("{} dates", self.dates_imported));
        }
        if self.error_cells > 0 {
            parts.push(format!("{} error cells", self.error_cells));
        }
        parts.join(" · ")
    }

    pub fn has_warnings(&self) -> bool {
        self.truncated || self.error_cells > 0
    }

    /// Human-readable warning lines, or None if the import was clean
    pub fn warning_summary(&self) -> Option<String> {
        let mut warnings = Vec::new();
        if self.truncated {
            warnings.push("data beyond Excel's sheet limits was truncated".to_string());
        }
        if self.error_cells > 0 {
            warnings.push(format!(
                "{} cell{} carry error values (#DIV/0!, #N/A, ...)",
                self.error_cells,
                if self.error_cells == 1 { "" } else { "s" }
            ));
        }
        if warnings.is_empty() {
            None
        } else {
            Some(warnings.join("; "))
        }
    }
}

/// Import an Excel workbook with every sheet, including formula sources.
///
/// Returns the workbook plus import statistics. The file format is detected
/// from the content, so .xls/.xlsb/.ods open through the same call.
pub fn import(path: &Path) -> Result<(Workbook, ImportResult), String> {
    let mut excel =
        open_workbook_auto(path).map_err(|e| format!("Failed to open Excel file: {}", e))?;

    let sheet_names = excel.sheet_names().to_vec();
    if sheet_names.is_empty() {
        return Err("Excel file contains no sheets".to_string());
    }

    let mut result = ImportResult::default();
    let mut sheets = Vec::with_capacity(sheet_names.len());

    for name in &sheet_names {
        let mut sheet = Sheet::new(name);

        let range = excel
            .worksheet_range(name)
            .map_err(|e| format!("Failed to read sheet '{}': {}", name, e))?;
        import_values(&range, &mut sheet, &mut result);

        // Formula sources live in a separate range with its own offset.
        // Not every backend provides them, so this pass is best-effort.
        if let Ok(formulas) = excel.worksheet_formula(name) {
            import_formulas(&formulas, &mut sheet, &mut result);
        }

        result.sheets_imported += 1;
        sheets.push(sheet);
    }

    Ok((Workbook::from_sheets(sheets), result))
}

fn import_values(range: &Range<Data>, sheet: &mut Sheet, result: &mut ImportResult) {
    // Calamine ranges start at the first used cell, not at A1
    let (start_row, start_col) = range.start().unwrap_or((0, 0));

    for (row_offset, row) in range.rows().enumerate() {
        let row_idx = start_row as usize + row_offset + 1;
        if row_idx > MAX_ROWS {
            result.truncated = true;
            break;
        }
        for (col_offset, value) in row.iter().enumerate() {
            let col_idx = start_col as usize + col_offset + 1;
            if col_idx > MAX_COLS {
                result.truncated = true;
                break;
            }
            let Some((cell_value, format)) = convert_value(value) else {
                continue;
            };
            match &cell_value {
                CellValue::Error(_) => result.error_cells += 1,
                CellValue::Number(_) if format != NumberFormat::General => {
                    result.dates_imported += 1
                }
                _ => {}
            }
            sheet.set(row_idx, col_idx, cell_value);
            if format != NumberFormat::General {
                sheet.set_format(row_idx, col_idx, format);
            }
            result.cells_imported += 1;
        }
    }
}

fn import_formulas(range: &Range<String>, sheet: &mut Sheet, result: &mut ImportResult) {
    let (start_row, start_col) = range.start().unwrap_or((0, 0));

    for (row_offset, row) in range.rows().enumerate() {
        let row_idx = start_row as usize + row_offset + 1;
        if row_idx > MAX_ROWS {
            break;
        }
        for (col_offset, formula) in row.iter().enumerate() {
            let col_idx = start_col as usize + col_offset + 1;
            if col_idx > MAX_COLS {
                break;
            }
            if formula.is_empty() {
                continue;
            }
            let source = if formula.starts_with('=') {
                formula.clone()
            } else {
                format!("={}", formula)
            };
            // A formula cell with no cached value was not counted in the
            // value pass.
            if sheet.value(row_idx, col_idx).is_empty() {
                result.cells_imported += 1;
            }
            // Attach the source next to the cached value from the value pass.
            sheet.set_formula(row_idx, col_idx, source);
            result.formulas_imported += 1;
        }
    }
}

/// Convert a calamine cell into our typed value plus a format hint.
/// Returns None for cells that carry nothing worth storing.
fn convert_value(value: &Data) -> Option<(CellValue, NumberFormat)> {
    match value {
        Data::Empty => None,
        Data::String(s) => {
            if s.is_empty() {
                None
            } else {
                Some((CellValue::Text(s.clone()), NumberFormat::General))
            }
        }
        Data::Float(f) => Some((CellValue::Number(*f), NumberFormat::General)),
        Data::Int(i) => Some((CellValue::Number(*i as f64), NumberFormat::General)),
        Data::Bool(b) => Some((CellValue::Bool(*b), NumberFormat::General)),
        Data::Error(e) => Some((
            CellValue::Error(error_literal(e).to_string()),
            NumberFormat::General,
        )),
        Data::DateTime(dt) => {
            let serial = dt.as_f64();
            Some((CellValue::Number(serial), classify_serial(serial)))
        }
        // ISO datetime/duration strings (ODS) are kept as text
        Data::DateTimeIso(s) | Data::DurationIso(s) => {
            Some((CellValue::Text(s.clone()), NumberFormat::General))
        }
    }
}

/// Pick a date format from the serial number's shape: a whole-day part means
/// a date, a fractional part means a time of day.
fn classify_serial(serial: f64) -> NumberFormat {
    let has_date = serial.floor() > 0.0;
    let has_time = serial.fract().abs() > 0.0001;
    match (has_date, has_time) {
        (true, true) => NumberFormat::DateTime,
        (true, false) => NumberFormat::Date,
        (false, _) => NumberFormat::Time,
    }
}

fn error_literal(error: &CellErrorType) -> &'static str {
    match error {
        CellErrorType::Div0 => "#DIV/0!",
        CellErrorType::NA => "#N/A",
        CellErrorType::Name => "#NAME?",
        CellErrorType::Null => "#NULL!",
        CellErrorType::Num => "#NUM!",
        CellErrorType::Ref => "#REF!",
        CellErrorType::Value => "#VALUE!",
        CellErrorType::GettingData => "#GETTING_DATA",
    }
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

/// Statistics from an Excel export
#[derive(Debug, Default, Clone, Serialize)]
pub struct ExportResult {
    pub sheets_exported: usize,
    pub cells_exported: usize,
    pub formulas_exported: usize,
}

impl ExportResult {
    pub fn summary(&self) -> String {
        let mut parts = vec![
            format!(
                "{} sheet{}",
                self.sheets_exported,
                if self.sheets_exported == 1 { "" } else { "s" }
            ),
            format!("{} cells", self.cells_exported),
        ];
        if self.formulas_exported > 0 {
            parts.push(format!("{} formulas", self.formulas_exported));
        }
        parts.join(" · ")
    }
}

/// Export a workbook to .xlsx.
///
/// Formulas are written as live formulas (Excel recalculates them on open),
/// error values as literal text, and date serials with a date number format.
pub fn export(workbook: &Workbook, path: &Path) -> Result<ExportResult, String> {
    if workbook.sheet_count() == 0 {
        return Err("Workbook has no sheets to export".to_string());
    }

    let mut xlsx = XlsxWorkbook::new();
    let mut result = ExportResult::default();

    let date_format = Format::new().set_num_format("mm/dd/yyyy");
    let time_format = Format::new().set_num_format("hh:mm:ss");
    let datetime_format = Format::new().set_num_format("mm/dd/yyyy hh:mm");

    for sheet in workbook.sheets() {
        let worksheet = xlsx.add_worksheet();
        worksheet
            .set_name(&sheet.name)
            .map_err(|e| format!("Failed to name sheet '{}': {}", sheet.name, e))?;

        // Deterministic cell order keeps output files byte-stable
        let mut cells: Vec<(&(usize, usize), &Cell)> = sheet.cells().collect();
        cells.sort_by_key(|(pos, _)| **pos);

        for (&(row, col), cell) in cells {
            let r = (row - 1) as u32;
            let c = (col - 1) as u16;

            // The formula wins over any cached value: Excel recalculates
            // the result when it opens the file.
            if let Some(source) = &cell.formula {
                let body = source.strip_prefix('=').unwrap_or(source);
                worksheet.write_formula(r, c, body).map_err(|e| {
                    format!("Failed to write formula {}: {}", cell_name(row, col), e)
                })?;
                result.formulas_exported += 1;
                result.cells_exported += 1;
                continue;
            }

            let number_format = match cell.format {
                NumberFormat::General => None,
                NumberFormat::Date => Some(&date_format),
                NumberFormat::Time => Some(&time_format),
                NumberFormat::DateTime => Some(&datetime_format),
            };

            match &cell.value {
                CellValue::Empty => {
                    // Style-only cell: keep the format so templates survive
                    if let Some(format) = number_format {
                        worksheet.write_blank(r, c, format).map_err(|e| {
                            format!("Failed to write cell {}: {}", cell_name(row, col), e)
                        })?;
                    }
                    continue;
                }
                CellValue::Text(s) => {
                    worksheet.write_string(r, c, s).map_err(|e| {
                        format!("Failed to write cell {}: {}", cell_name(row, col), e)
                    })?;
                }
                CellValue::Number(n) => {
                    match number_format {
                        Some(format) => worksheet.write_number_with_format(r, c, *n, format),
                        None => worksheet.write_number(r, c, *n),
                    }
                    .map_err(|e| {
                        format!("Failed to write cell {}: {}", cell_name(row, col), e)
                    })?;
                }
                CellValue::Bool(b) => {
                    worksheet.write_boolean(r, c, *b).map_err(|e| {
                        format!("Failed to write cell {}: {}", cell_name(row, col), e)
                    })?;
                }
                CellValue::Error(literal) => {
                    // Error values export as literal text, not live errors
                    worksheet.write_string(r, c, literal).map_err(|e| {
                        format!("Failed to write cell {}: {}", cell_name(row, col), e)
                    })?;
                }
            }
            result.cells_exported += 1;
        }

        result.sheets_exported += 1;
    }

    xlsx.save(path)
        .map_err(|e| format!("Failed to save Excel file: {}", e))?;

    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_import_result_summary() {
        let result = ImportResult {
            sheets_imported: 1,
            cells_imported: 100,
            ..Default::default()
        };
        assert_eq!(result.summary(), "1 sheet · 100 cells");

        let result = ImportResult {
            sheets_imported: 3,
            cells_imported: 100,
            formulas_imported: 25,
            ..Default::default()
        };
        assert_eq!(result.summary(), "3 sheets · 100 cells · 25 formulas");
    }

    #[test]
    fn test_import_result_warnings_only_actionable() {
        let result = ImportResult::default();
        assert!(!result.has_warnings());
        assert!(result.warning_summary().is_none());

        let result = ImportResult {
            truncated: true,
            ..Default::default()
        };
        assert!(result.has_warnings());
        assert!(result.warning_summary().unwrap().contains("truncated"));

        let result = ImportResult {
            error_cells: 2,
            ..Default::default()
        };
        assert!(result.warning_summary().unwrap().contains("error values"));
    }

    #[test]
    fn test_export_result_summary() {
        let result = ExportResult {
            sheets_exported: 2,
            cells_exported: 58,
            formulas_exported: 3,
        };
        assert_eq!(result.summary(), "2 sheets · 58 cells · 3 formulas");
    }

    #[test]
    fn test_classify_serial() {
        assert_eq!(classify_serial(45000.0), NumberFormat::Date);
        assert_eq!(classify_serial(0.5), NumberFormat::Time);
        assert_eq!(classify_serial(45000.75), NumberFormat::DateTime);
    }

    #[test]
    fn test_error_literals_match_excel() {
        assert_eq!(error_literal(&CellErrorType::Div0), "#DIV/0!");
        assert_eq!(error_literal(&CellErrorType::NA), "#N/A");
        assert_eq!(error_literal(&CellErrorType::Ref), "#REF!");
    }

    #[test]
    fn test_import_missing_file() {
        let err = import(Path::new("/nonexistent/report.xlsx")).unwrap_err();
        assert!(err.contains("Failed to open"), "got: {err}");
    }

    #[test]
    fn test_export_empty_workbook_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.xlsx");
        let err = export(&Workbook::new(), &path).unwrap_err();
        assert!(err.contains("no sheets"), "got: {err}");
    }

    #[test]
    fn test_round_trip_values_and_formulas() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("round_trip.xlsx");

        let mut sheet = Sheet::new("Jun25_Primary");
        sheet.set_text(3, 2, "For services November 1, 2024 through June 30, 2025");
        sheet.set_number(7, 4, 1234.5);
        sheet.set(7, 5, CellValue::Bool(true));
        sheet.set_formula(7, 15, "=I7/8*12");
        let mut wb = Workbook::new();
        wb.add_sheet(sheet);

        let exported = export(&wb, &path).unwrap();
        assert_eq!(exported.sheets_exported, 1);
        assert_eq!(exported.formulas_exported, 1);

        let (imported, stats) = import(&path).unwrap();
        assert_eq!(stats.sheets_imported, 1);
        assert_eq!(imported.sheet_names(), vec!["Jun25_Primary"]);

        let sheet = imported.sheet_by_name("Jun25_Primary").unwrap();
        assert_eq!(
            sheet.value(3, 2),
            &CellValue::Text("For services November 1, 2024 through June 30, 2025".into())
        );
        assert_eq!(sheet.value(7, 4), &CellValue::Number(1234.5));
        assert_eq!(sheet.value(7, 5), &CellValue::Bool(true));
        assert_eq!(sheet.formula(7, 15), Some("=I7/8*12"));
    }

    #[test]
    fn test_import_keeps_cached_value_of_formula_cells() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("computed.xlsx");

        // A computed total column the way a spreadsheet-made extract has
        // one. The writer stores 0 as the formula result, and that stored
        // result must come back as the cell's value with the source text
        // alongside it, never in place of it.
        let mut sheet = Sheet::new("Sheet1");
        sheet.set_text(6, 1, "Smith, John");
        for i in 0..8 {
            sheet.set_number(6, 2 + i, 10.0 + i as f64);
        }
        sheet.set_formula(6, 10, "=SUM(B6:I6)");
        let mut wb = Workbook::new();
        wb.add_sheet(sheet);

        export(&wb, &path).unwrap();
        let (imported, stats) = import(&path).unwrap();

        let sheet = imported.sheet_by_name("Sheet1").unwrap();
        assert_eq!(sheet.value(6, 10), &CellValue::Number(0.0));
        assert_eq!(sheet.formula(6, 10), Some("=SUM(B6:I6)"));
        assert_eq!(sheet.value(6, 2), &CellValue::Number(10.0));
        assert_eq!(stats.formulas_imported, 1);
    }

    #[test]
    fn test_round_trip_date_format() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("dates.xlsx");

        let mut sheet = Sheet::new("Sheet1");
        sheet.set_number(2, 1, 45_108.0); // 2023-07-01
        sheet.set_format(2, 1, NumberFormat::Date);
        let mut wb = Workbook::new();
        wb.add_sheet(sheet);

        export(&wb, &path).unwrap();
        let (imported, stats) = import(&path).unwrap();

        let sheet = imported.sheet_by_name("Sheet1").unwrap();
        assert_eq!(sheet.value(2, 1), &CellValue::Number(45_108.0));
        assert_eq!(sheet.format(2, 1), NumberFormat::Date);
        assert_eq!(stats.dates_imported, 1);
    }

    #[test]
    fn test_error_cells_export_as_text() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("errors.xlsx");

        let mut sheet = Sheet::new("Sheet1");
        sheet.set(5, 8, CellValue::Error("#DIV/0!".to_string()));
        let mut wb = Workbook::new();
        wb.add_sheet(sheet);

        export(&wb, &path).unwrap();
        let (imported, _) = import(&path).unwrap();

        // Literal text on the way out, so it reads back as text
        let sheet = imported.sheet_by_name("Sheet1").unwrap();
        assert_eq!(sheet.value(5, 8), &CellValue::Text("#DIV/0!".into()));
    }

    #[test]
    fn test_multi_sheet_order_preserved() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("multi.xlsx");

        let mut wb = Workbook::new();
        for name in ["Jun25_Primary", "Jun25_PSA", "Jun25_MISC"] {
            let mut sheet = Sheet::new(name);
            sheet.set_text(1, 1, name);
            wb.add_sheet(sheet);
        }

        export(&wb, &path).unwrap();
        let (imported, _) = import(&path).unwrap();
        assert_eq!(
            imported.sheet_names(),
            vec!["Jun25_Primary", "Jun25_PSA", "Jun25_MISC"]
        );
    }
}
