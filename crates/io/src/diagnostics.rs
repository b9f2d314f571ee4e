// Unmatched-provider diagnostics files
//
// Populate records a row for every summary entry it could not place. These
// writers turn that list into a file an operator can work through by hand.

use std::path::Path;

use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook};

use rollfwd_report::UnmatchedRecord;

const HEADERS: [&str; 3] = ["Provider", "Section", "Issue"];

/// Write unmatched-provider records to `path`.
///
/// The extension picks the format: `.xlsx` gets a styled sheet, anything
/// else plain CSV with a header row. An empty record list still produces a
/// header-only file.
pub fn write_unmatched(records: &[UnmatchedRecord], path: &Path) -> Result<(), String> {
    let wants_xlsx = path
        .extension()
        .map(|ext| ext.eq_ignore_ascii_case("xlsx"))
        .unwrap_or(false);

    if wants_xlsx {
        write_xlsx(records, path)
    } else {
        write_csv(records, path)
    }
}

fn write_csv(records: &[UnmatchedRecord], path: &Path) -> Result<(), String> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|e| format!("Failed to create CSV file: {}", e))?;

    writer.write_record(HEADERS).map_err(|e| e.to_string())?;
    for record in records {
        writer
            .write_record([
                record.provider.as_str(),
                record.section.as_str(),
                record.issue.as_str(),
            ])
            .map_err(|e| e.to_string())?;
    }
    writer.flush().map_err(|e| e.to_string())?;
    Ok(())
}

fn write_xlsx(records: &[UnmatchedRecord], path: &Path) -> Result<(), String> {
    let mut workbook = XlsxWorkbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name("Unmatched")
        .map_err(|e| format!("Failed to name sheet: {}", e))?;

    let header_format = Format::new().set_bold();
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *header, &header_format)
            .map_err(|e| e.to_string())?;
    }
    // Provider names run long, issues longer
    worksheet.set_column_width(0, 32).map_err(|e| e.to_string())?;
    worksheet.set_column_width(1, 12).map_err(|e| e.to_string())?;
    worksheet.set_column_width(2, 48).map_err(|e| e.to_string())?;

    for (idx, record) in records.iter().enumerate() {
        let row = idx as u32 + 1;
        worksheet
            .write_string(row, 0, &record.provider)
            .map_err(|e| e.to_string())?;
        worksheet
            .write_string(row, 1, record.section.as_str())
            .map_err(|e| e.to_string())?;
        worksheet
            .write_string(row, 2, &record.issue)
            .map_err(|e| e.to_string())?;
    }

    workbook
        .save(path)
        .map_err(|e| format!("Failed to save Excel file: {}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    use rollfwd_grid::CellValue;
    use rollfwd_report::Section;

    fn sample_records() -> Vec<UnmatchedRecord> {
        vec![
            UnmatchedRecord {
                provider: "Dr. Patel".to_string(),
                section: Section::Primary,
                issue: "No match".to_string(),
            },
            UnmatchedRecord {
                provider: "Dr. Wong".to_string(),
                section: Section::Psa,
                issue: "no value in summary column E".to_string(),
            },
        ]
    }

    #[test]
    fn test_write_unmatched_csv() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("unmatched.csv");

        write_unmatched(&sample_records(), &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "Provider,Section,Issue");
        assert_eq!(lines[1], "Dr. Patel,Primary,No match");
        assert_eq!(lines[2], "Dr. Wong,PSA,no value in summary column E");
    }

    #[test]
    fn test_write_unmatched_empty_still_has_header() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        write_unmatched(&[], &path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content.trim_end(), "Provider,Section,Issue");
    }

    #[test]
    fn test_write_unmatched_xlsx() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("unmatched.xlsx");

        write_unmatched(&sample_records(), &path).unwrap();

        let (workbook, _) = crate::xlsx::import(&path).unwrap();
        let sheet = workbook.sheet_by_name("Unmatched").unwrap();
        assert_eq!(sheet.value(1, 1), &CellValue::Text("Provider".into()));
        assert_eq!(sheet.value(2, 1), &CellValue::Text("Dr. Patel".into()));
        assert_eq!(sheet.value(2, 2), &CellValue::Text("Primary".into()));
        assert_eq!(sheet.value(3, 3), &CellValue::Text("no value in summary column E".into()));
    }

    #[test]
    fn test_extension_case_insensitive() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("unmatched.XLSX");

        write_unmatched(&sample_records(), &path).unwrap();

        // Opens as a real xlsx, not CSV bytes with an xlsx name
        let (workbook, _) = crate::xlsx::import(&path).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["Unmatched"]);
    }
}
