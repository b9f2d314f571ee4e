// Full roll forward in memory: scaffold the new month's sheets from
// templates, load and merge the four summary extracts, populate, and check
// the finished workbook plus diagnostics.

use rollfwd_grid::{CellValue, Sheet, Workbook};
use rollfwd_report::{
    duplicate_sheets, merge_sections, populate_report, FiscalInfo, Month, SummaryTable,
};

// ---------------------------------------------------------------------------
// Builders
// ---------------------------------------------------------------------------

/// Template sheet the way a real workbook carries one: header block on top,
/// provider roster in column B, last month's metrics in D..L.
fn template(name: &str, providers: &[&str]) -> Sheet {
    let mut sheet = Sheet::new(name);
    sheet.set_text(3, 2, "For services November 1, 2024 through April 30, 2025");
    sheet.set_text(6, 2, "Provider");
    sheet.set_text(6, 4, "2025, April");
    sheet.set_text(6, 9, "YTD April 2025");
    for (i, provider) in providers.iter().enumerate() {
        let row = 7 + i;
        sheet.set_text(row, 2, *provider);
        sheet.set_text(row, 3, "Clinic");
        for col in 4..=12 {
            sheet.set_number(row, col, 999.0);
        }
        sheet.set_text(row, 14, "carried note");
    }
    sheet
}

/// Summary extract: four banner rows, a header row, provider rows from
/// row 6 with nine ascending values starting at `base`.
fn extract(rows: &[(&str, f64)]) -> Sheet {
    let mut sheet = Sheet::new("Sheet1");
    sheet.set_text(1, 1, "Production Summary");
    sheet.set_text(5, 1, "Provider");
    sheet.set_text(5, 2, "Metric1");
    for (i, (provider, base)) in rows.iter().enumerate() {
        let row = 6 + i;
        sheet.set_text(row, 1, *provider);
        for j in 0..9 {
            sheet.set_number(row, 2 + j, base + j as f64);
        }
    }
    sheet
}

fn formula(sheet: &Sheet, row: usize) -> Option<&str> {
    sheet.formula(row, 15)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn test_full_roll_forward() {
    let mut workbook = Workbook::from_sheets(vec![
        template("April25_Primary", &["Smith, John", "Doe, Jane", "Patel, Ana"]),
        template("April25_PSA", &["Garcia, Luis"]),
        template("April25_MISC", &["Wong, Mei"]),
    ]);

    let fiscal = FiscalInfo::compute(Month::June, 2025).unwrap();
    let scaffold = duplicate_sheets(
        &mut workbook,
        &[
            "April25_Primary".to_string(),
            "April25_PSA".to_string(),
            "April25_MISC".to_string(),
        ],
        "Jun25",
        &fiscal,
    );
    assert_eq!(
        scaffold.created,
        vec!["Jun25_Primary", "Jun25_PSA", "Jun25_MISC"]
    );
    assert!(scaffold.skipped.is_empty());

    // APP overlaps MISC on Wong; the APP row must win in the MISC table.
    let app = SummaryTable::from_sheet(
        "APP",
        &extract(&[("SMITH, JOHN ", 10.0), ("Wong, Mei", 100.0)]),
    )
    .unwrap();
    let clp = SummaryTable::from_sheet("CLP", &extract(&[("Doe,\u{00A0}Jane", 20.0)])).unwrap();
    let misc = SummaryTable::from_sheet("MISC", &extract(&[("Wong, Mei", 300.0)])).unwrap();
    let psa = SummaryTable::from_sheet("PSA", &extract(&[("Garcia, Luis", 40.0)])).unwrap();
    let sections = merge_sections(&app, &clp, &misc, &psa);

    let outcome = populate_report(&mut workbook, &sections, "Jun25", fiscal.divisor);
    assert_eq!(outcome.rows_visited, 5);
    assert_eq!(outcome.rows_matched, 4);
    assert!(outcome.missing_sheets.is_empty());
    assert_eq!(outcome.unmatched.len(), 1);
    assert_eq!(outcome.unmatched[0].provider, "Patel, Ana");
    assert_eq!(outcome.unmatched[0].issue, "No match");

    let primary = workbook.sheet_by_name("Jun25_Primary").unwrap();
    // Stamped header, populated metrics, annualization formulas.
    assert_eq!(
        *primary.value(3, 2),
        CellValue::Text("For services November 1, 2024 through June 30, 2025".into())
    );
    assert_eq!(*primary.value(7, 4), CellValue::Number(10.0));
    assert_eq!(*primary.value(7, 12), CellValue::Number(18.0));
    assert_eq!(*primary.value(8, 4), CellValue::Number(20.0));
    assert_eq!(formula(primary, 7), Some("=I7/8*12"));
    assert_eq!(formula(primary, 8), Some("=I8/8*12"));
    // Patel's row stays cleared with no formula.
    assert!(primary.value(9, 4).is_empty());
    assert!(formula(primary, 9).is_none());
    // Roster and notes columns survive untouched.
    assert_eq!(*primary.value(7, 2), CellValue::Text("Smith, John".into()));
    assert_eq!(*primary.value(7, 14), CellValue::Text("carried note".into()));

    let psa_sheet = workbook.sheet_by_name("Jun25_PSA").unwrap();
    assert_eq!(*psa_sheet.value(7, 4), CellValue::Number(40.0));

    // Wong matched through the APP overlay, not the MISC original.
    let misc_sheet = workbook.sheet_by_name("Jun25_MISC").unwrap();
    assert_eq!(*misc_sheet.value(7, 4), CellValue::Number(100.0));

    // The April templates still hold April data.
    let april = workbook.sheet_by_name("April25_Primary").unwrap();
    assert_eq!(*april.value(7, 4), CellValue::Number(999.0));
    assert!(formula(april, 7).is_none());
}

#[test]
fn test_scaffold_is_rerunnable() {
    let mut workbook = Workbook::from_sheets(vec![template("April25_Primary", &["Smith"])]);
    let fiscal = FiscalInfo::compute(Month::June, 2025).unwrap();
    let templates = vec!["April25_Primary".to_string()];

    let first = duplicate_sheets(&mut workbook, &templates, "Jun25", &fiscal);
    assert_eq!(first.created, vec!["Jun25_Primary"]);

    let second = duplicate_sheets(&mut workbook, &templates, "Jun25", &fiscal);
    assert!(second.created.is_empty());
    assert_eq!(second.skipped.len(), 1);
    assert_eq!(workbook.sheet_count(), 2);
}
