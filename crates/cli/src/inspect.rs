// Workbook inspection - sheet listing and single-cell lookup

use std::path::{Path, PathBuf};

use serde_json::json;

use rollfwd_grid::addr::{cell_name, parse_cell_name};
use rollfwd_grid::{CellValue, NumberFormat, Sheet, Workbook};

use crate::util;
use crate::CliError;

pub fn cmd_inspect(
    file: PathBuf,
    cell: Option<String>,
    sheet: Option<String>,
    json_output: bool,
) -> Result<(), CliError> {
    let (workbook, _) = util::load_workbook(&file)?;

    match cell {
        Some(cell) => inspect_cell(&workbook, &cell, sheet.as_deref(), json_output),
        None => list_sheets(&workbook, &file, json_output),
    }
}

/// Selector is a sheet name, or a zero-based index for scripts.
fn select_sheet<'a>(workbook: &'a Workbook, selector: Option<&str>) -> Result<&'a Sheet, CliError> {
    match selector {
        None => workbook
            .first_sheet()
            .ok_or_else(|| CliError::usage("workbook has no sheets")),
        Some(sel) => {
            if let Ok(index) = sel.parse::<usize>() {
                workbook
                    .sheet(index)
                    .ok_or_else(|| CliError::usage(format!("no sheet at index {index}")))
            } else {
                workbook
                    .sheet_by_name(sel)
                    .ok_or_else(|| CliError::usage(format!("no sheet named '{sel}'")))
            }
        }
    }
}

fn inspect_cell(
    workbook: &Workbook,
    cell: &str,
    selector: Option<&str>,
    json_output: bool,
) -> Result<(), CliError> {
    let sheet = select_sheet(workbook, selector)?;
    let (row, col) = parse_cell_name(cell)
        .ok_or_else(|| CliError::usage(format!("invalid cell reference '{cell}'")))?;

    let value = sheet.value(row, col);
    let formula = sheet.formula(row, col);
    let format = sheet.format(row, col);

    if json_output {
        return util::print_json(&json!({
            "sheet": sheet.name,
            "cell": cell_name(row, col),
            "value": value.display_string(),
            "value_type": value_type(value),
            "formula": formula,
            "format": format_name(format),
        }));
    }

    match formula {
        Some(source) => println!(
            "{}!{} = {} ({}, formula {})",
            sheet.name,
            cell_name(row, col),
            value.display_string(),
            value_type(value),
            source
        ),
        None => println!(
            "{}!{} = {} ({})",
            sheet.name,
            cell_name(row, col),
            value.display_string(),
            value_type(value)
        ),
    }
    Ok(())
}

fn list_sheets(workbook: &Workbook, file: &Path, json_output: bool) -> Result<(), CliError> {
    if json_output {
        let entries: Vec<_> = workbook
            .sheets()
            .iter()
            .enumerate()
            .map(|(index, sheet)| {
                json!({
                    "index": index,
                    "name": sheet.name,
                    "used_range": used_range(sheet),
                    "non_empty_cells": sheet.non_empty_count(),
                })
            })
            .collect();
        return util::print_json(&serde_json::Value::Array(entries));
    }

    println!("{}: {} sheet(s)", file.display(), workbook.sheet_count());
    for (index, sheet) in workbook.sheets().iter().enumerate() {
        let extent = used_range(sheet).unwrap_or_else(|| "empty".to_string());
        println!(
            "  [{index}] {:<28} {:>12}  {} non-empty",
            sheet.name,
            extent,
            sheet.non_empty_count()
        );
    }
    Ok(())
}

fn used_range(sheet: &Sheet) -> Option<String> {
    let (rows, cols) = (sheet.last_row(), sheet.last_col());
    if rows == 0 || cols == 0 {
        None
    } else {
        Some(format!("A1:{}", cell_name(rows, cols)))
    }
}

fn value_type(value: &CellValue) -> &'static str {
    match value {
        CellValue::Empty => "empty",
        CellValue::Text(_) => "text",
        CellValue::Number(_) => "number",
        CellValue::Bool(_) => "bool",
        CellValue::Error(_) => "error",
    }
}

fn format_name(format: NumberFormat) -> &'static str {
    match format {
        NumberFormat::General => "general",
        NumberFormat::Date => "date",
        NumberFormat::Time => "time",
        NumberFormat::DateTime => "datetime",
    }
}
