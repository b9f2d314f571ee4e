use std::collections::HashMap;

use crate::cell::{Cell, CellValue, NumberFormat};

static EMPTY: CellValue = CellValue::Empty;

/// A single worksheet: a sparse grid of cells addressed (row, col), 1-based.
///
/// Only cells that carry a value or a format are stored. A cell that exists
/// with an empty value still counts toward the used range, which matches how
/// the source files report their dimensions: a formatted-but-blank row is
/// part of the sheet.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    cells: HashMap<(usize, usize), Cell>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Sheet {
            name: name.into(),
            cells: HashMap::new(),
        }
    }

    /// Set a cell's value, preserving any format already on the cell. A
    /// plain value write replaces a formula. Writing `Empty` over an
    /// unformatted cell removes it entirely.
    pub fn set(&mut self, row: usize, col: usize, value: CellValue) {
        let cell = self.cells.entry((row, col)).or_default();
        cell.value = value;
        cell.formula = None;
        if cell.is_default() {
            self.cells.remove(&(row, col));
        }
    }

    pub fn set_text(&mut self, row: usize, col: usize, text: impl Into<String>) {
        self.set(row, col, CellValue::Text(text.into()));
    }

    pub fn set_number(&mut self, row: usize, col: usize, n: f64) {
        self.set(row, col, CellValue::Number(n));
    }

    /// Attach a formula to a cell, keeping whatever cached value is there.
    /// The importer pairs this with its value pass so a computed cell keeps
    /// both halves; a freshly written formula simply has no value yet.
    pub fn set_formula(&mut self, row: usize, col: usize, source: impl Into<String>) {
        let cell = self.cells.entry((row, col)).or_default();
        cell.formula = Some(source.into());
    }

    pub fn set_format(&mut self, row: usize, col: usize, format: NumberFormat) {
        let cell = self.cells.entry((row, col)).or_default();
        cell.format = format;
        if cell.is_default() {
            self.cells.remove(&(row, col));
        }
    }

    pub fn value(&self, row: usize, col: usize) -> &CellValue {
        self.cells
            .get(&(row, col))
            .map(|c| &c.value)
            .unwrap_or(&EMPTY)
    }

    pub fn formula(&self, row: usize, col: usize) -> Option<&str> {
        self.cells
            .get(&(row, col))
            .and_then(|c| c.formula.as_deref())
    }

    pub fn format(&self, row: usize, col: usize) -> NumberFormat {
        self.cells
            .get(&(row, col))
            .map(|c| c.format)
            .unwrap_or_default()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&Cell> {
        self.cells.get(&(row, col))
    }

    /// Clear the value and any formula but keep the format, so the cell
    /// stays typed (and stays part of the used range) for the next fill.
    pub fn clear_value(&mut self, row: usize, col: usize) {
        if let Some(cell) = self.cells.get_mut(&(row, col)) {
            cell.value = CellValue::Empty;
            cell.formula = None;
            if cell.is_default() {
                self.cells.remove(&(row, col));
            }
        }
    }

    /// Highest 1-based row with any stored cell, 0 for a blank sheet.
    pub fn last_row(&self) -> usize {
        self.cells.keys().map(|&(r, _)| r).max().unwrap_or(0)
    }

    /// Highest 1-based column with any stored cell, 0 for a blank sheet.
    pub fn last_col(&self) -> usize {
        self.cells.keys().map(|&(_, c)| c).max().unwrap_or(0)
    }

    /// All stored cells in arbitrary order. Callers that need row-major
    /// order (export, printing) sort the keys themselves.
    pub fn cells(&self) -> impl Iterator<Item = (&(usize, usize), &Cell)> {
        self.cells.iter()
    }

    pub fn non_empty_count(&self) -> usize {
        self.cells
            .values()
            .filter(|c| !c.value.is_empty() || c.formula.is_some())
            .count()
    }
}

// ---------------------------------------------------------------------------
