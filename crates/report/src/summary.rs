use std::collections::HashMap;

use rollfwd_grid::{CellValue, Sheet};

use crate::error::ReportError;
use crate::normalize::provider_key;

// Fixed source layout: four banner rows, a header row, then data. Only
// columns A..J matter; A names the provider and B..J carry the metrics.
pub const DATA_START_ROW: usize = 6;
pub const PROVIDER_COL: usize = 1;
pub const FIRST_VALUE_COL: usize = 2;
pub const VALUE_COUNT: usize = 9;

/// One provider's metrics as loaded from a summary extract.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryRow {
    /// Provider exactly as the source spelled it.
    pub provider: String,
    /// Columns B..J, positionally. Blanks stay `Empty`.
    pub values: [CellValue; VALUE_COUNT],
}

/// Lookup table from normalized provider key to summary row.
///
/// Keeps insertion order for iteration and reporting. When two rows share a
/// key, the first occurrence fixes the position and the last occurrence
/// supplies the row, so re-loading the same sheet always rebuilds an
/// identical table.
#[derive(Debug, Clone)]
pub struct SummaryTable {
    label: String,
    entries: Vec<(String, SummaryRow)>,
    index: HashMap<String, usize>,
}

impl SummaryTable {
    pub(crate) fn with_label(label: impl Into<String>) -> Self {
        SummaryTable {
            label: label.into(),
            entries: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Load a summary sheet (the first sheet of an uploaded extract).
    ///
    /// Rows whose provider key normalizes to `""` are dropped, matching how
    /// the extracts pad their tail with subtotal and blank rows. A sheet
    /// whose used range cannot hold a provider plus at least one value, or
    /// that yields no keyed rows at all, is rejected outright: an unkeyable
    /// summary hides upstream breakage better than any downstream warning
    /// could surface it.
    pub fn from_sheet(label: impl Into<String>, sheet: &Sheet) -> Result<Self, ReportError> {
        let label = label.into();
        let last_col = sheet.last_col();
        if last_col < FIRST_VALUE_COL {
            return Err(ReportError::MalformedSource {
                label,
                detail: format!(
                    "used range has {last_col} column(s), need a provider column plus at least one value column"
                ),
            });
        }

        let mut table = SummaryTable::with_label(label);
        for row in DATA_START_ROW..=sheet.last_row() {
            let key = provider_key(sheet.value(row, PROVIDER_COL));
            if key.is_empty() {
                continue;
            }
            let provider = sheet.value(row, PROVIDER_COL).display_string();
            let values = std::array::from_fn(|i| sheet.value(row, FIRST_VALUE_COL + i).clone());
            table.insert(key, SummaryRow { provider, values });
        }

        if table.entries.is_empty() {
            return Err(ReportError::MalformedSource {
                label: table.label,
                detail: format!("no provider rows found below row {}", DATA_START_ROW - 1),
            });
        }
        Ok(table)
    }

    /// Insert with last-write-wins semantics on the key.
    pub(crate) fn insert(&mut self, key: String, row: SummaryRow) {
        if let Some(&i) = self.index.get(&key) {
            self.entries[i].1 = row;
        } else {
            self.index.insert(key.clone(), self.entries.len());
            self.entries.push((key, row));
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&SummaryRow> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// (key, row) pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SummaryRow)> {
        self.entries.iter().map(|(k, r)| (k.as_str(), r))
    }
}

// ---------------------------------------------------------------------------
