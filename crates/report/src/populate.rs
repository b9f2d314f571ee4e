use std::fmt;

use serde::Serialize;

use rollfwd_grid::{addr, CellValue, Workbook};

use crate::merge::{Section, SectionTables};
use crate::normalize::provider_key;
use crate::summary::FIRST_VALUE_COL;

// Target sheet layout: providers walk down column B from row 7, the nine
// metrics land in D..L, the annualization formula in O.
const DATA_FIRST_ROW: usize = 7;
const WALK_COL: usize = 2;
const TARGET_FIRST_COL: usize = 4;
const FORMULA_COL: usize = 15;

/// One diagnostic line for the unmatched report. `issue` is "No match" for
/// a provider absent from the section table, or a [`CellCopyError`] message
/// for a matched row whose source data could not be copied cleanly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnmatchedRecord {
    pub provider: String,
    pub section: Section,
    pub issue: String,
}

/// Why a single cell copy failed. The index is the 0-based position within
/// the row's nine values; messages name the source column (B..J) it maps to.
#[derive(Debug, Clone, PartialEq)]
pub enum CellCopyError {
    MissingValue { index: usize },
    SourceError { index: usize, literal: String },
}

impl CellCopyError {
    fn source_column(&self) -> String {
        let index = match self {
            CellCopyError::MissingValue { index } => *index,
            CellCopyError::SourceError { index, .. } => *index,
        };
        addr::column_letter(FIRST_VALUE_COL + index)
    }
}

impl fmt::Display for CellCopyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellCopyError::MissingValue { .. } => {
                write!(f, "no value in summary column {}", self.source_column())
            }
            CellCopyError::SourceError { literal, .. } => {
                write!(
                    f,
                    "summary column {} carries error {literal}",
                    self.source_column()
                )
            }
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PopulateOutcome {
    /// Provider rows walked across all present target sheets.
    pub rows_visited: usize,
    /// Rows whose provider key was found in the section table. A matched
    /// row can still record cell-level issues.
    pub rows_matched: usize,
    /// Target sheets that were not in the workbook.
    pub missing_sheets: Vec<String>,
    pub unmatched: Vec<UnmatchedRecord>,
}

impl PopulateOutcome {
    pub fn has_unmatched(&self) -> bool {
        !self.unmatched.is_empty()
    }

    pub fn summary(&self) -> String {
        let mut s = format!(
            "matched {} of {} provider row(s)",
            self.rows_matched, self.rows_visited
        );
        if !self.missing_sheets.is_empty() {
            s.push_str(&format!(
                ", {} target sheet(s) missing",
                self.missing_sheets.len()
            ));
        }
        if !self.unmatched.is_empty() {
            s.push_str(&format!(", {} issue(s) recorded", self.unmatched.len()));
        }
        s
    }
}

/// Fill the scaffolded month sheets from the merged section tables.
///
/// Walks each section's target sheet down column B from row 7 to the first
/// empty cell. A matched provider gets the row's nine values copied into
/// D..L; a fully clean copy also gets `=I{row}/{divisor}*12` in column O.
/// Blank or error-valued source cells are recorded per cell and leave their
/// target cell empty, and any such issue withholds the row's formula so a
/// half-filled row never annualizes silently.
///
/// Data-level problems never abort the run; every row of every present
/// sheet is processed and the outcome carries the full diagnostic list.
pub fn populate_report(
    workbook: &mut Workbook,
    sections: &SectionTables,
    month_code: &str,
    divisor: u32,
) -> PopulateOutcome {
    let mut outcome = PopulateOutcome::default();

    for section in Section::ALL {
        let sheet_name = section.sheet_name(month_code);
        let Some(sheet) = workbook.sheet_by_name_mut(&sheet_name) else {
            outcome.missing_sheets.push(sheet_name);
            continue;
        };
        let table = sections.table(section);

        let mut row = DATA_FIRST_ROW;
        loop {
            let provider_cell = sheet.value(row, WALK_COL).clone();
            if provider_cell.is_empty() {
                break;
            }
            outcome.rows_visited += 1;
            let provider = provider_cell.display_string();
            let key = provider_key(&provider_cell);

            match table.get(&key) {
                Some(summary_row) => {
                    outcome.rows_matched += 1;
                    let mut clean = true;
                    for (i, value) in summary_row.values.iter().enumerate() {
                        let issue = match value {
                            CellValue::Empty => Some(CellCopyError::MissingValue { index: i }),
                            CellValue::Error(literal) => Some(CellCopyError::SourceError {
                                index: i,
                                literal: literal.clone(),
                            }),
                            other => {
                                sheet.set(row, TARGET_FIRST_COL + i, other.clone());
                                None
                            }
                        };
                        if let Some(err) = issue {
                            clean = false;
                            outcome.unmatched.push(UnmatchedRecord {
                                provider: provider.clone(),
                                section,
                                issue: err.to_string(),
                            });
                        }
                    }
                    if clean {
                        sheet.set_formula(row, FORMULA_COL, format!("=I{row}/{divisor}*12"));
                    }
                }
                None => outcome.unmatched.push(UnmatchedRecord {
                    provider,
                    section,
                    issue: "No match".to_string(),
                }),
            }
            row += 1;
        }
    }

    outcome
}

// ---------------------------------------------------------------------------
