use std::fmt;

use serde::Serialize;

use rollfwd_grid::Workbook;

use crate::fiscal::FiscalInfo;

// Fixed template layout. Provider rows start at row 7; the monthly metrics
// live in columns D..L. Header cells B3/D6/E6/I6/J6 carry the fiscal labels.
const DATA_FIRST_ROW: usize = 7;
const CLEAR_FIRST_COL: usize = 4;
const CLEAR_LAST_COL: usize = 12;

#[derive(Debug, Clone, Default, Serialize)]
pub struct DuplicateOutcome {
    /// New sheet names, in creation order.
    pub created: Vec<String>,
    pub skipped: Vec<SkippedTemplate>,
}

impl DuplicateOutcome {
    pub fn summary(&self) -> String {
        if self.skipped.is_empty() {
            format!("created {} sheet(s)", self.created.len())
        } else {
            format!(
                "created {} sheet(s), skipped {}",
                self.created.len(),
                self.skipped.len()
            )
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SkippedTemplate {
    pub template: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The target name is already taken; the existing sheet stays untouched.
    AlreadyExists { name: String },
    /// The template sheet is not in the workbook.
    TemplateMissing,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::AlreadyExists { name } => {
                write!(f, "sheet '{name}' already exists")
            }
            SkipReason::TemplateMissing => write!(f, "template not found in workbook"),
        }
    }
}

/// Section suffix of a template name: the part after the last `_`, or the
/// whole name when there is none ("April25_Primary" -> "Primary").
fn section_of(template: &str) -> &str {
    match template.rsplit_once('_') {
        Some((_, tail)) => tail,
        None => template,
    }
}

/// Duplicate each template sheet under the new month code.
///
/// The copy keeps the template's layout and formats, loses the old month's
/// data (values cleared in rows 7 down, columns D..L) and gets the fiscal
/// labels stamped into its header cells. Collisions and missing templates
/// are recorded and skipped; one bad entry never fails the batch.
pub fn duplicate_sheets(
    workbook: &mut Workbook,
    templates: &[String],
    month_code: &str,
    fiscal: &FiscalInfo,
) -> DuplicateOutcome {
    let mut outcome = DuplicateOutcome::default();

    for template in templates {
        let new_name = format!("{month_code}_{}", section_of(template));
        if workbook.sheet_name_exists(&new_name) {
            outcome.skipped.push(SkippedTemplate {
                template: template.clone(),
                reason: SkipReason::AlreadyExists { name: new_name },
            });
            continue;
        }
        let Some(source) = workbook.sheet_by_name(template) else {
            outcome.skipped.push(SkippedTemplate {
                template: template.clone(),
                reason: SkipReason::TemplateMissing,
            });
            continue;
        };

        let mut sheet = source.clone();
        sheet.name = new_name.clone();

        for row in DATA_FIRST_ROW..=sheet.last_row() {
            for col in CLEAR_FIRST_COL..=CLEAR_LAST_COL {
                sheet.clear_value(row, col);
            }
        }

        sheet.set_text(3, 2, fiscal.header_label.clone());
        sheet.set_text(6, 4, fiscal.fy_current_label.clone());
        sheet.set_text(6, 5, fiscal.fy_prior_label.clone());
        sheet.set_text(6, 9, fiscal.ytd_label.clone());
        sheet.set_text(6, 10, fiscal.ytp_label.clone());

        if workbook.add_sheet(sheet).is_some() {
            outcome.created.push(new_name);
        }
    }

    outcome
}

// ---------------------------------------------------------------------------
