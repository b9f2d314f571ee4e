// Scaffold - copy template sheets into a new month
//
// The first half of the month-end routine: each selected template is copied
// under the new month's name, its data block is cleared, and the fiscal
// labels are restamped. The source templates are never modified.

use std::path::PathBuf;

use serde_json::json;

use rollfwd_report::{duplicate_sheets, FiscalInfo, Month, SkipReason};

use crate::exit_codes::EXIT_USAGE;
use crate::util;
use crate::CliError;

#[allow(clippy::too_many_arguments)]
pub fn cmd_scaffold(
    workbook_path: PathBuf,
    templates: Vec<String>,
    month: String,
    year: i32,
    month_code: Option<String>,
    output: Option<PathBuf>,
    json_output: bool,
    quiet: bool,
) -> Result<(), CliError> {
    if templates.is_empty() {
        return Err(CliError::usage("at least one --template is required"));
    }

    let month: Month = month.parse().map_err(CliError::report)?;
    let fiscal = FiscalInfo::compute(month, year).map_err(CliError::report)?;
    let month_code = month_code.unwrap_or_else(|| fiscal.month_code());

    let (mut workbook, _) = util::load_workbook(&workbook_path)?;
    let outcome = duplicate_sheets(&mut workbook, &templates, &month_code, &fiscal);

    for skip in &outcome.skipped {
        eprintln!("warning: skipped '{}': {}", skip.template, skip.reason);
    }

    // Skipping existing month sheets is normal on a re-run; a run where no
    // template even existed is an operator error.
    let nothing_found = outcome.created.is_empty()
        && outcome
            .skipped
            .iter()
            .all(|s| matches!(s.reason, SkipReason::TemplateMissing));
    if nothing_found {
        return Err(CliError {
            code: EXIT_USAGE,
            message: "no sheets created: no template was found".to_string(),
            hint: Some(format!(
                "list sheet names with: rollfwd inspect {}",
                workbook_path.display()
            )),
        });
    }

    let output =
        output.unwrap_or_else(|| PathBuf::from(format!("Scaffolded_{}.xlsx", month_code)));
    let stats = util::save_workbook(&workbook, &output)?;

    if json_output {
        util::print_json(&json!({
            "month_code": month_code,
            "created": outcome.created,
            "skipped": outcome.skipped,
            "output": output,
        }))?;
    }
    if !quiet {
        eprintln!("{}", outcome.summary());
        eprintln!("wrote {} ({})", output.display(), stats.summary());
    }
    Ok(())
}
