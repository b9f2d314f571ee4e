// Populate - fill a month's sheets from the four summary workbooks
//
// The second half of the month-end routine. All four summaries are loaded
// and validated before the target workbook is touched, so a bad source
// never leaves a half-filled output behind.

use std::path::{Path, PathBuf};

use serde_json::json;

use rollfwd_io::diagnostics;
use rollfwd_report::{merge_sections, populate_report, PopulateJob, SummaryTable};

use crate::exit_codes::EXIT_UNMATCHED;
use crate::util;
use crate::CliError;

#[allow(clippy::too_many_arguments)]
pub fn cmd_populate(
    workbook: Option<PathBuf>,
    app: Option<PathBuf>,
    clp: Option<PathBuf>,
    misc: Option<PathBuf>,
    psa: Option<PathBuf>,
    month_code: Option<String>,
    divisor: Option<u32>,
    month: Option<String>,
    year: Option<i32>,
    output: Option<PathBuf>,
    unmatched: Option<PathBuf>,
    config: Option<PathBuf>,
    json_output: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let mut job = match &config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .map_err(|e| CliError::io(format!("cannot read config {}: {e}", path.display())))?;
            let mut job = PopulateJob::parse(&text).map_err(CliError::report)?;
            rebase_job(&mut job, path.parent().unwrap_or(Path::new(".")));
            job
        }
        None => PopulateJob::default(),
    };

    // Command-line flags win over the config file
    if let Some(p) = workbook {
        job.workbook = path_string(p);
    }
    if let Some(p) = app {
        job.sources.app = path_string(p);
    }
    if let Some(p) = clp {
        job.sources.clp = path_string(p);
    }
    if let Some(p) = misc {
        job.sources.misc = path_string(p);
    }
    if let Some(p) = psa {
        job.sources.psa = path_string(p);
    }
    if let Some(code) = month_code {
        job.month_code = code;
    }
    if divisor.is_some() {
        job.divisor = divisor;
    }
    if month.is_some() {
        job.month = month;
    }
    if year.is_some() {
        job.year = year;
    }
    if let Some(p) = output {
        job.output = Some(path_string(p));
    }
    if let Some(p) = unmatched {
        job.unmatched = Some(path_string(p));
    }

    job.validate().map_err(CliError::report)?;
    let divisor = job.resolved_divisor().map_err(CliError::report)?;

    // Fail fast: every summary loads and validates before the target is read
    let app_table = load_summary("APP", &job.sources.app)?;
    let clp_table = load_summary("CLP", &job.sources.clp)?;
    let misc_table = load_summary("MISC", &job.sources.misc)?;
    let psa_table = load_summary("PSA", &job.sources.psa)?;
    let sections = merge_sections(&app_table, &clp_table, &misc_table, &psa_table);

    let (mut target, _) = util::load_workbook(Path::new(&job.workbook))?;
    let outcome = populate_report(&mut target, &sections, &job.month_code, divisor);

    for name in &outcome.missing_sheets {
        eprintln!("warning: sheet '{}' not found in {}", name, job.workbook);
    }

    let output_path = job
        .output
        .clone()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(format!("Populated_{}.xlsx", job.month_code)));
    let stats = util::save_workbook(&target, &output_path)?;

    // Diagnostics file: always when asked for, otherwise only when needed
    let unmatched_path = match (&job.unmatched, outcome.has_unmatched()) {
        (Some(path), _) => Some(PathBuf::from(path)),
        (None, true) => {
            Some(output_path.with_file_name(format!("Unmatched_{}.csv", job.month_code)))
        }
        (None, false) => None,
    };
    if let Some(path) = &unmatched_path {
        diagnostics::write_unmatched(&outcome.unmatched, path)
            .map_err(|e| CliError::io(format!("{}: {}", path.display(), e)))?;
    }

    if json_output {
        util::print_json(&json!({
            "month_code": job.month_code,
            "divisor": divisor,
            "rows_visited": outcome.rows_visited,
            "rows_matched": outcome.rows_matched,
            "missing_sheets": outcome.missing_sheets,
            "unmatched": outcome.unmatched,
            "output": output_path,
            "unmatched_file": unmatched_path,
        }))?;
    }
    if !quiet {
        eprintln!("{}", outcome.summary());
        eprintln!("wrote {} ({})", output_path.display(), stats.summary());
        if outcome.has_unmatched() {
            if let Some(path) = &unmatched_path {
                eprintln!("wrote {}", path.display());
            }
        }
    }

    if outcome.has_unmatched() {
        return Err(CliError {
            code: EXIT_UNMATCHED,
            message: format!(
                "{} unmatched provider(s) recorded",
                outcome.unmatched.len()
            ),
            hint: unmatched_path
                .as_ref()
                .map(|p| format!("see {}", p.display())),
        });
    }
    Ok(())
}

fn load_summary(label: &str, path: &str) -> Result<SummaryTable, CliError> {
    let (workbook, _) = util::load_workbook(Path::new(path))?;
    // Summary workbooks read through their first sheet
    let sheet = workbook
        .first_sheet()
        .ok_or_else(|| CliError::io(format!("{label} summary has no sheets")))?;
    SummaryTable::from_sheet(label, sheet).map_err(CliError::report)
}

fn path_string(path: PathBuf) -> String {
    path.display().to_string()
}

/// Paths in a job file are relative to the file, not the working directory.
fn rebase_job(job: &mut PopulateJob, base: &Path) {
    for field in [
        &mut job.workbook,
        &mut job.sources.app,
        &mut job.sources.clp,
        &mut job.sources.misc,
        &mut job.sources.psa,
    ] {
        rebase(field, base);
    }
    if let Some(output) = &mut job.output {
        rebase(output, base);
    }
    if let Some(unmatched) = &mut job.unmatched {
        rebase(unmatched, base);
    }
}

fn rebase(path: &mut String, base: &Path) {
    if path.is_empty() || Path::new(path.as_str()).is_absolute() {
        return;
    }
    *path = base.join(path.as_str()).display().to_string();
}
