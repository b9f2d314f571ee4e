// rollfwd CLI - monthly report roll-forward, headless
//
// Two-step month-end routine: `scaffold` copies the template sheets for a
// new month, `populate` fills them from the summary workbooks.

mod exit_codes;
mod fiscal;
mod inspect;
mod populate;
mod scaffold;
mod util;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use exit_codes::{report_exit_code, EXIT_IO, EXIT_SUCCESS, EXIT_USAGE};
use rollfwd_report::ReportError;

#[derive(Parser)]
#[command(name = "rollfwd")]
#[command(about = "Monthly report roll-forward - scaffold and populate Excel reports")]
#[command(long_version = long_version())]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy template sheets into a new month and restamp the fiscal labels
    #[command(after_help = "\
Each template is copied to {code}_{section}, the data block from row 7 down
(columns D through L) is cleared with formats left in place, and the date
labels in B3, D6, E6, I6, and J6 are restamped for the new month. Existing
month sheets are never overwritten, so re-runs are safe.

Examples:
  rollfwd scaffold FY25.xlsx -t Apr25_Primary -t Apr25_PSA --month june --year 2025
  rollfwd scaffold FY25.xlsx -t Apr25_Primary --month june --year 2025 -o June.xlsx
  rollfwd scaffold FY25.xlsx -t Apr25_Primary --month june --year 2025 --month-code Jun25B")]
    Scaffold {
        /// Workbook holding the template sheets
        workbook: PathBuf,

        /// Template sheet to copy (repeatable)
        #[arg(long, short = 't', value_name = "SHEET")]
        template: Vec<String>,

        /// Reporting month, e.g. "june" or "Jun"
        #[arg(long)]
        month: String,

        /// Reporting year, e.g. 2025
        #[arg(long)]
        year: i32,

        /// Sheet-name prefix for the new month (default: derived, e.g. "Jun25")
        #[arg(long, value_name = "CODE")]
        month_code: Option<String>,

        /// Output file (default: Scaffolded_{code}.xlsx)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Print a JSON summary to stdout
        #[arg(long)]
        json: bool,

        /// Suppress stderr notes
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Fill a month's sheets from the four summary workbooks
    #[command(after_help = "\
Loads the APP, CLP, MISC, and PSA summaries, merges them into the Primary,
PSA, and MISC section tables, then walks each {code}_{section} sheet's
provider column and fills columns D through L plus the annualization
formula in column O. Providers that cannot be placed are written to a
diagnostics file and the command exits 3; the populated workbook is still
written in that case.

All four summaries are loaded and validated before the target workbook is
touched.

Examples:
  rollfwd populate Scaffolded_Jun25.xlsx --month-code Jun25 --divisor 8 \\
      --app APP.xlsx --clp CLP.xlsx --misc MISC.xlsx --psa PSA.xlsx
  rollfwd populate --config june.toml
  rollfwd populate --config june.toml --divisor 9 --json")]
    Populate {
        /// Workbook with the scaffolded month sheets
        workbook: Option<PathBuf>,

        /// APP summary workbook
        #[arg(long, value_name = "FILE")]
        app: Option<PathBuf>,

        /// CLP summary workbook
        #[arg(long, value_name = "FILE")]
        clp: Option<PathBuf>,

        /// MISC summary workbook
        #[arg(long, value_name = "FILE")]
        misc: Option<PathBuf>,

        /// PSA summary workbook
        #[arg(long, value_name = "FILE")]
        psa: Option<PathBuf>,

        /// Sheet-name prefix of the month to fill, e.g. "Jun25"
        #[arg(long, value_name = "CODE")]
        month_code: Option<String>,

        /// Annualization divisor (fiscal months elapsed, November = 1)
        #[arg(long)]
        divisor: Option<u32>,

        /// Reporting month; derives the divisor when --divisor is absent
        #[arg(long)]
        month: Option<String>,

        /// Reporting year, used with --month
        #[arg(long)]
        year: Option<i32>,

        /// Output file (default: Populated_{code}.xlsx)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,

        /// Diagnostics file for unmatched providers (.csv or .xlsx)
        #[arg(long, value_name = "FILE")]
        unmatched: Option<PathBuf>,

        /// TOML job file; command-line flags win over it
        #[arg(long, short = 'c', value_name = "FILE")]
        config: Option<PathBuf>,

        /// Print a JSON summary to stdout
        #[arg(long)]
        json: bool,

        /// Suppress stderr notes
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// Print fiscal-year facts for a reporting month
    #[command(after_help = "\
The fiscal year runs November through October. The divisor is the number of
fiscal months elapsed through the reporting month (November = 1), which the
populate step uses to annualize YTD figures.

Examples:
  rollfwd fiscal --month june --year 2025
  rollfwd fiscal --month november --year 2024 --json")]
    Fiscal {
        /// Reporting month, e.g. "june" or "Jun"
        #[arg(long)]
        month: String,

        /// Reporting year
        #[arg(long)]
        year: i32,

        /// Print JSON to stdout
        #[arg(long)]
        json: bool,
    },

    /// List a workbook's sheets, or show one cell
    #[command(after_help = "\
Examples:
  rollfwd inspect Scaffolded_Jun25.xlsx
  rollfwd inspect Scaffolded_Jun25.xlsx B3 --sheet Jun25_Primary
  rollfwd inspect report.xlsx B7 --sheet 2 --json")]
    Inspect {
        /// Workbook to inspect
        file: PathBuf,

        /// Cell reference, e.g. "B3" (omit to list sheets)
        cell: Option<String>,

        /// Sheet name or zero-based index (default: first sheet)
        #[arg(long, value_name = "SHEET")]
        sheet: Option<String>,

        /// Print JSON to stdout
        #[arg(long)]
        json: bool,
    },
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nengine:  rollfwd-report ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   debug",
            "\ntarget:  ", env!("TARGET"),
            "\ncontract_version(populate): 1",
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            " (", env!("GIT_COMMIT_HASH"), ")",
            "\nengine:  rollfwd-report ", env!("CARGO_PKG_VERSION"),
            "\nbuild:   release",
            "\ntarget:  ", env!("TARGET"),
            "\ncontract_version(populate): 1",
        )
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        None => {
            eprintln!("Usage: rollfwd <command> [options]");
            eprintln!("       rollfwd --help for more information");
            Ok(())
        }
        Some(Commands::Scaffold {
            workbook,
            template,
            month,
            year,
            month_code,
            output,
            json,
            quiet,
        }) => scaffold::cmd_scaffold(workbook, template, month, year, month_code, output, json, quiet),
        Some(Commands::Populate {
            workbook,
            app,
            clp,
            misc,
            psa,
            month_code,
            divisor,
            month,
            year,
            output,
            unmatched,
            config,
            json,
            quiet,
        }) => populate::cmd_populate(
            workbook, app, clp, misc, psa, month_code, divisor, month, year, output, unmatched,
            config, json, quiet,
        ),
        Some(Commands::Fiscal { month, year, json }) => fiscal::cmd_fiscal(month, year, json),
        Some(Commands::Inspect {
            file,
            cell,
            sheet,
            json,
        }) => inspect::cmd_inspect(file, cell, sheet, json),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError {
            code,
            message,
            hint,
        }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn usage(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_USAGE,
            message: msg.into(),
            hint: None,
        }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self {
            code: EXIT_IO,
            message: msg.into(),
            hint: None,
        }
    }

    /// Engine errors carry their own exit code mapping.
    pub fn report(err: ReportError) -> Self {
        Self {
            code: report_exit_code(&err),
            message: err.to_string(),
            hint: None,
        }
    }
}
