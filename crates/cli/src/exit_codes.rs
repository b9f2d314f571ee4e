//! CLI Exit Code Registry
//!
//! This is the single source of truth for all CLI exit codes.
//! Exit codes are part of the shell contract — scripts rely on them.
//!
//! | Code | Meaning                                                  |
//! |------|----------------------------------------------------------|
//! | 0    | Success                                                  |
//! | 1    | General error (reserved, unused)                         |
//! | 2    | Usage error (bad arguments, failed validation)           |
//! | 3    | Unmatched providers recorded (outputs still written)     |
//! | 4    | Malformed summary workbook                               |
//! | 5    | File I/O or parse error                                  |
//!
//! # Adding New Exit Codes
//!
//! 1. Add the constant below
//! 2. Document what triggers it
//! 3. Update the table above
//! 4. Wire it into the relevant command's error handling

use rollfwd_report::ReportError;

/// Success - command completed without errors.
pub const EXIT_SUCCESS: u8 = 0;

/// Usage error - bad arguments, missing required options, failed validation.
pub const EXIT_USAGE: u8 = 2;

/// Populate recorded unmatched providers. The populated workbook and the
/// diagnostics file were still written; like `diff(1)`, a non-zero exit
/// here means "look at the output", not "the run failed".
pub const EXIT_UNMATCHED: u8 = 3;

/// A summary workbook was readable but not usable (too few columns,
/// no provider rows).
pub const EXIT_MALFORMED: u8 = 4;

/// File I/O or parse error reading or writing a workbook.
pub const EXIT_IO: u8 = 5;

/// Map an engine error to its exit code.
pub fn report_exit_code(err: &ReportError) -> u8 {
    match err {
        ReportError::MalformedSource { .. } => EXIT_MALFORMED,
        // Everything else is an input the operator can correct
        _ => EXIT_USAGE,
    }
}
