//! `rollfwd-report` — Monthly report roll-forward engine.
//!
//! Pure engine crate: receives pre-loaded workbooks, returns outcomes and
//! diagnostics. No CLI or file IO dependencies.
//!
//! A roll forward has two halves. Scaffolding duplicates last month's
//! section sheets under the new month code, clears their data region and
//! stamps the fiscal header cells. Population loads the four summary
//! extracts, merges them into per-section lookup tables and copies each
//! matched provider's nine values into the scaffolded sheets, annualizing
//! as it goes. Providers that cannot be matched cleanly come back as
//! [`UnmatchedRecord`]s instead of failing the run.

pub mod config;
pub mod duplicate;
pub mod error;
pub mod fiscal;
pub mod merge;
pub mod normalize;
pub mod populate;
pub mod summary;

pub use config::{PopulateJob, SourcePaths};
pub use duplicate::{duplicate_sheets, DuplicateOutcome, SkipReason, SkippedTemplate};
pub use error::ReportError;
pub use fiscal::{FiscalInfo, Month};
pub use merge::{merge_sections, Section, SectionTables};
pub use normalize::{normalize_provider_name, provider_key};
pub use populate::{populate_report, CellCopyError, PopulateOutcome, UnmatchedRecord};
pub use summary::{SummaryRow, SummaryTable};
