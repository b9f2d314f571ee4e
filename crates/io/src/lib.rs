// File I/O operations

pub mod csv;
pub mod diagnostics;
pub mod xlsx;

pub use xlsx::{ExportResult, ImportResult};
