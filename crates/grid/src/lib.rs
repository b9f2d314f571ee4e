pub mod addr;
pub mod cell;
pub mod sheet;
pub mod workbook;

pub use cell::{Cell, CellValue, NumberFormat};
pub use sheet::Sheet;
pub use workbook::Workbook;
