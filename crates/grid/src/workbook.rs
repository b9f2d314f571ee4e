use crate::sheet::Sheet;

/// An ordered collection of sheets. Sheet names are unique; lookups are by
/// exact name, matching how target sheets are addressed during a roll
/// forward.
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: Vec<Sheet>,
}

impl Workbook {
    /// Create an empty workbook. Import and scaffolding add the sheets.
    pub fn new() -> Self {
        Workbook { sheets: Vec::new() }
    }

    pub fn from_sheets(sheets: Vec<Sheet>) -> Self {
        Workbook { sheets }
    }

    pub fn sheet_count(&self) -> usize {
        self.sheets.len()
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet(&self, index: usize) -> Option<&Sheet> {
        self.sheets.get(index)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn sheet_name_exists(&self, name: &str) -> bool {
        self.sheets.iter().any(|s| s.name == name)
    }

    pub fn sheet_by_name(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_by_name_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|s| s.name == name)
    }

    /// Append a sheet, returning its index, or `None` if the name is taken.
    pub fn add_sheet(&mut self, sheet: Sheet) -> Option<usize> {
        if self.sheet_name_exists(&sheet.name) {
            return None;
        }
        self.sheets.push(sheet);
        Some(self.sheets.len() - 1)
    }

    /// First sheet, if any. Summary workbooks are read through this: only
    /// their first sheet carries data.
    pub fn first_sheet(&self) -> Option<&Sheet> {
        self.sheets.first()
    }
}

// ---------------------------------------------------------------------------
