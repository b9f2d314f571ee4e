use serde::{Deserialize, Serialize};

/// Number display hint.
///
/// Imported files only tell us whether a serial number carried a date-like
/// format; everything else renders as General. The hint survives value
/// clears so a rolled-forward sheet keeps its date columns typed.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum NumberFormat {
    #[default]
    General,
    Date,
    Time,
    DateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "value")]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Error literal carried over from the source file (`#DIV/0!`, `#N/A`).
    Error(String),
}

impl Default for CellValue {
    fn default() -> Self {
        CellValue::Empty
    }
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    /// Plain-text rendering, used by CSV export and cell inspection.
    /// Numbers print without a trailing `.0`.
    pub fn display_string(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Bool(b) => {
                if *b {
                    "TRUE".to_string()
                } else {
                    "FALSE".to_string()
                }
            }
            CellValue::Error(literal) => literal.clone(),
        }
    }
}

/// A cell: a value, an optional formula source, and a display hint.
///
/// The value of a formula cell is the result its source file cached; the
/// source text rides alongside so a re-export writes a live formula. A plain
/// value write replaces the formula, a value clear drops both and keeps the
/// format.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Cell {
    pub value: CellValue,
    /// Formula source including the leading `=`. Never evaluated here; it is
    /// handed to the output engine untouched.
    pub formula: Option<String>,
    pub format: NumberFormat,
}

impl Cell {
    pub fn new(value: CellValue) -> Self {
        Cell {
            value,
            formula: None,
            format: NumberFormat::General,
        }
    }

    /// True when the cell carries no information worth storing.
    pub fn is_default(&self) -> bool {
        self.value.is_empty() && self.formula.is_none() && self.format == NumberFormat::General
    }
}

// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_string_number() {
        assert_eq!(CellValue::Number(42.0).display_string(), "42");
        assert_eq!(CellValue::Number(-3.0).display_string(), "-3");
        assert_eq!(CellValue::Number(1234.5678).display_string(), "1234.5678");
    }

    #[test]
    fn test_display_string_other_variants() {
        assert_eq!(CellValue::Empty.display_string(), "");
        assert_eq!(CellValue::Text("hi".into()).display_string(), "hi");
        assert_eq!(CellValue::Bool(true).display_string(), "TRUE");
        assert_eq!(CellValue::Bool(false).display_string(), "FALSE");
        assert_eq!(CellValue::Error("#N/A".into()).display_string(), "#N/A");
    }

    #[test]
    fn test_cell_default_detection() {
        assert!(Cell::default().is_default());
        assert!(!Cell::new(CellValue::Number(1.0)).is_default());
        let styled = Cell {
            value: CellValue::Empty,
            formula: None,
            format: NumberFormat::Date,
        };
        assert!(!styled.is_default());
        // A formula with no cached value yet is still worth storing.
        let pending = Cell {
            value: CellValue::Empty,
            formula: Some("=I7/8*12".into()),
            format: NumberFormat::General,
        };
        assert!(!pending.is_default());
    }
}
