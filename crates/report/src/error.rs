use std::fmt;

#[derive(Debug)]
pub enum ReportError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (conflicting divisor sources, month without
    /// year, etc.).
    ConfigValidation(String),
    /// A required input path or value is blank.
    MissingInput(String),
    /// Month name that is neither a full name nor a three-letter code.
    MonthParse(String),
    /// Calendar year outside the supported range.
    YearOutOfRange(i32),
    /// Annualization divisor of zero.
    InvalidDivisor(u32),
    /// A summary sheet that cannot be keyed (too few columns, no data rows).
    MalformedSource { label: String, detail: String },
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingInput(what) => write!(f, "missing input: {what}"),
            Self::MonthParse(value) => write!(f, "cannot parse month '{value}'"),
            Self::YearOutOfRange(year) => {
                write!(f, "year {year} outside supported range 2000..=2100")
            }
            Self::InvalidDivisor(value) => {
                write!(f, "divisor must be at least 1, got {value}")
            }
            Self::MalformedSource { label, detail } => {
                write!(f, "summary '{label}': {detail}")
            }
        }
    }
}

impl std::error::Error for ReportError {}
