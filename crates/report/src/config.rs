use serde::Deserialize;

use crate::error::ReportError;
use crate::fiscal::{FiscalInfo, Month, YEAR_MAX, YEAR_MIN};

/// A populate run described as a TOML job file, for months that run the
/// same way every time. Flags given on the command line win over the
/// file's values.
///
/// ```toml
/// workbook = "Scaffolded_Jun25.xlsx"
/// month_code = "Jun25"
/// month = "June"          # or: divisor = 8
/// year = 2025
/// output = "Populated_Jun25.xlsx"
/// unmatched = "unmatched.csv"
///
/// [sources]
/// app = "APP_Jun25.xlsx"
/// clp = "CLP_Jun25.xlsx"
/// misc = "MISC_Jun25.xlsx"
/// psa = "PSA_Jun25.xlsx"
/// ```
/// Every field is optional at parse time so callers can layer command-line
/// flags over a partial file before validating.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PopulateJob {
    /// Workbook holding the scaffolded month sheets.
    #[serde(default)]
    pub workbook: String,
    #[serde(default)]
    pub month_code: String,
    #[serde(default)]
    pub divisor: Option<u32>,
    #[serde(default)]
    pub month: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    /// Output path; defaults to `Populated_{month_code}.xlsx` when unset.
    #[serde(default)]
    pub output: Option<String>,
    /// Where to write unmatched diagnostics (.csv or .xlsx).
    #[serde(default)]
    pub unmatched: Option<String>,
    #[serde(default)]
    pub sources: SourcePaths,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SourcePaths {
    #[serde(default)]
    pub app: String,
    #[serde(default)]
    pub clp: String,
    #[serde(default)]
    pub misc: String,
    #[serde(default)]
    pub psa: String,
}

impl PopulateJob {
    /// Parse without validating. Callers that merge in values from another
    /// source (command-line flags) validate after the merge.
    pub fn parse(input: &str) -> Result<Self, ReportError> {
        toml::from_str(input).map_err(|e| ReportError::ConfigParse(e.to_string()))
    }

    pub fn from_toml(input: &str) -> Result<Self, ReportError> {
        let job = Self::parse(input)?;
        job.validate()?;
        Ok(job)
    }

    pub fn validate(&self) -> Result<(), ReportError> {
        for (label, path) in [
            ("workbook path", &self.workbook),
            ("APP summary path", &self.sources.app),
            ("CLP summary path", &self.sources.clp),
            ("MISC summary path", &self.sources.misc),
            ("PSA summary path", &self.sources.psa),
        ] {
            if path.trim().is_empty() {
                return Err(ReportError::MissingInput(label.to_string()));
            }
        }
        if self.month_code.trim().is_empty() {
            return Err(ReportError::MissingInput("month code".to_string()));
        }

        if let Some(0) = self.divisor {
            return Err(ReportError::InvalidDivisor(0));
        }

        match (self.divisor, &self.month, self.year) {
            (Some(_), _, _) => {}
            (None, Some(month), Some(year)) => {
                month.parse::<Month>()?;
                if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
                    return Err(ReportError::YearOutOfRange(year));
                }
            }
            (None, Some(_), None) => {
                return Err(ReportError::ConfigValidation(
                    "month given without year".into(),
                ));
            }
            (None, None, Some(_)) => {
                return Err(ReportError::ConfigValidation(
                    "year given without month".into(),
                ));
            }
            (None, None, None) => {
                return Err(ReportError::ConfigValidation(
                    "either divisor or month and year must be given".into(),
                ));
            }
        }

        Ok(())
    }

    /// The divisor to annualize with: explicit wins, otherwise derived from
    /// (month, year). `validate` guarantees one of the two is available.
    pub fn resolved_divisor(&self) -> Result<u32, ReportError> {
        if let Some(d) = self.divisor {
            return Ok(d);
        }
        match (&self.month, self.year) {
            (Some(month), Some(year)) => {
                let info = FiscalInfo::compute(month.parse()?, year)?;
                Ok(info.divisor)
            }
            _ => Err(ReportError::ConfigValidation(
                "either divisor or month and year must be given".into(),
            )),
        }
    }
}

// ---------------------------------------------------------------------------
