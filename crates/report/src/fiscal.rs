use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::error::ReportError;

/// Supported calendar years. Wide enough for any plausible report, narrow
/// enough to catch a mistyped two-digit year before it names a sheet.
pub const YEAR_MIN: i32 = 2000;
pub const YEAR_MAX: i32 = 2100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

/// Months in fiscal order. The fiscal year opens November 1, so November is
/// position 1 and October position 12; the position doubles as the
/// annualization divisor (months elapsed since the fiscal year began).
pub const FISCAL_ORDER: [Month; 12] = [
    Month::November,
    Month::December,
    Month::January,
    Month::February,
    Month::March,
    Month::April,
    Month::May,
    Month::June,
    Month::July,
    Month::August,
    Month::September,
    Month::October,
];

impl Month {
    pub fn name(self) -> &'static str {
        match self {
            Month::January => "January",
            Month::February => "February",
            Month::March => "March",
            Month::April => "April",
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
            Month::November => "November",
            Month::December => "December",
        }
    }

    /// Three-letter code used in month codes ("Jun" in "Jun25").
    pub fn short_name(self) -> &'static str {
        &self.name()[..3]
    }

    /// Calendar month number, January = 1.
    pub fn number(self) -> u32 {
        match self {
            Month::January => 1,
            Month::February => 2,
            Month::March => 3,
            Month::April => 4,
            Month::May => 5,
            Month::June => 6,
            Month::July => 7,
            Month::August => 8,
            Month::September => 9,
            Month::October => 10,
            Month::November => 11,
            Month::December => 12,
        }
    }

    /// 1-based position in [`FISCAL_ORDER`]: November = 1, October = 12.
    pub fn fiscal_position(self) -> u32 {
        // The ordering covers all twelve months, so the lookup cannot miss.
        FISCAL_ORDER
            .iter()
            .position(|m| *m == self)
            .map(|i| i as u32 + 1)
            .unwrap_or(1)
    }

    /// Calendar year in which the fiscal year containing (self, year) began.
    /// November and December open their own fiscal year.
    pub fn fiscal_start_year(self, year: i32) -> i32 {
        match self {
            Month::November | Month::December => year,
            _ => year - 1,
        }
    }

    /// Last calendar day of the month, leap-year aware. `None` only when
    /// chrono rejects the year, which the supported range rules out.
    pub fn last_day(self, year: i32) -> Option<u32> {
        let (next_year, next_month) = if self == Month::December {
            (year + 1, 1)
        } else {
            (year, self.number() + 1)
        };
        let first_of_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
        first_of_next.pred_opt().map(|d| d.day())
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Month {
    type Err = ReportError;

    /// Accepts full month names and three-letter codes, case-insensitive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        for month in FISCAL_ORDER {
            if lowered == month.name().to_ascii_lowercase()
                || lowered == month.short_name().to_ascii_lowercase()
            {
                return Ok(month);
            }
        }
        Err(ReportError::MonthParse(s.trim().to_string()))
    }
}

// ---------------------------------------------------------------------------
// Fiscal labels
// ---------------------------------------------------------------------------

/// Everything the scaffolded sheets need to know about the report month.
/// Computed once per (month, year) and passed around explicitly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FiscalInfo {
    pub month: Month,
    pub year: i32,
    pub fy_start_year: i32,
    pub last_day: u32,
    /// Stamped into B3: the services period covered so far this fiscal year.
    pub header_label: String,
    /// Stamped into D6: the report month keyed by calendar year.
    pub fy_current_label: String,
    /// Stamped into E6: the report month keyed by fiscal start year.
    pub fy_prior_label: String,
    /// Stamped into I6.
    pub ytd_label: String,
    /// Stamped into J6.
    pub ytp_label: String,
    /// Months elapsed since November 1; the annualization divisor.
    pub divisor: u32,
}

impl FiscalInfo {
    pub fn compute(month: Month, year: i32) -> Result<FiscalInfo, ReportError> {
        if !(YEAR_MIN..=YEAR_MAX).contains(&year) {
            return Err(ReportError::YearOutOfRange(year));
        }
        let fy_start_year = month.fiscal_start_year(year);
        let last_day = month
            .last_day(year)
            .ok_or(ReportError::YearOutOfRange(year))?;

        Ok(FiscalInfo {
            month,
            year,
            fy_start_year,
            last_day,
            header_label: format!(
                "For services November 1, {fy_start_year} through {month} {last_day}, {year}"
            ),
            fy_current_label: format!("{year}, {month}"),
            fy_prior_label: format!("{fy_start_year}, {month}"),
            ytd_label: format!("YTD {month} {year}"),
            ytp_label: format!("YTP {month} {fy_start_year}"),
            divisor: month.fiscal_position(),
        })
    }

    /// Default month code for sheet names: three-letter month plus two-digit
    /// year ("Jun25").
    pub fn month_code(&self) -> String {
        format!("{}{:02}", self.month.short_name(), self.year.rem_euclid(100))
    }
}

// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_month_from_str() {
        assert_eq!("June".parse::<Month>().unwrap(), Month::June);
        assert_eq!("june".parse::<Month>().unwrap(), Month::June);
        assert_eq!("JUN".parse::<Month>().unwrap(), Month::June);
        assert_eq!(" nov ".parse::<Month>().unwrap(), Month::November);
        assert!("Movember".parse::<Month>().is_err());
        assert!("".parse::<Month>().is_err());
    }

    #[test]
    fn test_fiscal_position_covers_the_year() {
        assert_eq!(Month::November.fiscal_position(), 1);
        assert_eq!(Month::December.fiscal_position(), 2);
        assert_eq!(Month::January.fiscal_position(), 3);
        assert_eq!(Month::June.fiscal_position(), 8);
        assert_eq!(Month::October.fiscal_position(), 12);
    }

    #[test]
    fn test_fiscal_start_year() {
        assert_eq!(Month::November.fiscal_start_year(2025), 2025);
        assert_eq!(Month::December.fiscal_start_year(2025), 2025);
        assert_eq!(Month::January.fiscal_start_year(2026), 2025);
        assert_eq!(Month::October.fiscal_start_year(2026), 2025);
    }

    #[test]
    fn test_last_day_handles_leap_years() {
        assert_eq!(Month::February.last_day(2024), Some(29));
        assert_eq!(Month::February.last_day(2025), Some(28));
        assert_eq!(Month::February.last_day(2100), Some(28)); // century rule
        assert_eq!(Month::December.last_day(2025), Some(31));
        assert_eq!(Month::June.last_day(2025), Some(30));
    }

    #[test]
    fn test_compute_june_labels() {
        let info = FiscalInfo::compute(Month::June, 2025).unwrap();
        assert_eq!(info.fy_start_year, 2024);
        assert_eq!(info.last_day, 30);
        assert_eq!(
            info.header_label,
            "For services November 1, 2024 through June 30, 2025"
        );
        assert_eq!(info.fy_current_label, "2025, June");
        assert_eq!(info.fy_prior_label, "2024, June");
        assert_eq!(info.ytd_label, "YTD June 2025");
        assert_eq!(info.ytp_label, "YTP June 2024");
        assert_eq!(info.divisor, 8);
        assert_eq!(info.month_code(), "Jun25");
    }

    #[test]
    fn test_compute_november_opens_fiscal_year() {
        let info = FiscalInfo::compute(Month::November, 2025).unwrap();
        assert_eq!(info.fy_start_year, 2025);
        assert_eq!(info.divisor, 1);
        assert_eq!(
            info.header_label,
            "For services November 1, 2025 through November 30, 2025"
        );
        // Calendar-year and fiscal-year labels coincide at the year start.
        assert_eq!(info.fy_current_label, info.fy_prior_label);
    }

    #[test]
    fn test_compute_rejects_out_of_range_years() {
        assert!(matches!(
            FiscalInfo::compute(Month::June, 1999),
            Err(ReportError::YearOutOfRange(1999))
        ));
        assert!(matches!(
            FiscalInfo::compute(Month::June, 2101),
            Err(ReportError::YearOutOfRange(2101))
        ));
        assert!(FiscalInfo::compute(Month::June, 2000).is_ok());
        assert!(FiscalInfo::compute(Month::June, 2100).is_ok());
    }
}
