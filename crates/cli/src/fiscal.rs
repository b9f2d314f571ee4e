// Fiscal-year facts for a reporting month

use serde_json::Value;

use rollfwd_report::{FiscalInfo, Month};

use crate::util;
use crate::CliError;

pub fn cmd_fiscal(month: String, year: i32, json_output: bool) -> Result<(), CliError> {
    let month: Month = month.parse().map_err(CliError::report)?;
    let fiscal = FiscalInfo::compute(month, year).map_err(CliError::report)?;

    if json_output {
        let mut value = serde_json::to_value(&fiscal)
            .map_err(|e| CliError::io(format!("JSON serialization error: {e}")))?;
        if let Some(map) = value.as_object_mut() {
            map.insert("month_code".to_string(), Value::String(fiscal.month_code()));
        }
        return util::print_json(&value);
    }

    println!("month:         {} {}", fiscal.month, fiscal.year);
    println!("month code:    {}", fiscal.month_code());
    println!("fiscal start:  November {}", fiscal.fy_start_year);
    println!("last day:      {}", fiscal.last_day);
    println!("divisor:       {}", fiscal.divisor);
    println!("header:        {}", fiscal.header_label);
    println!("current FY:    {}", fiscal.fy_current_label);
    println!("prior FY:      {}", fiscal.fy_prior_label);
    println!("YTD:           {}", fiscal.ytd_label);
    println!("YTP:           {}", fiscal.ytp_label);
    Ok(())
}
