//! Rendering of solver results for stdout

use crate::config::OutputFormat;
use crate::errors::Result;
use crate::fixed;
use crate::types::Allocation;

/// Render `allocation` in the requested format
///
/// `plain` and `fixed` produce two lines (prices, then allocations) so a
/// consumer can parse each line as a JSON array.
pub fn render(allocation: &Allocation, format: OutputFormat, decimals: u32) -> Result<String> {
    match format {
        OutputFormat::Plain => Ok(format!(
            "{}\n{}",
            serde_json::to_string(&allocation.prices)?,
            serde_json::to_string(&allocation.allocations)?
        )),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(allocation)?),
        OutputFormat::Fixed => {
            let prices = as_strings(&fixed::to_fixed_vec(&allocation.prices, decimals)?);
            let allocations = as_strings(&fixed::to_fixed_vec(&allocation.allocations, decimals)?);
            Ok(format!(
                "{}\n{}",
                serde_json::to_string(&prices)?,
                serde_json::to_string(&allocations)?
            ))
        }
    }
}

// i128 values exceed the safe integer range of most JSON consumers
fn as_strings(raw: &[i128]) -> Vec<String> {
    raw.iter().map(|r| r.to_string()).collect()
}
