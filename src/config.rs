// ⚙️ Period Policy Configuration - Policies as data
// The municipality's rounding policy lives in a JSON file, e.g.
//   { "rounding": "fixed", "early_rollover_days": 15 }

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::period::PeriodOptions;

/// Load period options from a JSON policy file
pub fn load_period_options<P: AsRef<Path>>(path: P) -> Result<PeriodOptions> {
    let content = fs::read_to_string(path.as_ref())
        .with_context(|| format!("Failed to read period policy file: {:?}", path.as_ref()))?;

    period_options_from_json(&content)
        .with_context(|| format!("Invalid period policy file: {:?}", path.as_ref()))
}

/// Parse period options from JSON text; missing fields take defaults
pub fn period_options_from_json(json: &str) -> Result<PeriodOptions> {
    serde_json::from_str(json).context("Failed to parse period policy JSON")
}
