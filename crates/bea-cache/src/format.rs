//! Catalog file codec.
//!
//! ```text
//! 2024-04-10
//! {"name":"NIPA","description":"Standard NIPA tables","parameters":[...]}
//! {"name":"Regional","description":"Regional data sets","parameters":[...]}
//! ```

use bea_core::{BeaError, Catalog, Dataset, Result};
use chrono::NaiveDate;

/// Date format of the first line.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Encodes `catalog` as a date line followed by one JSON line per dataset.
///
/// # Errors
/// Returns [`BeaError::Cache`] if a dataset cannot be encoded.
pub fn serialize(catalog: &Catalog) -> Result<String> {
    let mut out = catalog.as_of.format(DATE_FORMAT).to_string();
    out.push('\n');
    for dataset in &catalog.datasets {
        let line = serde_json::to_string(dataset)
            .map_err(|e| BeaError::Cache(format!("Failed to encode {}: {e}", dataset.name)))?;
        out.push_str(&line);
        out.push('\n');
    }
    Ok(out)
}

/// Decodes a catalog written by [`serialize`]. Blank lines are ignored.
///
/// # Errors
/// Returns [`BeaError::CacheRead`] if the date line or any dataset line is malformed.
pub fn deserialize(text: &str) -> Result<Catalog> {
    let mut lines = text.lines();
    let as_of = parse_date_line(lines.next().unwrap_or_default())?;

    let datasets = lines
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(index, line)| {
            serde_json::from_str::<Dataset>(line).map_err(|e| {
                BeaError::CacheRead(format!("line {}: {e}", index + 2))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(Catalog::new(as_of, datasets))
}

/// Parses the first line of a catalog file.
///
/// # Errors
/// Returns [`BeaError::CacheRead`] if the line is not a `YYYY-MM-DD` date.
pub fn parse_date_line(line: &str) -> Result<NaiveDate> {
    let line = line.trim();
    NaiveDate::parse_from_str(line, DATE_FORMAT)
        .map_err(|e| BeaError::CacheRead(format!("invalid date line '{line}': {e}")))
}
