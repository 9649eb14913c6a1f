//! `GetData` requests and their conversion to a [`DataFrame`].

use bea_core::{BeaError, Result};
use polars::prelude::*;
use serde_json::{Map, Value};

use crate::response::{as_list, field, results, text};

/// Column holding the observation value, parsed to a float.
const DATA_VALUE_COLUMN: &str = "DataValue";

/// Parameters of a `GetData` request.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DataRequest {
    /// Dataset to query (e.g. `NIPA`).
    pub dataset: String,
    /// Request parameters in the order they will be sent.
    pub params: Vec<(String, String)>,
}

impl DataRequest {
    /// Creates a request with no parameters.
    #[must_use]
    pub fn new(dataset: impl Into<String>) -> Self {
        Self {
            dataset: dataset.into(),
            params: Vec::new(),
        }
    }

    /// Adds a parameter.
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    /// Adds a parameter written as `NAME=VALUE`.
    ///
    /// # Errors
    /// Returns [`BeaError::InvalidParameter`] if there is no `=` or the name is empty.
    pub fn assignment(self, assignment: &str) -> Result<Self> {
        let (name, value) = assignment.split_once('=').ok_or_else(|| {
            BeaError::InvalidParameter(format!("expected NAME=VALUE, got '{assignment}'"))
        })?;
        let name = name.trim();
        if name.is_empty() {
            return Err(BeaError::InvalidParameter(format!(
                "missing parameter name in '{assignment}'"
            )));
        }
        Ok(self.param(name, value.trim()))
    }
}

/// Returns the data rows of a `GetData` response.
///
/// # Errors
/// Fails if the envelope is missing or reports an API error.
pub fn data_rows(doc: &Value) -> Result<Vec<&Map<String, Value>>> {
    let results = results(doc)?;
    Ok(as_list(results)
        .iter()
        .flat_map(|result| as_list(field(result, "Data")))
        .filter_map(Value::as_object)
        .collect())
}

/// Converts a `GetData` response into a [`DataFrame`].
///
/// Columns are the union of the row keys in order of first appearance and hold
/// strings, except `DataValue` which is parsed to `f64` (thousands separators
/// removed; markers such as `(NA)` become null).
///
/// # Errors
/// Fails if the envelope is missing, reports an API error, or the frame cannot be built.
pub fn data_frame(doc: &Value) -> Result<DataFrame> {
    let rows = data_rows(doc)?;

    let mut names: Vec<&str> = Vec::new();
    for row in &rows {
        for name in row.keys() {
            if !names.contains(&name.as_str()) {
                names.push(name);
            }
        }
    }

    let columns = names
        .iter()
        .map(|&name| {
            if name == DATA_VALUE_COLUMN {
                let values: Vec<Option<f64>> = rows
                    .iter()
                    .map(|row| row.get(name).and_then(|v| parse_data_value(&text(v))))
                    .collect();
                Column::new(name.into(), values)
            } else {
                let values: Vec<Option<String>> = rows
                    .iter()
                    .map(|row| row.get(name).map(text))
                    .collect();
                Column::new(name.into(), values)
            }
        })
        .collect::<Vec<_>>();

    DataFrame::new(columns).map_err(|e| BeaError::Parse(e.to_string()))
}

/// Parses an observation such as `"1,234.5"`.
fn parse_data_value(raw: &str) -> Option<f64> {
    raw.trim().replace(',', "").parse().ok()
}
