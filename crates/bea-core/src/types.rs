//! Core data types for the BEA dataset catalog.
//!
//! This module defines the nested catalog structure:
//!
//! - [`Catalog`] - Every dataset the API offers, stamped with its build date
//! - [`Dataset`] - A named dataset and its request parameters
//! - [`Parameter`] - A request parameter and its valid inputs
//! - [`ValidInput`] - One accepted value for a parameter, with a description
//! - [`YearRanges`] - Per-table year coverage reported by the NIPA-style datasets

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder used for empty default values and all-values tokens.
pub const NOT_APPLICABLE: &str = "N/a";

/// The full catalog of datasets offered by the API.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    /// Date the catalog was built.
    pub as_of: NaiveDate,
    /// Datasets in the order the server listed them.
    pub datasets: Vec<Dataset>,
}

impl Catalog {
    /// Creates a catalog.
    #[must_use]
    pub const fn new(as_of: NaiveDate, datasets: Vec<Dataset>) -> Self {
        Self { as_of, datasets }
    }

    /// Looks up a dataset by name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn dataset(&self, name: &str) -> Option<&Dataset> {
        let name = name.trim();
        self.datasets
            .iter()
            .find(|d| d.name.trim().eq_ignore_ascii_case(name))
    }

    /// Number of requests a full build of this catalog costs:
    /// one dataset list, one parameter list per dataset and one value list per parameter.
    #[must_use]
    pub fn request_cost(&self) -> usize {
        1 + self.datasets.len()
            + self
                .datasets
                .iter()
                .map(|d| d.parameters.len())
                .sum::<usize>()
    }
}

/// A dataset and its request parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// Dataset name; unique within a catalog.
    pub name: String,
    /// Dataset description.
    pub description: String,
    /// Parameters in the order the server listed them.
    pub parameters: Vec<Parameter>,
}

impl Dataset {
    /// Creates a dataset with no parameters.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: Vec::new(),
        }
    }

    /// Looks up a parameter by name, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn parameter(&self, name: &str) -> Option<&Parameter> {
        let name = name.trim();
        self.parameters
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }
}

/// A request parameter of a dataset.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter name.
    pub name: String,
    /// Parameter description.
    pub description: String,
    /// Whether the parameter must be supplied.
    pub required: bool,
    /// Default value, or [`NOT_APPLICABLE`].
    pub default_value: String,
    /// Whether several comma-separated values may be supplied.
    pub multiple_values_accepted: bool,
    /// Token requesting every value (e.g. `X` or `ALL`), or [`NOT_APPLICABLE`].
    pub all_values_token: String,
    /// Accepted values in the order the server listed them.
    pub valid_inputs: Vec<ValidInput>,
}

impl Parameter {
    /// Creates an optional parameter with no default, no all-values token and no inputs.
    #[must_use]
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            required: false,
            default_value: NOT_APPLICABLE.to_string(),
            multiple_values_accepted: false,
            all_values_token: NOT_APPLICABLE.to_string(),
            valid_inputs: Vec::new(),
        }
    }

    /// Returns true if the valid inputs are per-table year ranges.
    #[must_use]
    pub fn has_year_ranges(&self) -> bool {
        self.valid_inputs
            .iter()
            .any(|input| matches!(input.value, InputValue::YearRanges(_)))
    }
}

/// One accepted value of a parameter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidInput {
    /// The value to send.
    pub value: InputValue,
    /// What the value means.
    pub description: String,
}

impl ValidInput {
    /// Creates a plain string input.
    #[must_use]
    pub fn plain(value: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            value: InputValue::Plain(value.into()),
            description: description.into(),
        }
    }

    /// Creates a year-range input, synthesizing its description from the table name.
    #[must_use]
    pub fn year_ranges(ranges: YearRanges) -> Self {
        let description = format!(
            "Year ranges for annual, quarterly, and monthly data from table: {}",
            ranges.table_name
        );
        Self {
            value: InputValue::YearRanges(ranges),
            description,
        }
    }
}

/// The value part of a [`ValidInput`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InputValue {
    /// An ordinary value.
    Plain(String),
    /// Year coverage of one table.
    YearRanges(YearRanges),
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain(value) => f.write_str(value),
            Self::YearRanges(ranges) => f.write_str(&ranges.table_name),
        }
    }
}

/// Annual, quarterly and monthly year coverage of one table, each as `start-end`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct YearRanges {
    /// Table identifier.
    pub table_name: String,
    /// Years with annual data.
    pub annual_year_range: String,
    /// Years with quarterly data.
    pub quarterly_year_range: String,
    /// Years with monthly data.
    pub monthly_year_range: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Catalog {
        let mut nipa = Dataset::new("NIPA", "Standard NIPA tables");
        nipa.parameters.push(Parameter::new("TableName", "The standard NIPA table identifier"));
        nipa.parameters.push(Parameter::new("Year", "List of year(s) of data to retrieve"));
        let regional = Dataset::new("Regional", "Regional data sets");
        Catalog::new(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(), vec![nipa, regional])
    }

    #[test]
    fn test_dataset_lookup_is_case_insensitive() {
        let catalog = sample_catalog();
        assert_eq!(catalog.dataset("nipa").map(|d| d.name.as_str()), Some("NIPA"));
        assert_eq!(catalog.dataset("  REGIONAL ").map(|d| d.name.as_str()), Some("Regional"));
        assert!(catalog.dataset("GDPbyIndustry").is_none());
    }

    #[test]
    fn test_parameter_lookup() {
        let catalog = sample_catalog();
        let nipa = catalog.dataset("NIPA").unwrap();
        assert!(nipa.parameter("year").is_some());
        assert!(nipa.parameter("Frequency").is_none());
    }

    #[test]
    fn test_request_cost() {
        // 1 dataset list + 2 parameter lists + 2 value lists
        assert_eq!(sample_catalog().request_cost(), 5);
    }

    #[test]
    fn test_new_parameter_uses_sentinels() {
        let param = Parameter::new("Frequency", "A, Q, M");
        assert_eq!(param.default_value, NOT_APPLICABLE);
        assert_eq!(param.all_values_token, NOT_APPLICABLE);
        assert!(!param.required);
        assert!(!param.has_year_ranges());
    }

    #[test]
    fn test_year_ranges_description() {
        let input = ValidInput::year_ranges(YearRanges {
            table_name: "T1".to_string(),
            annual_year_range: "1990-2020".to_string(),
            quarterly_year_range: "1999-2020".to_string(),
            monthly_year_range: "2015-2020".to_string(),
        });
        assert_eq!(
            input.description,
            "Year ranges for annual, quarterly, and monthly data from table: T1"
        );
        assert_eq!(input.value.to_string(), "T1");
    }

    #[test]
    fn test_year_ranges_serialize_with_record_keys() {
        let ranges = YearRanges {
            table_name: "T1".to_string(),
            annual_year_range: "1990-2020".to_string(),
            quarterly_year_range: "1999-2020".to_string(),
            monthly_year_range: "2015-2020".to_string(),
        };
        let json = serde_json::to_value(&ranges).unwrap();
        assert_eq!(json["TableName"], "T1");
        assert_eq!(json["AnnualYearRange"], "1990-2020");
        assert_eq!(json["QuarterlyYearRange"], "1999-2020");
        assert_eq!(json["MonthlyYearRange"], "2015-2020");
    }

    #[test]
    fn test_input_value_untagged_roundtrip() {
        let plain: InputValue = serde_json::from_str("\"T10101\"").unwrap();
        assert_eq!(plain, InputValue::Plain("T10101".to_string()));

        let ranges: InputValue = serde_json::from_str(
            r#"{"TableName":"T1","AnnualYearRange":"1990-2020","QuarterlyYearRange":"1999-2020","MonthlyYearRange":"2015-2020"}"#,
        )
        .unwrap();
        assert!(matches!(ranges, InputValue::YearRanges(ref r) if r.table_name == "T1"));
    }
}
