//! Parsers turning API responses into catalog entries.
//!
//! These functions are pure: they take a response document and never touch
//! the network, which keeps them testable without a client.

use bea_client::response::{as_list, field, results, text};
use bea_core::{BeaError, Dataset, NOT_APPLICABLE, Parameter, Result, ValidInput, YearRanges};
use serde_json::{Map, Value};

/// Datasets whose `Year` parameter lists per-table year ranges.
pub const YEAR_RANGE_DATASETS: [&str; 3] = ["NIPA", "NIUnderlyingDetail", "FixedAssets"];

/// Name of the parameter with per-table year ranges.
pub const YEAR_PARAMETER: &str = "Year";

/// Number of positional fields in a year-range entry: table, then start/end for
/// annual, quarterly and monthly data.
const YEAR_RANGE_FIELDS: usize = 7;

/// Returns true if `parameter` of `dataset` answers with year ranges.
#[must_use]
pub fn has_year_ranges(dataset: &str, parameter: &str) -> bool {
    parameter == YEAR_PARAMETER && YEAR_RANGE_DATASETS.contains(&dataset)
}

/// Parses a `GETDATASETLIST` response into datasets without parameters.
///
/// # Errors
/// Fails if the response reports an API error, lacks the envelope, or an
/// entry has no name.
pub fn parse_datasets(doc: &Value) -> Result<Vec<Dataset>> {
    as_list(field(results(doc)?, "Dataset"))
        .iter()
        .map(|entry| {
            let name = required(entry, "DatasetName")?;
            Ok(Dataset::new(name, or_not_applicable(entry, "DatasetDescription")))
        })
        .collect()
}

/// Parses a `getparameterlist` response.
///
/// Flags are true only for the literal `"1"`. Empty or missing default
/// values and all-values tokens become [`NOT_APPLICABLE`].
///
/// # Errors
/// Fails if the response reports an API error, lacks the envelope, or an
/// entry has no name.
pub fn parse_parameters(doc: &Value) -> Result<Vec<Parameter>> {
    as_list(field(results(doc)?, "Parameter"))
        .iter()
        .map(|entry| {
            let mut parameter = Parameter::new(
                required(entry, "ParameterName")?,
                or_not_applicable(entry, "ParameterDescription"),
            );
            parameter.required = flag(entry, "ParameterIsRequiredFlag");
            parameter.default_value = or_not_applicable(entry, "ParameterDefaultValue");
            parameter.multiple_values_accepted = flag(entry, "MultipleAcceptedFlag");
            parameter.all_values_token = or_not_applicable(entry, "AllValue");
            Ok(parameter)
        })
        .collect()
}

/// Parses a `GetParameterValues` response for `parameter` of `dataset`.
///
/// Entries are read by key position, in the order the server sent them. Most
/// parameters use the first key as the value and the second as its
/// description. The `Year` parameter of [`YEAR_RANGE_DATASETS`] uses seven
/// keys to build a [`YearRanges`] record.
///
/// # Errors
/// Fails if the response reports an API error, lacks the envelope, or an
/// entry is not an object with enough keys.
pub fn parse_valid_inputs(dataset: &str, parameter: &str, doc: &Value) -> Result<Vec<ValidInput>> {
    let year_ranges = has_year_ranges(dataset, parameter);
    as_list(field(results(doc)?, "ParamValue"))
        .iter()
        .map(|entry| {
            let values = positional(entry, dataset, parameter)?;
            if year_ranges {
                year_range_input(&values, dataset)
            } else {
                plain_input(values, dataset, parameter)
            }
        })
        .collect()
}

fn year_range_input(values: &[String], dataset: &str) -> Result<ValidInput> {
    if values.len() < YEAR_RANGE_FIELDS {
        return Err(BeaError::Parse(format!(
            "{dataset} year range entry has {} fields, expected {YEAR_RANGE_FIELDS}",
            values.len()
        )));
    }
    Ok(ValidInput::year_ranges(YearRanges {
        table_name: values[0].clone(),
        annual_year_range: format!("{}-{}", values[1], values[2]),
        quarterly_year_range: format!("{}-{}", values[3], values[4]),
        monthly_year_range: format!("{}-{}", values[5], values[6]),
    }))
}

fn plain_input(values: Vec<String>, dataset: &str, parameter: &str) -> Result<ValidInput> {
    let mut values = values.into_iter();
    let value = values.next().ok_or_else(|| {
        BeaError::Parse(format!("empty value entry for {dataset}.{parameter}"))
    })?;
    let description = values.next().unwrap_or_else(|| NOT_APPLICABLE.to_string());
    Ok(ValidInput::plain(value, description))
}

/// The entry's values as text, in key order.
fn positional(entry: &Value, dataset: &str, parameter: &str) -> Result<Vec<String>> {
    entry
        .as_object()
        .map(|object: &Map<String, Value>| object.values().map(text).collect())
        .ok_or_else(|| {
            BeaError::Parse(format!(
                "value entry for {dataset}.{parameter} is not an object: {entry}"
            ))
        })
}

fn required(entry: &Value, name: &str) -> Result<String> {
    let value = text(field(entry, name));
    if value.is_empty() {
        return Err(BeaError::Parse(format!("entry has no {name}: {entry}")));
    }
    Ok(value)
}

fn or_not_applicable(entry: &Value, name: &str) -> String {
    let value = text(field(entry, name));
    if value.is_empty() {
        NOT_APPLICABLE.to_string()
    } else {
        value
    }
}

/// Only the literal string `"1"` is set; numbers and booleans are not.
fn flag(entry: &Value, name: &str) -> bool {
    matches!(field(entry, name), Value::String(s) if s == "1")
}

#[cfg(test)]
mod tests {
    use super::*;
    use bea_core::InputValue;
    use serde_json::json;

    fn envelope(results: Value) -> Value {
        json!({"BEAAPI": {"Request": {"RequestParam": []}, "Results": results}})
    }

    #[test]
    fn test_parse_datasets_keeps_server_order() {
        let doc = envelope(json!({"Dataset": [
            {"DatasetName": "NIPA", "DatasetDescription": "Standard NIPA tables"},
            {"DatasetName": "Regional", "DatasetDescription": "Regional data sets"},
            {"DatasetName": "APIDatasetMetaData", "DatasetDescription": ""}
        ]}));

        let datasets = parse_datasets(&doc).unwrap();
        let names: Vec<_> = datasets.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["NIPA", "Regional", "APIDatasetMetaData"]);
        assert_eq!(datasets[0].description, "Standard NIPA tables");
        assert_eq!(datasets[2].description, NOT_APPLICABLE);
        assert!(datasets.iter().all(|d| d.parameters.is_empty()));
    }

    #[test]
    fn test_parse_datasets_rejects_nameless_entry() {
        let doc = envelope(json!({"Dataset": [{"DatasetDescription": "orphan"}]}));
        assert!(matches!(parse_datasets(&doc), Err(BeaError::Parse(_))));
    }

    #[test]
    fn test_parse_parameters_flags_and_sentinels() {
        let doc = envelope(json!({"Parameter": [
            {
                "ParameterName": "Frequency",
                "ParameterDataType": "string",
                "ParameterDescription": "A - Annual, Q-Quarterly, M-Monthly",
                "ParameterIsRequiredFlag": "1",
                "ParameterDefaultValue": "",
                "MultipleAcceptedFlag": "1",
                "AllValue": ""
            },
            {
                "ParameterName": "ShowMillions",
                "ParameterDescription": "Display data in millions",
                "ParameterIsRequiredFlag": "0",
                "ParameterDefaultValue": "N",
                "MultipleAcceptedFlag": "0",
                "AllValue": "X"
            },
            {"ParameterName": "Year", "ParameterIsRequiredFlag": "true"}
        ]}));

        let parameters = parse_parameters(&doc).unwrap();
        assert_eq!(parameters.len(), 3);

        let frequency = &parameters[0];
        assert!(frequency.required);
        assert!(frequency.multiple_values_accepted);
        assert_eq!(frequency.default_value, NOT_APPLICABLE);
        assert_eq!(frequency.all_values_token, NOT_APPLICABLE);

        let millions = &parameters[1];
        assert!(!millions.required);
        assert!(!millions.multiple_values_accepted);
        assert_eq!(millions.default_value, "N");
        assert_eq!(millions.all_values_token, "X");

        let year = &parameters[2];
        assert!(!year.required, "only the literal \"1\" counts as set");
        assert!(!year.multiple_values_accepted);
        assert_eq!(year.description, NOT_APPLICABLE);
        assert_eq!(year.default_value, NOT_APPLICABLE);
    }

    #[test]
    fn test_non_string_flags_are_unset() {
        let doc = envelope(json!({"Parameter": [
            {"ParameterName": "Year", "ParameterIsRequiredFlag": 1, "MultipleAcceptedFlag": true},
            {"ParameterName": "TableName", "ParameterIsRequiredFlag": true, "MultipleAcceptedFlag": 1}
        ]}));

        let parameters = parse_parameters(&doc).unwrap();

        for parameter in &parameters {
            assert!(!parameter.required, "{}", parameter.name);
            assert!(!parameter.multiple_values_accepted, "{}", parameter.name);
        }
    }

    #[test]
    fn test_single_parameter_object_is_coerced() {
        let doc = envelope(json!({"Parameter": {
            "ParameterName": "GeoFips",
            "ParameterDescription": "Geography",
            "ParameterIsRequiredFlag": "1"
        }}));
        let parameters = parse_parameters(&doc).unwrap();
        assert_eq!(parameters.len(), 1);
        assert_eq!(parameters[0].name, "GeoFips");
        assert!(parameters[0].required);
    }

    #[test]
    fn test_plain_inputs_use_first_two_keys_in_order() {
        let doc = envelope(json!({"ParamValue": [
            {"TableName": "T10101", "Description": "Table 1.1.1. Percent Change", "ReleaseDate": "2024-03-28"},
            {"Key": "A", "Desc": "Annual"},
            {"OnlyKey": "2020"}
        ]}));

        let inputs = parse_valid_inputs("NIPA", "TableName", &doc).unwrap();
        assert_eq!(inputs[0], ValidInput::plain("T10101", "Table 1.1.1. Percent Change"));
        assert_eq!(inputs[1], ValidInput::plain("A", "Annual"));
        assert_eq!(inputs[2], ValidInput::plain("2020", NOT_APPLICABLE));
    }

    #[test]
    fn test_year_ranges_for_special_datasets() {
        let doc = envelope(json!({"ParamValue": [
            {"Table": "T1", "A1": "1990", "A2": "2020", "Q1": "1999", "Q2": "2020", "M1": "2015", "M2": "2020"}
        ]}));

        for dataset in YEAR_RANGE_DATASETS {
            let inputs = parse_valid_inputs(dataset, "Year", &doc).unwrap();
            assert_eq!(inputs.len(), 1);
            assert_eq!(
                inputs[0].value,
                InputValue::YearRanges(YearRanges {
                    table_name: "T1".to_string(),
                    annual_year_range: "1990-2020".to_string(),
                    quarterly_year_range: "1999-2020".to_string(),
                    monthly_year_range: "2015-2020".to_string(),
                })
            );
            assert_eq!(
                inputs[0].description,
                "Year ranges for annual, quarterly, and monthly data from table: T1"
            );
        }
    }

    #[test]
    fn test_year_in_other_datasets_is_plain() {
        let doc = envelope(json!({"ParamValue": [{"Key": "2020", "Desc": "2020"}]}));
        assert!(!has_year_ranges("Regional", "Year"));
        assert!(!has_year_ranges("NIPA", "year"));
        let inputs = parse_valid_inputs("Regional", "Year", &doc).unwrap();
        assert_eq!(inputs, vec![ValidInput::plain("2020", "2020")]);
    }

    #[test]
    fn test_short_year_range_entry_is_rejected() {
        let doc = envelope(json!({"ParamValue": {"Table": "T1", "A1": "1990"}}));
        assert!(matches!(
            parse_valid_inputs("FixedAssets", "Year", &doc),
            Err(BeaError::Parse(_))
        ));
    }

    #[test]
    fn test_empty_value_list() {
        let doc = envelope(json!({"ParamValue": []}));
        assert!(parse_valid_inputs("NIPA", "Frequency", &doc).unwrap().is_empty());
        let doc = envelope(json!({}));
        assert!(parse_valid_inputs("NIPA", "Frequency", &doc).unwrap().is_empty());
    }

    #[test]
    fn test_api_error_propagates() {
        let doc = envelope(json!({"Error": {
            "APIErrorCode": "12",
            "APIErrorDescription": "The Parameter requested is not valid."
        }}));
        assert!(matches!(
            parse_valid_inputs("NIPA", "Bogus", &doc),
            Err(BeaError::Api { code, .. }) if code == "12"
        ));
    }
}
