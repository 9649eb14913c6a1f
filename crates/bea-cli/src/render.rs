//! Terminal tables.

use bea::{Catalog, Dataset, InputValue, Parameter};
use comfy_table::presets::ASCII_FULL;
use comfy_table::{ContentArrangement, Table};

/// Width of banner lines.
const BANNER_WIDTH: usize = 80;

fn table<const N: usize>(headers: [&str; N]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(headers);
    table
}

const fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

/// A title framed by lines of asterisks.
pub(crate) fn banner(title: &str) -> String {
    let rule = "*".repeat(BANNER_WIDTH);
    let inner = BANNER_WIDTH.saturating_sub(2);
    format!("{rule}\n*{title:^inner$}*\n{rule}")
}

pub(crate) fn datasets_table(catalog: &Catalog) -> Table {
    let mut table = table(["Dataset", "Description"]);
    for dataset in &catalog.datasets {
        table.add_row([dataset.name.trim(), dataset.description.as_str()]);
    }
    table
}

pub(crate) fn parameters_table(dataset: &Dataset) -> Table {
    let mut table = table([
        "Parameter",
        "Description",
        "Required",
        "Default Value",
        "Multiple Accepted",
        "All Value Request",
        "Valid Inputs",
    ]);
    for parameter in &dataset.parameters {
        table.add_row([
            parameter.name.clone(),
            parameter.description.clone(),
            yes_no(parameter.required).to_string(),
            parameter.default_value.clone(),
            yes_no(parameter.multiple_values_accepted).to_string(),
            parameter.all_values_token.clone(),
            parameter.valid_inputs.len().to_string(),
        ]);
    }
    table
}

/// Valid inputs of `parameter`; year ranges get one column per frequency.
pub(crate) fn valid_inputs_table(parameter: &Parameter) -> Table {
    if parameter.has_year_ranges() {
        let mut table = table(["TableName", "Annual", "Quarterly", "Monthly"]);
        for input in &parameter.valid_inputs {
            match &input.value {
                InputValue::YearRanges(ranges) => table.add_row([
                    ranges.table_name.as_str(),
                    ranges.annual_year_range.as_str(),
                    ranges.quarterly_year_range.as_str(),
                    ranges.monthly_year_range.as_str(),
                ]),
                InputValue::Plain(value) => {
                    table.add_row([value.as_str(), "", "", input.description.as_str()])
                }
            };
        }
        table
    } else {
        let mut table = table(["Value", "Description"]);
        for input in &parameter.valid_inputs {
            table.add_row([input.value.to_string(), input.description.clone()]);
        }
        table
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bea::{ValidInput, YearRanges};
    use chrono::NaiveDate;

    fn nipa() -> Dataset {
        let mut table_name = Parameter::new("TableName", "The standard NIPA table identifier");
        table_name.required = true;
        table_name.valid_inputs = vec![ValidInput::plain("T10101", "Table 1.1.1")];

        let mut year = Parameter::new("Year", "List of year(s) of data to retrieve");
        year.multiple_values_accepted = true;
        year.all_values_token = "X".to_string();
        year.valid_inputs = vec![ValidInput::year_ranges(YearRanges {
            table_name: "T10101".to_string(),
            annual_year_range: "1930-2023".to_string(),
            quarterly_year_range: "1947-2023".to_string(),
            monthly_year_range: "0-0".to_string(),
        })];

        let mut dataset = Dataset::new("NIPA", "Standard NIPA tables");
        dataset.parameters = vec![table_name, year];
        dataset
    }

    #[test]
    fn test_banner() {
        let banner = banner("Search Available Datasets");
        let lines: Vec<_> = banner.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|line| line.chars().count() == BANNER_WIDTH));
        assert!(lines[1].contains("Search Available Datasets"));
    }

    #[test]
    fn test_datasets_table() {
        let catalog = Catalog::new(
            NaiveDate::from_ymd_opt(2024, 4, 10).unwrap(),
            vec![nipa(), Dataset::new("Regional", "Regional data sets")],
        );
        let rendered = datasets_table(&catalog).to_string();
        assert!(rendered.contains("Dataset"));
        assert!(rendered.contains("NIPA"));
        assert!(rendered.contains("Regional data sets"));
    }

    #[test]
    fn test_parameters_table_flags() {
        let rendered = parameters_table(&nipa()).to_string();
        assert!(rendered.contains("Default Value"));
        assert!(rendered.contains("Yes"));
        assert!(rendered.contains("N/a"));
        assert!(rendered.contains('X'));
    }

    #[test]
    fn test_year_ranges_get_frequency_columns() {
        let dataset = nipa();
        let rendered = valid_inputs_table(dataset.parameter("Year").unwrap()).to_string();
        assert!(rendered.contains("Quarterly"));
        assert!(rendered.contains("1947-2023"));

        let rendered = valid_inputs_table(dataset.parameter("TableName").unwrap()).to_string();
        assert!(rendered.contains("Value"));
        assert!(rendered.contains("Table 1.1.1"));
        assert!(!rendered.contains("Quarterly"));
    }
}
