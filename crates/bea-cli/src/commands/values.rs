use bea::{BeaError, CatalogStore, Session};
use std::io::Write;

use super::find_dataset;
use crate::error::CliError;
use crate::render;

pub(crate) async fn run<S: CatalogStore, W: Write>(
    session: &Session<S>,
    dataset: &str,
    parameter: &str,
    out: &mut W,
) -> Result<(), CliError> {
    let catalog = session.catalog().await?;
    let dataset = find_dataset(&catalog, dataset)?;
    let parameter = dataset.parameter(parameter).ok_or_else(|| {
        BeaError::NotFound(format!("parameter '{parameter}' in dataset {}", dataset.name))
    })?;

    writeln!(
        out,
        "{}",
        render::banner(&format!("{} / {} Valid Inputs", dataset.name, parameter.name))
    )?;
    writeln!(out, "{}", render::valid_inputs_table(parameter))?;
    writeln!(out, "{} valid inputs", parameter.valid_inputs.len())?;
    Ok(())
}
