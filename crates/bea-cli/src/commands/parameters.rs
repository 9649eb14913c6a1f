use bea::{CatalogStore, Session};
use std::io::Write;

use super::find_dataset;
use crate::error::CliError;
use crate::render;

pub(crate) async fn run<S: CatalogStore, W: Write>(
    session: &Session<S>,
    dataset: &str,
    out: &mut W,
) -> Result<(), CliError> {
    let catalog = session.catalog().await?;
    let dataset = find_dataset(&catalog, dataset)?;
    writeln!(out, "{}", render::banner(&format!("{} Dataset Parameters", dataset.name)))?;
    writeln!(out, "{}", dataset.description)?;
    writeln!(out, "{}", render::parameters_table(dataset))?;
    Ok(())
}
