use bea::{CatalogStore, Session};
use std::io::Write;

use crate::error::CliError;

pub(crate) async fn run<S: CatalogStore, W: Write>(
    session: &Session<S>,
    out: &mut W,
) -> Result<(), CliError> {
    let catalog = session.refresh().await?;
    writeln!(
        out,
        "Catalog rebuilt: {} datasets as of {} ({} requests), stored in {}",
        catalog.datasets.len(),
        catalog.as_of,
        catalog.request_cost(),
        session.cache().store().location()
    )?;
    Ok(())
}
