use bea::{CatalogStore, Session};
use std::io::Write;

use crate::error::CliError;
use crate::render;

pub(crate) async fn run<S: CatalogStore, W: Write>(
    session: &Session<S>,
    out: &mut W,
) -> Result<(), CliError> {
    let catalog = session.catalog().await?;
    writeln!(out, "{}", render::datasets_table(&catalog))?;
    writeln!(out, "{} datasets, catalog as of {}", catalog.datasets.len(), catalog.as_of)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{output, session};
    use bea::CannedTransport;

    #[tokio::test]
    async fn test_lists_cached_datasets_without_requests() {
        let (session, transport) = session(CannedTransport::new());
        let mut out = Vec::new();

        run(&session, &mut out).await.unwrap();

        let text = output(out);
        assert!(text.contains("Standard NIPA tables"));
        assert!(text.contains("Regional"));
        assert!(text.contains("2 datasets"));
        assert_eq!(transport.call_count(), 0);
    }
}
