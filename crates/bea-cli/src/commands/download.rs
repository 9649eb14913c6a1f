use bea::{CatalogStore, DataRequest, Session};
use polars::prelude::*;
use std::fs::File;
use std::io::{BufWriter, Write};
use tracing::info;

use crate::cli::{DownloadArgs, ExportFormat};
use crate::error::CliError;

pub(crate) async fn run<S: CatalogStore, W: Write>(
    session: &Session<S>,
    args: &DownloadArgs,
    out: &mut W,
) -> Result<(), CliError> {
    let request = args
        .params
        .iter()
        .try_fold(DataRequest::new(args.dataset.trim()), |request, param| {
            request.assignment(param)
        })?;

    let rows = match args.format {
        ExportFormat::Json => {
            let doc = session.fetch_data(&request).await?;
            let mut writer = BufWriter::new(File::create(&args.output)?);
            serde_json::to_writer_pretty(&mut writer, &doc)?;
            writer.flush()?;
            bea::data_rows(&doc)?.len()
        }
        ExportFormat::Csv => {
            let mut frame = session.fetch_frame(&request).await?;
            let mut file = File::create(&args.output)?;
            CsvWriter::new(&mut file).include_header(true).finish(&mut frame)?;
            frame.height()
        }
        ExportFormat::Parquet => {
            let mut frame = session.fetch_frame(&request).await?;
            let file = File::create(&args.output)?;
            ParquetWriter::new(file).finish(&mut frame)?;
            frame.height()
        }
    };

    info!(
        dataset = %request.dataset,
        rows,
        path = %args.output.display(),
        "Download complete"
    );
    writeln!(out, "Wrote {rows} rows to {}", args.output.display())?;
    Ok(())
}
