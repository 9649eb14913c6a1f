mod browse;
mod datasets;
mod download;
mod parameters;
mod refresh;
mod values;

use bea::{BeaError, Catalog, CatalogStore, Dataset, FileStore, InMemoryStore, Session};

use crate::cli::Command;
use crate::config::Settings;
use crate::error::CliError;

pub(crate) async fn run(command: &Command, settings: &Settings) -> Result<(), CliError> {
    let client = settings.client()?;
    if settings.no_cache {
        dispatch(command, &Session::new(client, InMemoryStore::new())).await
    } else {
        let store = FileStore::new(settings.cache_file.clone());
        dispatch(command, &Session::new(client, store)).await
    }
}

async fn dispatch<S: CatalogStore>(command: &Command, session: &Session<S>) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    match command {
        Command::Datasets => datasets::run(session, &mut out).await,
        Command::Parameters { dataset } => parameters::run(session, dataset, &mut out).await,
        Command::Values { dataset, parameter } => {
            values::run(session, dataset, parameter, &mut out).await
        }
        Command::Browse => {
            drop(out);
            browse::run(session).await
        }
        Command::Refresh => refresh::run(session, &mut out).await,
        Command::Download(args) => download::run(session, args, &mut out).await,
    }
}

fn find_dataset<'a>(catalog: &'a Catalog, name: &str) -> Result<&'a Dataset, CliError> {
    catalog
        .dataset(name)
        .ok_or_else(|| BeaError::NotFound(format!("dataset '{name}'")).into())
}
