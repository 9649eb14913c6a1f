//! Sequential catalog builder.

use bea_client::BeaClient;
use bea_core::{Catalog, Dataset, Result};
use chrono::{Local, NaiveDate};
use std::time::Instant;
use tracing::{debug, info, instrument};

use crate::parse::{parse_datasets, parse_parameters, parse_valid_inputs};

/// Fetches the complete catalog through one client.
///
/// Requests are issued one at a time: the dataset list, then for each
/// dataset its parameter list followed by one value list per parameter. Any
/// failed request aborts the whole build; no partial catalog is returned.
#[derive(Debug, Clone, Copy)]
pub struct CatalogBuilder<'a> {
    client: &'a BeaClient,
}

impl<'a> CatalogBuilder<'a> {
    /// Creates a builder issuing requests through `client`.
    #[must_use]
    pub const fn new(client: &'a BeaClient) -> Self {
        Self { client }
    }

    /// Builds the catalog, stamped with today's local date.
    ///
    /// # Errors
    /// Returns the first request or parse error encountered.
    pub async fn build(&self) -> Result<Catalog> {
        self.build_as_of(Local::now().date_naive()).await
    }

    /// Builds the catalog, stamped with `as_of`.
    ///
    /// # Errors
    /// Returns the first request or parse error encountered.
    #[instrument(skip(self))]
    pub async fn build_as_of(&self, as_of: NaiveDate) -> Result<Catalog> {
        let started = Instant::now();

        let mut datasets = parse_datasets(&self.client.dataset_list().await?)?;
        info!(datasets = datasets.len(), "Fetched dataset list");

        for dataset in &mut datasets {
            self.fill(dataset).await?;
        }

        let catalog = Catalog::new(as_of, datasets);
        info!(
            datasets = catalog.datasets.len(),
            requests = catalog.request_cost(),
            elapsed_secs = started.elapsed().as_secs_f64(),
            "Catalog built"
        );
        Ok(catalog)
    }

    /// Fetches the parameters of `dataset` and the valid inputs of each.
    async fn fill(&self, dataset: &mut Dataset) -> Result<()> {
        let doc = self.client.parameter_list(&dataset.name).await?;
        dataset.parameters = parse_parameters(&doc)?;
        info!(
            dataset = %dataset.name,
            parameters = dataset.parameters.len(),
            "Fetching parameter values"
        );

        for parameter in &mut dataset.parameters {
            let doc = self
                .client
                .parameter_values(&dataset.name, &parameter.name)
                .await?;
            parameter.valid_inputs = parse_valid_inputs(&dataset.name, &parameter.name, &doc)?;
            debug!(
                dataset = %dataset.name,
                parameter = %parameter.name,
                inputs = parameter.valid_inputs.len(),
                "Parsed valid inputs"
            );
        }
        Ok(())
    }
}
