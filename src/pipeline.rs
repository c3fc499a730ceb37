// Copyright 2026, The app-importer Authors
// SPDX-License-Identifier: Apache-2.0

//! A complete import run: fetch the index, upload charts, publish the results.

use crate::catalog::CatalogClient;
use crate::chart::{ChartUploader, ImportReport, IndexFetcher};
use crate::config::Config;
use crate::error::Result;
use crate::kubernetes::CatalogResources;
use crate::reconcilers::{run_stages, ReconcileSummary};
use kube::Client;
use tracing::{info, instrument};

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub import: ImportReport,
    pub reconcile: ReconcileSummary,
}

/// Import every chart of the configured repository and publish the created applications.
/// Index and reconciliation failures end the run; single chart failures do not.
#[instrument(skip(config, client), fields(server = %config.server_url, repo = %config.repo_url))]
pub async fn run(config: &Config, client: Client) -> Result<RunSummary> {
    let resources = CatalogResources::new(client);

    // Chart downloads go through a client without catalog credentials
    let http = reqwest::Client::builder().build()?;
    let index = IndexFetcher::new(http.clone()).fetch(&config.repo_url).await?;

    let catalog = CatalogClient::new(config)?;
    let import = ChartUploader::new(catalog, http, config)
        .upload_all(&index)
        .await;

    let reconcile = run_stages(&resources).await?;
    info!(
        "Import finished: {} applications created, {} versions activated",
        import.applications_created(),
        reconcile.activated_versions
    );

    Ok(RunSummary { import, reconcile })
}
