// Copyright 2026, The app-importer Authors
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use app_importer::config::{Cli, Config};
use app_importer::kubernetes::create_cluster_client;
use app_importer::pipeline;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_cli(cli).context("Failed to load configuration")?;
    info!("Starting to upload to {}", config.server_url);

    // Create Kubernetes client
    let client = create_cluster_client()
        .await
        .context("Failed to initialize cluster client")?;

    let summary = pipeline::run(&config, client).await.context("Import failed")?;
    info!(
        "Imported {} chart versions, published {} applications",
        summary.import.uploaded(),
        summary.reconcile.categorized_apps
    );

    Ok(())
}
