// Copyright 2026, The app-importer Authors
// SPDX-License-Identifier: Apache-2.0

//! Cluster client creation

use crate::error::{ImportError, Result};
use kube::{Client, Config as KConfig};
use tracing::{debug, info};

/// Create a client from the local kubeconfig or the in-cluster service account
pub async fn create_cluster_client() -> Result<Client> {
    let config = KConfig::infer()
        .await
        .map_err(|e| ImportError::ClientInitError(format!("Failed to infer config: {}", e)))?;
    debug!("Using cluster API at {}", config.cluster_url);

    let client = Client::try_from(config)
        .map_err(|e| ImportError::ClientInitError(format!("Failed to create client: {}", e)))?;

    info!("Cluster client initialized successfully");
    Ok(client)
}
