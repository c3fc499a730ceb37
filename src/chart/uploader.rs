// Copyright 2026, The app-importer Authors
// SPDX-License-Identifier: Apache-2.0

//! Uploads chart versions from an index to the KubeSphere catalog.

use crate::catalog::{CatalogClient, UploadRequest};
use crate::config::Config;
use crate::error::{ImportError, Result};
use crate::policy::continue_on_error;
use crate::types::{ChartIndex, ChartIndexEntry};
use bytes::Bytes;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, instrument, warn};

/// Outcome of importing one chart
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageReport {
    pub name: String,
    /// Application created for the chart, if any upload succeeded
    pub app_name: Option<String>,
    pub uploaded: usize,
    pub failed: usize,
    /// Versions left out because the limit was already reached
    pub skipped: usize,
    /// Version at which a deprecated entry stopped the import
    pub deprecated_at: Option<String>,
}

impl PackageReport {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Default::default()
        }
    }
}

/// Outcome of the whole upload phase
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub packages: Vec<PackageReport>,
}

impl ImportReport {
    pub fn applications_created(&self) -> usize {
        self.packages.iter().filter(|p| p.app_name.is_some()).count()
    }

    pub fn uploaded(&self) -> usize {
        self.packages.iter().map(|p| p.uploaded).sum()
    }

    pub fn failed(&self) -> usize {
        self.packages.iter().map(|p| p.failed).sum()
    }

    pub fn package(&self, name: &str) -> Option<&PackageReport> {
        self.packages.iter().find(|p| p.name == name)
    }
}

/// Downloads chart archives and posts them to the catalog, at most `limit` per chart
pub struct ChartUploader {
    catalog: CatalogClient,
    http: reqwest::Client,
    limit: usize,
    upload_delay: Duration,
}

impl ChartUploader {
    /// `http` is used for chart downloads and carries no catalog credentials
    pub fn new(catalog: CatalogClient, http: reqwest::Client, config: &Config) -> Self {
        Self {
            catalog,
            http,
            limit: config.limit,
            upload_delay: config.upload_delay,
        }
    }

    /// Import every chart of the index. Failures of single versions are logged and skipped.
    pub async fn upload_all(&self, index: &ChartIndex) -> ImportReport {
        let mut report = ImportReport::default();

        for (name, entries) in &index.entries {
            report.packages.push(self.upload_package(name, entries).await);
        }

        info!(
            "Uploaded {} chart versions into {} applications, {} failed",
            report.uploaded(),
            report.applications_created(),
            report.failed()
        );
        report
    }

    #[instrument(skip(self, name, entries), fields(chart = %name))]
    pub async fn upload_package(&self, name: &str, entries: &[ChartIndexEntry]) -> PackageReport {
        let mut report = PackageReport::new(name);

        for entry in entries {
            if report.uploaded >= self.limit {
                report.skipped += 1;
                continue;
            }

            if entry.deprecated {
                warn!("App {} is deprecated, skip", entry.name);
                report.deprecated_at = Some(entry.version.clone());
                break;
            }

            let result = self.upload_entry(entry, report.app_name.as_deref()).await;
            let Some(app_name) = continue_on_error(result, |e| {
                error!("Failed to import chart {}:{}: {}", entry.name, entry.version, e)
            }) else {
                report.failed += 1;
                continue;
            };

            info!("App {}:{} posted successfully", entry.name, entry.version);
            report.uploaded += 1;

            // Versions can only be attached by name, and another create would duplicate the app
            let Some(app_name) = app_name else {
                warn!(
                    "Catalog created {} without returning its name, skipping remaining versions",
                    entry.name
                );
                break;
            };
            report.app_name.get_or_insert(app_name);

            if report.uploaded < self.limit && !self.upload_delay.is_zero() {
                sleep(self.upload_delay).await;
            }
        }

        if report.skipped > 0 {
            debug!("Skipped {} versions of {} over the limit", report.skipped, name);
        }
        report
    }

    /// Upload one version. The first upload of a chart creates the application,
    /// later ones attach to `app_name`. Returns the application the version belongs to,
    /// `None` when the catalog created one without naming it.
    async fn upload_entry(&self, entry: &ChartIndexEntry, app_name: Option<&str>) -> Result<Option<String>> {
        let payload = self.download_chart(entry).await?;
        let request = UploadRequest::helm_chart(&payload);

        match app_name {
            None => self.catalog.create_app(&request).await,
            Some(app_name) => {
                self.catalog.add_version(app_name, &request).await?;
                Ok(Some(app_name.to_string()))
            }
        }
    }

    async fn download_chart(&self, entry: &ChartIndexEntry) -> Result<Bytes> {
        let Some(url) = entry.download_url() else {
            return Err(ImportError::ChartFetchError {
                url: "<none>".to_string(),
                reason: "index entry has no URL".to_string(),
            });
        };

        debug!("Downloading chart {}:{} from {}", entry.name, entry.version, url);
        let response = self.http.get(url).send().await.map_err(|e| ImportError::ChartFetchError {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImportError::ChartFetchError {
                url: url.to_string(),
                reason: format!("status code: {}", status.as_u16()),
            });
        }

        response.bytes().await.map_err(|e| ImportError::ChartFetchError {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}
