// Copyright 2026, The app-importer Authors
// SPDX-License-Identifier: Apache-2.0

//! Client for the KubeSphere catalog ingestion API

use crate::config::Config;
use crate::constants::{api, upload, IMPORT_MARK};
use crate::error::{ImportError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

/// Body of an app or app version upload
#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub repo_name: String,
    /// Base64 encoded chart archive
    pub package: String,
    pub category_name: String,
    pub workspace: String,
    pub app_type: String,
}

impl UploadRequest {
    /// Upload of a Helm chart archive, tagged with the import mark
    pub fn helm_chart(payload: &[u8]) -> Self {
        Self {
            repo_name: upload::REPO_NAME.to_string(),
            package: STANDARD.encode(payload),
            category_name: IMPORT_MARK.to_string(),
            workspace: upload::WORKSPACE.to_string(),
            app_type: upload::APP_TYPE.to_string(),
        }
    }
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct UploadResponse {
    #[serde(default)]
    app_name: Option<String>,
}

/// Authenticated client for the app upload endpoints
#[derive(Clone, Debug)]
pub struct CatalogClient {
    http: reqwest::Client,
    server_url: String,
}

impl CatalogClient {
    pub fn new(config: &Config) -> Result<Self> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.token))
            .map_err(|e| ImportError::ConfigError(format!("Invalid token: {}", e)))?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.api_timeout)
            .build()?;

        Ok(Self {
            http,
            server_url: config.server_url.clone(),
        })
    }

    pub fn apps_url(&self) -> String {
        format!("{}{}", self.server_url, api::APPS_PATH)
    }

    pub fn versions_url(&self, app_name: &str) -> String {
        format!("{}{}/{}/versions", self.server_url, api::APPS_PATH, app_name)
    }

    /// Create a new application from its first chart version.
    /// Any 2xx answer means the application was created; the name is `None`
    /// when the response does not carry a usable `appName`.
    #[instrument(skip(self, request))]
    pub async fn create_app(&self, request: &UploadRequest) -> Result<Option<String>> {
        let response = self.post(&self.apps_url(), request).await?;
        let body = response.bytes().await?;

        let app_name = match serde_json::from_slice::<UploadResponse>(&body) {
            Ok(parsed) => parsed.app_name.filter(|name| !name.is_empty()),
            Err(e) => {
                warn!("Cannot decode create response: {}", e);
                None
            }
        };
        Ok(app_name)
    }

    /// Attach another chart version to an existing application
    #[instrument(skip(self, request))]
    pub async fn add_version(&self, app_name: &str, request: &UploadRequest) -> Result<()> {
        self.post(&self.versions_url(app_name), request).await?;
        Ok(())
    }

    async fn post(&self, url: &str, request: &UploadRequest) -> Result<reqwest::Response> {
        debug!("POST {}", url);
        let response = self.http.post(url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ImportError::UploadRejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(response)
    }
}
