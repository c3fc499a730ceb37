// Copyright 2026, The app-importer Authors
// SPDX-License-Identifier: Apache-2.0
use crate::reconcilers::Stage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Failed to read token: {0}")]
    TokenError(String),

    #[error("Failed to initialize cluster client: {0}")]
    ClientInitError(String),

    #[error("Chart index unavailable: {0}")]
    IndexUnavailable(String),

    #[error("Failed to parse chart index: {0}")]
    IndexParseError(String),

    #[error("Failed to fetch chart from {url}: {reason}")]
    ChartFetchError { url: String, reason: String },

    #[error("Catalog rejected upload, status code: {status}, body: {body}")]
    UploadRejected { status: u16, body: String },

    #[error("{stage} failed: {source}")]
    StageFailed {
        stage: Stage,
        #[source]
        source: Box<ImportError>,
    },
}

impl From<serde_yaml::Error> for ImportError {
    fn from(e: serde_yaml::Error) -> Self {
        ImportError::IndexParseError(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ImportError>;
