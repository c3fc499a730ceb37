// Copyright 2026, The app-importer Authors
// SPDX-License-Identifier: Apache-2.0
use crate::constants::{timing, SERVICE_ACCOUNT_TOKEN_PATH};
use crate::error::{ImportError, Result};
use clap::Parser;
use std::path::Path;
use std::time::Duration;
use tracing::info;
use url::Url;

/// Import Helm charts from a chart repository into the KubeSphere app store
#[derive(Debug, Clone, Parser)]
#[command(name = "app-importer", version)]
pub struct Cli {
    /// KubeSphere server URL
    #[arg(long, env = "APP_IMPORTER_SERVER")]
    pub server: String,

    /// Helm chart repository URL
    #[arg(long, env = "APP_IMPORTER_REPO")]
    pub repo: String,

    /// Bearer token for the KubeSphere API, read from the service account when unset
    #[arg(long, env = "APP_IMPORTER_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Number of versions imported per chart
    #[arg(long, env = "APP_IMPORTER_LIMIT", default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
    pub limit: u32,
}

/// Run configuration, built once at startup
#[derive(Debug, Clone)]
pub struct Config {
    /// KubeSphere server URL, without trailing slash
    pub server_url: String,
    pub repo_url: Url,
    pub token: String,
    /// Maximum number of successful uploads per chart
    pub limit: usize,
    pub api_timeout: Duration,
    pub upload_delay: Duration,
}

impl Config {
    /// Build the configuration from parsed command line arguments
    pub fn from_cli(cli: Cli) -> Result<Self> {
        let token = resolve_token(cli.token, Path::new(SERVICE_ACCOUNT_TOKEN_PATH))?;
        Self::new(&cli.server, &cli.repo, token, cli.limit as usize)
    }

    pub fn new(server: &str, repo: &str, token: String, limit: usize) -> Result<Self> {
        let server_url = Url::parse(server)
            .map_err(|e| ImportError::ConfigError(format!("Invalid server URL {}: {}", server, e)))?;
        let repo_url = Url::parse(repo)
            .map_err(|e| ImportError::ConfigError(format!("Invalid repo URL {}: {}", repo, e)))?;

        if limit == 0 {
            return Err(ImportError::ConfigError("limit must be at least 1".to_string()));
        }

        Ok(Config {
            server_url: server_url.as_str().trim_end_matches('/').to_string(),
            repo_url,
            token,
            limit,
            api_timeout: Duration::from_secs(timing::API_TIMEOUT_SECS),
            upload_delay: Duration::from_millis(timing::UPLOAD_DELAY_MILLIS),
        })
    }
}

/// Use the explicit token unless it is blank, otherwise read it from `fallback`
pub fn resolve_token(explicit: Option<String>, fallback: &Path) -> Result<String> {
    match explicit.as_deref().map(str::trim) {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => {
            info!("Using token from {}", fallback.display());
            read_token(fallback)
        }
    }
}

/// Read a bearer token from a file, dropping surrounding whitespace
pub fn read_token(path: &Path) -> Result<String> {
    let data = std::fs::read_to_string(path)
        .map_err(|e| ImportError::TokenError(format!("{}: {}", path.display(), e)))?;

    let token = data.trim();
    if token.is_empty() {
        return Err(ImportError::TokenError(format!("{} is empty", path.display())));
    }

    Ok(token.to_string())
}
