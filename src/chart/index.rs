// Copyright 2026, The app-importer Authors
// SPDX-License-Identifier: Apache-2.0

//! Download and parse a Helm repository index

use crate::error::{ImportError, Result};
use crate::types::ChartIndex;
use tracing::{debug, info, instrument, warn};
use url::Url;

const INDEX_FILE: &str = "index.yaml";

/// Fetches `index.yaml` from a chart repository
#[derive(Clone, Debug)]
pub struct IndexFetcher {
    http: reqwest::Client,
}

impl IndexFetcher {
    pub fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Download and parse the index of the repository at `repo_url`.
    /// Chart URLs in the returned index are absolute.
    #[instrument(skip(self), fields(repo = %repo_url))]
    pub async fn fetch(&self, repo_url: &Url) -> Result<ChartIndex> {
        let url = index_url(repo_url)?;
        info!("Downloading chart index from {}", url);

        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .map_err(|e| ImportError::IndexUnavailable(format!("{}: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ImportError::IndexUnavailable(format!(
                "{}: status code {}",
                url,
                status.as_u16()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| ImportError::IndexUnavailable(format!("{}: {}", url, e)))?;

        let index = parse_index(&body, &url)?;
        info!(
            "Loaded chart index with {} charts and {} versions",
            index.entries.len(),
            index.version_count()
        );

        Ok(index)
    }
}

/// Location of the index file for a repository URL.
/// A URL pointing at a YAML file is taken as the index itself.
/// The query of the repository URL is kept on the index URL.
pub fn index_url(repo_url: &Url) -> Result<Url> {
    let path = repo_url.path();
    if path.ends_with(".yaml") || path.ends_with(".yml") {
        return Ok(repo_url.clone());
    }

    let mut base = repo_url.clone();
    if !path.ends_with('/') {
        base.set_path(&format!("{}/", path));
    }

    let mut url = base
        .join(INDEX_FILE)
        .map_err(|e| ImportError::IndexUnavailable(format!("{}: {}", repo_url, e)))?;
    url.set_query(repo_url.query());
    Ok(url)
}

/// Parse index YAML, resolving relative chart URLs against `index_url`
pub fn parse_index(data: &[u8], index_url: &Url) -> Result<ChartIndex> {
    let mut index: ChartIndex = serde_yaml::from_slice(data)?;

    if index.api_version.as_deref().map_or(true, str::is_empty) {
        return Err(ImportError::IndexParseError(
            "no API version specified".to_string(),
        ));
    }

    for entries in index.entries.values_mut() {
        for entry in entries.iter_mut() {
            for url in entry.urls.iter_mut() {
                match index_url.join(url.as_str()) {
                    Ok(resolved) => *url = resolved.into(),
                    Err(e) => warn!("Cannot resolve chart URL {} for {}: {}", url, entry.name, e),
                }
            }
        }
    }

    debug!("Parsed index with {} charts", index.entries.len());
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const INDEX: &str = r#"
apiVersion: v1
entries:
  nginx:
    - name: nginx
      version: 15.1.0
      urls:
        - charts/nginx-15.1.0.tgz
    - name: nginx
      version: 15.0.0
      urls:
        - https://mirror.example.com/nginx-15.0.0.tgz
"#;

    #[test]
    fn test_index_url_appends_index_file() {
        let repo = Url::parse("https://charts.example.com/stable").unwrap();
        assert_eq!(
            index_url(&repo).unwrap().as_str(),
            "https://charts.example.com/stable/index.yaml"
        );

        let repo = Url::parse("https://charts.example.com/stable/").unwrap();
        assert_eq!(
            index_url(&repo).unwrap().as_str(),
            "https://charts.example.com/stable/index.yaml"
        );
    }

    #[test]
    fn test_index_url_keeps_query() {
        let repo = Url::parse("https://charts.example.com/stable?token=abc").unwrap();
        assert_eq!(
            index_url(&repo).unwrap().as_str(),
            "https://charts.example.com/stable/index.yaml?token=abc"
        );
    }

    #[test]
    fn test_index_url_keeps_explicit_yaml() {
        let repo = Url::parse("https://charts.example.com/stable/index.yaml").unwrap();
        assert_eq!(index_url(&repo).unwrap(), repo);
    }

    #[test]
    fn test_parse_index_resolves_relative_urls() {
        let base = Url::parse("https://charts.example.com/stable/index.yaml").unwrap();
        let index = parse_index(INDEX.as_bytes(), &base).unwrap();

        let nginx = &index.entries["nginx"];
        assert_eq!(
            nginx[0].download_url(),
            Some("https://charts.example.com/stable/charts/nginx-15.1.0.tgz")
        );
        assert_eq!(
            nginx[1].download_url(),
            Some("https://mirror.example.com/nginx-15.0.0.tgz")
        );
    }

    #[test]
    fn test_parse_index_requires_api_version() {
        let base = Url::parse("https://charts.example.com/index.yaml").unwrap();
        let result = parse_index(b"entries: {}\n", &base);

        assert!(matches!(result, Err(ImportError::IndexParseError(_))));
    }

    #[test]
    fn test_parse_index_rejects_invalid_yaml() {
        let base = Url::parse("https://charts.example.com/index.yaml").unwrap();
        let result = parse_index(b"apiVersion: v1\nentries: [not, a, map]\n", &base);

        assert!(matches!(result, Err(ImportError::IndexParseError(_))));
    }

    #[tokio::test]
    async fn test_fetch_downloads_index() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/stable/index.yaml"))
            .respond_with(ResponseTemplate::new(200).set_body_string(INDEX))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = IndexFetcher::new(reqwest::Client::new());
        let repo = Url::parse(&format!("{}/stable", server.uri())).unwrap();
        let index = fetcher.fetch(&repo).await.unwrap();

        assert_eq!(index.version_count(), 2);
        assert_eq!(
            index.entries["nginx"][0].download_url(),
            Some(format!("{}/stable/charts/nginx-15.1.0.tgz", server.uri()).as_str())
        );
    }

    #[tokio::test]
    async fn test_fetch_missing_index_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let fetcher = IndexFetcher::new(reqwest::Client::new());
        let repo = Url::parse(&server.uri()).unwrap();
        let result = fetcher.fetch(&repo).await;

        assert!(matches!(result, Err(ImportError::IndexUnavailable(_))));
    }

    #[tokio::test]
    async fn test_fetch_unreachable_repo_is_unavailable() {
        let fetcher = IndexFetcher::new(reqwest::Client::new());
        let repo = Url::parse("http://127.0.0.1:1/charts").unwrap();
        let result = fetcher.fetch(&repo).await;

        assert!(matches!(result, Err(ImportError::IndexUnavailable(_))));
    }
}
