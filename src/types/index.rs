// Copyright 2026, The app-importer Authors
// SPDX-License-Identifier: Apache-2.0
use serde::Deserialize;
use std::collections::BTreeMap;

/// A Helm repository index (`index.yaml`)
#[derive(Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct ChartIndex {
    #[serde(default)]
    pub api_version: Option<String>,
    /// Chart versions grouped by chart name, in index order within a group
    #[serde(default)]
    pub entries: BTreeMap<String, Vec<ChartIndexEntry>>,
}

/// A single chart version listed in the index
#[derive(Deserialize, Clone, Debug, PartialEq)]
pub struct ChartIndexEntry {
    pub name: String,
    pub version: String,
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(default)]
    pub deprecated: bool,
}

impl ChartIndex {
    /// Total number of chart versions across all packages
    pub fn version_count(&self) -> usize {
        self.entries.values().map(Vec::len).sum()
    }
}

impl ChartIndexEntry {
    /// The URL the chart archive is downloaded from
    pub fn download_url(&self) -> Option<&str> {
        self.urls.first().map(String::as_str)
    }
}
