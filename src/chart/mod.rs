// Copyright 2026, The app-importer Authors
// SPDX-License-Identifier: Apache-2.0

//! Helm repository index retrieval and chart upload.

pub mod index;
pub mod uploader;

pub use index::IndexFetcher;
pub use uploader::{ChartUploader, ImportReport, PackageReport};
