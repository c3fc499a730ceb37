// Copyright 2026, The app-importer Authors
// SPDX-License-Identifier: Apache-2.0

//! Kubernetes client creation and application resource handles.

pub mod client;
pub mod resources;

pub use client::create_cluster_client;
pub use resources::CatalogResources;
