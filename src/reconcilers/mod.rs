// Copyright 2026, The app-importer Authors
// SPDX-License-Identifier: Apache-2.0

//! Reconciliation stages that publish the applications created by an import.
//!
//! Every stage selects the applications by the import mark in their category
//! label, so the stage rewriting that label has to run last.

pub mod app_status;
pub mod labels;
pub mod selector;
pub mod version_status;

pub use app_status::AppStatusReconciler;
pub use labels::{store_labels, uncategorized_labels, LabelPatcher};
pub use selector::ReconcilerSelector;
pub use version_status::VersionStatusReconciler;

use crate::error::{ImportError, Result};
use crate::kubernetes::CatalogResources;
use std::fmt;
use std::future::Future;
use tracing::{error, info};

/// The reconciliation stages, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    AppStatus,
    StoreLabel,
    VersionStatus,
    CategoryLabel,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::AppStatus,
        Stage::StoreLabel,
        Stage::VersionStatus,
        Stage::CategoryLabel,
    ];

    /// 1-based position of the stage
    pub fn position(&self) -> usize {
        match self {
            Stage::AppStatus => 1,
            Stage::StoreLabel => 2,
            Stage::VersionStatus => 3,
            Stage::CategoryLabel => 4,
        }
    }

    fn description(&self) -> &'static str {
        match self {
            Stage::AppStatus => "update app status",
            Stage::StoreLabel => "update app store label",
            Stage::VersionStatus => "update version status",
            Stage::CategoryLabel => "update app category label",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}/{}] {}",
            self.position(),
            Stage::ALL.len(),
            self.description()
        )
    }
}

/// Number of records updated by each stage
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileSummary {
    pub activated_apps: usize,
    pub published_apps: usize,
    pub activated_versions: usize,
    pub categorized_apps: usize,
}

/// Run all stages in order, stopping at the first one that fails
pub async fn run_stages(resources: &CatalogResources) -> Result<ReconcileSummary> {
    let selector = ReconcilerSelector::imported_applications();

    let activated_apps = run_stage(
        Stage::AppStatus,
        AppStatusReconciler::new(resources, selector.clone()).run(),
    )
    .await?;

    let published_apps = run_stage(
        Stage::StoreLabel,
        LabelPatcher::new(resources, selector.clone(), store_labels()).run(),
    )
    .await?;

    let activated_versions = run_stage(
        Stage::VersionStatus,
        VersionStatusReconciler::new(resources, selector.clone()).run(),
    )
    .await?;

    let categorized_apps = run_stage(
        Stage::CategoryLabel,
        LabelPatcher::new(resources, selector, uncategorized_labels()).run(),
    )
    .await?;

    Ok(ReconcileSummary {
        activated_apps,
        published_apps,
        activated_versions,
        categorized_apps,
    })
}

async fn run_stage(stage: Stage, run: impl Future<Output = Result<usize>>) -> Result<usize> {
    match run.await {
        Ok(updated) => {
            info!("{} completed successfully, {} updated", stage, updated);
            Ok(updated)
        }
        Err(e) => {
            error!("{} failed: {}", stage, e);
            Err(ImportError::StageFailed {
                stage,
                source: Box::new(e),
            })
        }
    }
}
