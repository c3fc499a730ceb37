// Copyright 2026, The app-importer Authors
// SPDX-License-Identifier: Apache-2.0

//! Marks the versions of imported applications active.

use crate::error::Result;
use crate::kubernetes::CatalogResources;
use crate::policy::abort_on_error;
use crate::reconcilers::ReconcilerSelector;
use crate::types::application::{apply_status, VersionStatusUpdate};
use kube::{
    api::{DynamicObject, PostParams},
    Api, ResourceExt,
};
use tracing::{debug, error, instrument};

pub struct VersionStatusReconciler {
    applications: Api<DynamicObject>,
    versions: Api<DynamicObject>,
    selector: ReconcilerSelector,
}

impl VersionStatusReconciler {
    pub fn new(resources: &CatalogResources, selector: ReconcilerSelector) -> Self {
        Self {
            applications: resources.applications.clone(),
            versions: resources.versions.clone(),
            selector,
        }
    }

    /// Set every version of every matched application to `active`, recording the admin as updater.
    /// Returns the number of updated versions.
    #[instrument(skip(self), fields(selector = %self.selector))]
    pub async fn run(&self) -> Result<usize> {
        let apps = self
            .applications
            .list(&self.selector.list_params())
            .await
            .inspect_err(|e| error!("Failed to list apps: {}", e))?;

        let per_app = abort_on_error(apps.items, move |app| self.activate_versions_of(app)).await?;
        Ok(per_app.into_iter().sum())
    }

    async fn activate_versions_of(&self, app: DynamicObject) -> Result<usize> {
        let name = app.name_any();
        let app_name = name.as_str();
        let versions = self
            .versions
            .list(&ReconcilerSelector::versions_of(app_name).list_params())
            .await
            .inspect_err(|e| error!("Failed to list versions for app {}: {}", app_name, e))?;

        let updated =
            abort_on_error(versions.items, move |version| self.activate(app_name, version)).await?;
        debug!("Activated {} versions of app {}", updated.len(), app_name);
        Ok(updated.len())
    }

    async fn activate(&self, app_name: &str, mut version: DynamicObject) -> Result<()> {
        let name = version.name_any();
        apply_status(&mut version, &VersionStatusUpdate::active_now())?;

        self.versions
            .replace_status(&name, &PostParams::default(), serde_json::to_vec(&version)?)
            .await
            .inspect_err(|e| {
                error!("Failed to update version status {} for app {}: {}", name, app_name, e)
            })?;

        Ok(())
    }
}
