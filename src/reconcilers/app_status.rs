// Copyright 2026, The app-importer Authors
// SPDX-License-Identifier: Apache-2.0

//! Marks imported applications active.

use crate::error::Result;
use crate::kubernetes::CatalogResources;
use crate::policy::abort_on_error;
use crate::reconcilers::ReconcilerSelector;
use crate::types::application::{apply_status, ApplicationStatusUpdate};
use kube::{
    api::{DynamicObject, PostParams},
    Api, ResourceExt,
};
use tracing::{debug, error, instrument};

pub struct AppStatusReconciler {
    applications: Api<DynamicObject>,
    selector: ReconcilerSelector,
}

impl AppStatusReconciler {
    pub fn new(resources: &CatalogResources, selector: ReconcilerSelector) -> Self {
        Self {
            applications: resources.applications.clone(),
            selector,
        }
    }

    /// Set every matched application to `active` through the status subresource.
    /// Returns the number of updated applications.
    #[instrument(skip(self), fields(selector = %self.selector))]
    pub async fn run(&self) -> Result<usize> {
        let apps = self
            .applications
            .list(&self.selector.list_params())
            .await
            .inspect_err(|e| error!("Failed to list apps: {}", e))?;

        let updated = abort_on_error(apps.items, move |app| self.activate(app)).await?;
        Ok(updated.len())
    }

    async fn activate(&self, mut app: DynamicObject) -> Result<()> {
        let name = app.name_any();
        apply_status(&mut app, &ApplicationStatusUpdate::active_now())?;

        self.applications
            .replace_status(&name, &PostParams::default(), serde_json::to_vec(&app)?)
            .await
            .inspect_err(|e| error!("Failed to update status for app {}: {}", name, e))?;

        debug!("App {} is active", name);
        Ok(())
    }
}
