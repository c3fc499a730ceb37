// Copyright 2026, The app-importer Authors
// SPDX-License-Identifier: Apache-2.0

//! Merges labels into imported applications.

use crate::constants::{labels, UNCATEGORIZED};
use crate::error::Result;
use crate::kubernetes::CatalogResources;
use crate::policy::abort_on_error;
use crate::reconcilers::ReconcilerSelector;
use crate::types::application::merge_labels;
use kube::{
    api::{DynamicObject, PostParams},
    Api, ResourceExt,
};
use std::collections::BTreeMap;
use tracing::{debug, error, instrument};

/// Labels publishing an application in the app store
pub fn store_labels() -> BTreeMap<String, String> {
    BTreeMap::from([(labels::APP_STORE.to_string(), "true".to_string())])
}

/// Labels moving an application into the uncategorized category
pub fn uncategorized_labels() -> BTreeMap<String, String> {
    BTreeMap::from([(labels::CATEGORY.to_string(), UNCATEGORIZED.to_string())])
}

pub struct LabelPatcher {
    applications: Api<DynamicObject>,
    selector: ReconcilerSelector,
    labels: BTreeMap<String, String>,
}

impl LabelPatcher {
    pub fn new(
        resources: &CatalogResources,
        selector: ReconcilerSelector,
        labels: BTreeMap<String, String>,
    ) -> Self {
        Self {
            applications: resources.applications.clone(),
            selector,
            labels,
        }
    }

    /// Merge the labels into every matched application with a full update.
    /// Labels not named in the patch are kept. Returns the number of updated applications.
    #[instrument(skip(self), fields(selector = %self.selector))]
    pub async fn run(&self) -> Result<usize> {
        let apps = self
            .applications
            .list(&self.selector.list_params())
            .await
            .inspect_err(|e| error!("Failed to list apps: {}", e))?;

        let updated = abort_on_error(apps.items, move |app| self.patch(app)).await?;
        Ok(updated.len())
    }

    async fn patch(&self, mut app: DynamicObject) -> Result<()> {
        let name = app.name_any();
        merge_labels(&mut app, &self.labels);

        self.applications
            .replace(&name, &PostParams::default(), &app)
            .await
            .inspect_err(|e| error!("Failed to update labels for app {}: {}", name, e))?;

        debug!("Updated labels of app {}", name);
        Ok(())
    }
}
