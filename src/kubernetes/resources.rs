// Copyright 2026, The app-importer Authors
// SPDX-License-Identifier: Apache-2.0

//! Handles on the KubeSphere application resources

use crate::constants::api;
use kube::{
    api::{ApiResource, DynamicObject, GroupVersionKind},
    Api, Client,
};

pub fn application_resource() -> ApiResource {
    ApiResource::from_gvk_with_plural(
        &GroupVersionKind::gvk(api::GROUP, api::VERSION, api::APPLICATION_KIND),
        api::APPLICATION_PLURAL,
    )
}

pub fn version_resource() -> ApiResource {
    ApiResource::from_gvk_with_plural(
        &GroupVersionKind::gvk(api::GROUP, api::VERSION, api::VERSION_KIND),
        api::VERSION_PLURAL,
    )
}

/// Cluster-scoped APIs for applications and application versions, shared by
/// every reconciliation stage of a run
#[derive(Clone)]
pub struct CatalogResources {
    pub applications: Api<DynamicObject>,
    pub versions: Api<DynamicObject>,
}

impl CatalogResources {
    pub fn new(client: Client) -> Self {
        Self {
            applications: Api::all_with(client.clone(), &application_resource()),
            versions: Api::all_with(client, &version_resource()),
        }
    }
}
