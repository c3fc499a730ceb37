// Copyright 2026, The app-importer Authors
// SPDX-License-Identifier: Apache-2.0

/// Label keys on KubeSphere application resources
pub mod labels {
    /// Category of an application; also carries the import mark during a run
    pub const CATEGORY: &str = "application.kubesphere.io/app-category-name";
    /// Set to "true" to publish an application in the app store
    pub const APP_STORE: &str = "application.kubesphere.io/app-store";
    /// Parent application of an application version
    pub const APP_ID: &str = "application.kubesphere.io/app-id";
}

/// Category assigned to every application created by this run until the last stage
pub const IMPORT_MARK: &str = "openpitrix-import";

/// Category imported applications end up in
pub const UNCATEGORIZED: &str = "kubesphere-app-uncategorized";

/// Identity recorded as the updater of reconciled versions
pub const ADMIN_USER: &str = "admin";

/// Token mounted for the KubeSphere service account
pub const SERVICE_ACCOUNT_TOKEN_PATH: &str = "/var/run/secrets/kubesphere.io/serviceaccount/token";

/// KubeSphere application API group
pub mod api {
    pub const GROUP: &str = "application.kubesphere.io";
    pub const VERSION: &str = "v2";
    pub const APPLICATION_KIND: &str = "Application";
    pub const APPLICATION_PLURAL: &str = "applications";
    pub const VERSION_KIND: &str = "ApplicationVersion";
    pub const VERSION_PLURAL: &str = "applicationversions";
    /// Path of the catalog ingestion endpoint, relative to the server URL
    pub const APPS_PATH: &str = "/kapis/application.kubesphere.io/v2/apps";
}

/// Upload request field values
pub mod upload {
    pub const REPO_NAME: &str = "upload";
    pub const APP_TYPE: &str = "helm";
    /// Empty workspace makes the application global
    pub const WORKSPACE: &str = "";
}

/// Request pacing and timeouts
pub mod timing {
    /// Timeout for every call to the catalog ingestion API
    pub const API_TIMEOUT_SECS: u64 = 5;
    /// Pause after each successful upload
    pub const UPLOAD_DELAY_MILLIS: u64 = 200;
}
