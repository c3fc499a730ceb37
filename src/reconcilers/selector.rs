// Copyright 2026, The app-importer Authors
// SPDX-License-Identifier: Apache-2.0

//! Label selectors scoping the reconciliation stages

use crate::constants::{labels, IMPORT_MARK};
use kube::api::ListParams;
use std::fmt;

/// An equality label selector, `key=value`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReconcilerSelector {
    key: String,
    value: String,
}

impl ReconcilerSelector {
    pub fn new(key: &str, value: &str) -> Self {
        Self {
            key: key.to_string(),
            value: value.to_string(),
        }
    }

    /// Applications created by this run, identified by the import mark in their category label
    pub fn imported_applications() -> Self {
        Self::new(labels::CATEGORY, IMPORT_MARK)
    }

    /// Versions belonging to the application `app_name`
    pub fn versions_of(app_name: &str) -> Self {
        Self::new(labels::APP_ID, app_name)
    }

    pub fn list_params(&self) -> ListParams {
        ListParams::default().labels(&self.to_string())
    }
}

impl fmt::Display for ReconcilerSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={}", self.key, self.value)
    }
}
