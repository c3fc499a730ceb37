// Copyright 2026, The app-importer Authors
// SPDX-License-Identifier: Apache-2.0

//! Status and label updates applied to KubeSphere applications and versions.
//!
//! Records are handled as [`DynamicObject`]s so that a full update sends back
//! every field the server returned, including the ones modelled nowhere here.

use crate::constants::ADMIN_USER;
use crate::error::Result;
use chrono::{SecondsFormat, Utc};
use kube::api::DynamicObject;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

/// Lifecycle state of an application or application version
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppState {
    Draft,
    Submitted,
    Passed,
    Rejected,
    Active,
    Suspended,
}

impl AppState {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppState::Draft => "draft",
            AppState::Submitted => "submitted",
            AppState::Passed => "passed",
            AppState::Rejected => "rejected",
            AppState::Active => "active",
            AppState::Suspended => "suspended",
        }
    }
}

impl fmt::Display for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status fields written on an application
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationStatusUpdate {
    pub state: AppState,
    pub update_time: String,
}

impl ApplicationStatusUpdate {
    pub fn active_now() -> Self {
        Self {
            state: AppState::Active,
            update_time: timestamp_now(),
        }
    }
}

/// Status fields written on an application version
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct VersionStatusUpdate {
    pub state: AppState,
    pub user_name: String,
    pub updated: String,
}

impl VersionStatusUpdate {
    pub fn active_now() -> Self {
        Self {
            state: AppState::Active,
            user_name: ADMIN_USER.to_string(),
            updated: timestamp_now(),
        }
    }
}

/// Current UTC time in RFC 3339 with second precision
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Write the fields of `update` into `.status` of the object, keeping any other status fields
pub fn apply_status<T: Serialize>(obj: &mut DynamicObject, update: &T) -> Result<()> {
    let Value::Object(fields) = serde_json::to_value(update)? else {
        return Ok(());
    };

    if !obj.data.is_object() {
        obj.data = Value::Object(Map::new());
    }
    let Some(data) = obj.data.as_object_mut() else {
        return Ok(());
    };

    let status = data
        .entry("status")
        .or_insert_with(|| Value::Object(Map::new()));
    if !status.is_object() {
        *status = Value::Object(Map::new());
    }
    if let Some(status) = status.as_object_mut() {
        status.extend(fields);
    }

    Ok(())
}

/// Merge `labels` into the object labels; existing keys are overwritten, others kept
pub fn merge_labels(obj: &mut DynamicObject, labels: &BTreeMap<String, String>) {
    obj.metadata
        .labels
        .get_or_insert_with(BTreeMap::new)
        .extend(labels.iter().map(|(k, v)| (k.clone(), v.clone())));
}
