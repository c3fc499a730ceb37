// Copyright 2026, The app-importer Authors
// SPDX-License-Identifier: Apache-2.0

//! Chart index entries and KubeSphere application records.

pub mod application;
pub mod index;

pub use application::{AppState, ApplicationStatusUpdate, VersionStatusUpdate};
pub use index::{ChartIndex, ChartIndexEntry};
