// Copyright 2026, The app-importer Authors
// SPDX-License-Identifier: Apache-2.0
pub mod catalog;
pub mod chart;
pub mod config;
pub mod constants;
pub mod error;
pub mod kubernetes;
pub mod pipeline;
pub mod policy;
pub mod reconcilers;
pub mod types;

#[cfg(test)]
pub mod test_utils;
