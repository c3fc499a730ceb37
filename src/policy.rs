// Copyright 2026, The app-importer Authors
// SPDX-License-Identifier: Apache-2.0

//! Error policies for the two kinds of loops in an import run.
//!
//! Uploads are best effort: one broken chart must not stop the rest of the
//! catalog from being imported. Reconciliation stages are fail fast: later
//! stages rely on every record having gone through the earlier ones.

use crate::error::{ImportError, Result};
use std::future::Future;

/// Absorb a failed step. The error is handed to `report` and `None` is
/// returned so the caller moves on to its next item.
pub fn continue_on_error<T>(result: Result<T>, report: impl FnOnce(&ImportError)) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            report(&e);
            None
        }
    }
}

/// Run `op` on every item in order, stopping at the first failure.
/// Returns the output of every processed item.
pub async fn abort_on_error<I, F, Fut, T>(items: I, mut op: F) -> Result<Vec<T>>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let mut outputs = Vec::new();
    for item in items {
        outputs.push(op(item).await?);
    }
    Ok(outputs)
}
