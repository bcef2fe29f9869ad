// Copyright 2025 Lisq Contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Semantic operations over binary s-expressions
//!
//! - [`access`] - car, cdr, nth, length, child extraction
//! - [`eq`] - semantic equality
//! - [`hash`] - element/value hashing and Bloom signatures
//! - [`contains`] - structural containment
//! - [`contains_key`] - key-based containment
//! - [`matcher`] - pattern matching
//!
//! Every operation is symbol-table independent: two values with the same
//! semantic content but different intern tables compare equal, hash equal,
//! and contain each other the same way.

pub mod access;
pub mod contains;
pub mod contains_key;
pub mod eq;
pub mod hash;
pub mod matcher;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::core::{Error, Result};

/// Per-operation execution context
///
/// Carries the host's cancellation flag. Long scans (containment, index
/// key extraction) poll it at least once per visited list child and abort
/// with [`Error::Cancelled`]. The default context never cancels.
#[derive(Debug, Clone, Default)]
pub struct OpContext {
    cancelled: Arc<AtomicBool>,
}

impl OpContext {
    pub fn new() -> OpContext {
        OpContext::default()
    }

    /// Handle the host can use to cancel from another thread
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle(Arc::clone(&self.cancelled))
    }

    /// Has the host requested cancellation?
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Abort the current operation if cancellation was requested
    #[inline]
    pub(crate) fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            Err(Error::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Cloneable cancellation handle for an [`OpContext`]
#[derive(Debug, Clone)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    /// Request cancellation of the associated operations
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}
