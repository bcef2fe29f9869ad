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

//! Core types and definitions for Lisq
//!
//! This module contains the fundamental types used throughout the crate:
//!
//! - [`SexpKind`] - semantic value kinds (nil, symbol, string, integer, float, list)
//! - [`SEntry`] / [`EntryKind`] - packed list-entry records for large lists
//! - [`Error`] / [`Result`] - error types for all operations
//! - Binary-format tag bytes and tunable constants

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{EntryKind, SEntry, SexpKind};
pub use types::{
    BLOOM_K, FORMAT_VERSION, MAX_DEPTH, MAX_KEYS, MAX_SYMBOLS, SHORT_STRING_MAX, SMALLINT_BIAS,
    SMALLINT_MAX, SMALLINT_MIN, SMALL_LIST_MAX, SMALL_SYMTAB_SIZE,
};
