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

//! Inverted-index support
//!
//! - [`keys`] - integer-key extraction from stored values and queries
//! - [`consistent`] - candidate predicates driving index probes
//!
//! The contract with the host index: a stored value is a candidate iff
//! the query's keys are a subset of the value's keys, and candidates are
//! confirmed by rerunning the containment operator itself (the recheck).

pub mod consistent;
pub mod keys;

pub use consistent::{consistent, triconsistent, Consistency, Strategy, Ternary};
pub use keys::{extract_query_keys, extract_value_keys, QueryKeys, SearchMode};
