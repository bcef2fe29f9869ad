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

//! # Lisq - Indexable binary S-expressions
//!
//! Lisq is a compact, indexable binary representation of S-expressions
//! (Lisp-style nested values of atoms and lists) built to live inside a
//! host relational database: parse once, store the bytes, and run fast
//! queries against them.
//!
//! ## Key Features
//!
//! - **Compact self-describing layout** - per-value symbol interning,
//!   tag-packed atoms, and two list formats balancing size against O(1)
//!   random access
//! - **Symbol-table independent semantics** - equality, hashing,
//!   containment, and matching compare content, never encodings
//! - **Containment operators** - structural (exact subtree) and key-based
//!   (list heads as keys, tail order-insensitive), both with Bloom
//!   fast rejection and type-filtered descent
//! - **Pattern matching** - wildcards (`_`), rest patterns (`_*`), and
//!   capture syntax over stored values
//! - **Inverted-index support** - integer key extraction and the
//!   consistent/triconsistent predicates for posting-list probes with a
//!   recheck discipline
//! - **Cheap extraction** - `car`/`nth` reuse the parent's symbol table
//!   instead of rebuilding it
//!
//! ## Quick Start
//!
//! ```rust
//! use lisq::Sexp;
//!
//! let value = Sexp::parse("(user (name \"alice\") (age 30))").unwrap();
//!
//! // Key-based containment: heads are keys, tail order never matters
//! let probe = Sexp::parse("(user (age 30))").unwrap();
//! assert!(value.contains_key(&probe).unwrap());
//!
//! // Structural containment wants the exact subtree
//! assert!(!value.contains(&probe).unwrap());
//! assert!(value.contains(&Sexp::parse("(age 30)").unwrap()).unwrap());
//!
//! // Pattern matching
//! let pattern = Sexp::parse("(user _*)").unwrap();
//! assert!(value.matches(&pattern).unwrap());
//! ```
//!
//! ## Modules
//!
//! - [`binary`] - the value type, read cursor, and layout emitters
//! - [`text`] - parser and canonical printer
//! - [`ops`] - equality, hashing, containment, pattern matching
//! - [`index`] - inverted-index key extraction and probe predicates
//! - [`functions`] - host adapter: marshalling and the function registry
//! - [`core`] - kinds, errors, layout constants
//! - [`codec`] - varint, stable hashing, Bloom signatures
//! - [`common`] - supporting data structures

pub mod binary;
pub mod codec;
pub mod common;
pub mod core;
pub mod functions;
pub mod index;
pub mod ops;
pub mod text;

// Re-export main types for convenience
pub use crate::core::{Error, Result, SexpKind};
pub use binary::Sexp;
pub use codec::BloomSig;
pub use index::{
    consistent, extract_query_keys, extract_value_keys, triconsistent, Consistency, QueryKeys,
    SearchMode, Strategy, Ternary,
};
pub use ops::{CancelHandle, OpContext};

// Re-export function-system types
pub use functions::{global_registry, Datum, DatumType, FunctionRegistry, SexpFunction};
