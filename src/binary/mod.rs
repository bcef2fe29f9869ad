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

//! Binary value layer
//!
//! - [`Sexp`] - the owned, immutable, reference-counted value
//! - [`SexpReader`] / [`Cursor`] - zero-copy decoding with central bounds checks
//! - [`builder`] - shared element and header emitters

pub mod builder;
pub mod cursor;
pub mod sexp;

pub use cursor::{Cursor, ListHeader, SexpReader, SymbolTable};
pub use sexp::Sexp;
