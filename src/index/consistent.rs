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

//! Consistency predicates for index probes
//!
//! Given per-key presence information from the posting lists, these decide
//! whether a stored value is a candidate for the query. Key presence is
//! necessary but not sufficient (keys are hashes, and presence says
//! nothing about structural position), so candidates normally require a
//! containment recheck.
//!
//! The ternary variant can sometimes conclude without a recheck: a missing
//! key is a definitive no, and a single-atom query whose one key is
//! definitively present is a yes (an atom's presence is exactly what its
//! key states, accepting the 32-bit collision risk).

use crate::core::{Error, Result};

/// Operator strategy codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u16)]
pub enum Strategy {
    /// Structural containment
    Structural = 7,
    /// Contained-by (mirror image; not pre-filterable)
    ContainedBy = 8,
    /// Key-based containment
    KeyBased = 9,
}

impl Strategy {
    /// Numeric code used at the host boundary
    pub fn code(self) -> u16 {
        self as u16
    }

    /// Decode a host strategy number
    pub fn from_code(code: i32) -> Result<Strategy> {
        match code {
            7 => Ok(Strategy::Structural),
            8 => Ok(Strategy::ContainedBy),
            9 => Ok(Strategy::KeyBased),
            other => Err(Error::invalid_argument(format!(
                "unknown operator strategy {other}"
            ))),
        }
    }
}

/// Three-valued key state / probe verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ternary {
    False,
    True,
    Maybe,
}

/// Outcome of the boolean consistency check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Consistency {
    /// Is this stored value a candidate?
    pub matches: bool,
    /// Must the candidate be verified by a full containment check?
    pub recheck: bool,
}

/// Boolean consistency: `check[i]` says whether query key `i` was found
/// in the stored value's posting lists
pub fn consistent(check: &[bool], strategy: Strategy) -> Consistency {
    match strategy {
        Strategy::Structural | Strategy::KeyBased => Consistency {
            matches: check.iter().all(|&present| present),
            // Hash collisions and position-blindness make rechecks
            // mandatory for containment strategies
            recheck: true,
        },
        Strategy::ContainedBy => Consistency {
            matches: true,
            recheck: true,
        },
    }
}

/// Ternary consistency over maybe/true/false key states
pub fn triconsistent(check: &[Ternary], strategy: Strategy) -> Ternary {
    if strategy == Strategy::ContainedBy {
        return Ternary::Maybe;
    }

    let mut all_true = true;
    for state in check {
        match state {
            Ternary::False => return Ternary::False,
            Ternary::Maybe => all_true = false,
            Ternary::True => {}
        }
    }

    // A single-key query is a single atom; definite presence of its key is
    // definite containment
    if all_true && check.len() == 1 {
        Ternary::True
    } else {
        Ternary::Maybe
    }
}
