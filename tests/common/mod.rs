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

//! Shared test helpers: a seeded corpus generator
//!
//! Generates random s-expression text covering every atom kind, both
//! encodings of integers and strings, both list formats, and nesting.
//! Seeds are fixed so failures reproduce.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Build a deterministic generator
pub fn rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// One random value in text form, nested at most `depth` levels
pub fn random_sexp(rng: &mut StdRng, depth: usize) -> String {
    if depth == 0 || rng.gen_bool(0.55) {
        random_atom(rng)
    } else {
        // 0..=6 children crosses the small/large list boundary
        let children = rng.gen_range(0..=6);
        let body: Vec<String> = (0..children).map(|_| random_sexp(rng, depth - 1)).collect();
        format!("({})", body.join(" "))
    }
}

fn random_atom(rng: &mut StdRng) -> String {
    match rng.gen_range(0..6) {
        0 => {
            // Symbols from a small pool so containment probes can hit
            let names = ["alpha", "beta", "gamma", "delta", "x", "y"];
            names[rng.gen_range(0..names.len())].to_string()
        }
        1 => {
            // Integers straddling the inline-encoding range
            let pool: [i64; 8] = [-17, -16, -1, 0, 5, 15, 16, 100_000];
            pool[rng.gen_range(0..pool.len())].to_string()
        }
        2 => {
            let pool = ["0.0", "-0.0", "2.5", "1e9", "-3.25"];
            pool[rng.gen_range(0..pool.len())].to_string()
        }
        3 => {
            // Strings around the short/long encoding boundary
            let len = match rng.gen_range(0..4) {
                0 => 0,
                1 => 5,
                2 => 31,
                _ => 32,
            };
            format!("\"{}\"", "s".repeat(len))
        }
        4 => "nil".to_string(),
        _ => format!("k{}", rng.gen_range(0..4)),
    }
}
