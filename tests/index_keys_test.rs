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

//! Inverted-index adapter: extraction, consistency, and the soundness
//! property tying the index to the containment operators

mod common;

use lisq::{
    consistent, extract_query_keys, extract_value_keys, triconsistent, OpContext, SearchMode,
    Sexp, Strategy, Ternary,
};

fn parse(text: &str) -> Sexp {
    Sexp::parse(text).unwrap()
}

fn value_keys(text: &str) -> Vec<i32> {
    extract_value_keys(&OpContext::default(), &parse(text)).unwrap()
}

fn query_keys(text: &str, strategy: Strategy) -> Vec<i32> {
    extract_query_keys(&OpContext::default(), &parse(text), strategy)
        .unwrap()
        .keys
}

/// Simulate the index probe: which query keys appear in the value's keys
fn probe(value_keys: &[i32], query_keys: &[i32]) -> Vec<bool> {
    query_keys.iter().map(|k| value_keys.contains(k)).collect()
}

#[test]
fn test_scenario_pair_keys() {
    // The stored record carries pair keys for its 2-element fields
    let stored = value_keys("(user (name \"alice\") (age 30))");
    let name_pair = query_keys("(name \"alice\")", Strategy::Structural);
    let age_pair = query_keys("(age 30)", Strategy::Structural);
    assert!(name_pair.iter().all(|k| stored.contains(k)));
    assert!(age_pair.iter().all(|k| stored.contains(k)));

    // The key-based query for (user (age 30)) must not emit any pair key
    // that the stored value lacks
    let probe_keys = query_keys("(user (age 30))", Strategy::KeyBased);
    assert!(probe_keys.iter().all(|k| stored.contains(k)));

    // The structural query for the same probe over-constrains on purpose:
    // its outer pair key is absent from the stored value
    let structural_probe = query_keys("(user (age 30))", Strategy::Structural);
    assert!(!structural_probe.iter().all(|k| stored.contains(k)));
}

#[test]
fn test_index_soundness_structural_corpus() {
    // Property: consistent() returning false implies containment is false
    // (equivalently: true containment implies the probe passes)
    let mut rng = common::rng(0x1DEA);
    for _ in 0..300 {
        let container_text = common::random_sexp(&mut rng, 3);
        let needle_text = common::random_sexp(&mut rng, 2);
        let container = parse(&container_text);
        let needle = parse(&needle_text);

        let stored = extract_value_keys(&OpContext::default(), &container).unwrap();
        let probe_keys = query_keys(&needle_text, Strategy::Structural);
        let result = consistent(&probe(&stored, &probe_keys), Strategy::Structural);

        if container.contains(&needle).unwrap() {
            assert!(
                result.matches,
                "index dropped a true match: {container_text} contains {needle_text}"
            );
        }
        if !result.matches {
            assert!(
                !container.contains(&needle).unwrap(),
                "probe rejected but containment holds: {container_text} contains {needle_text}"
            );
        }
    }
}

#[test]
fn test_index_soundness_key_based_corpus() {
    let mut rng = common::rng(0x2DEA);
    for _ in 0..300 {
        let container_text = common::random_sexp(&mut rng, 3);
        let needle_text = common::random_sexp(&mut rng, 2);
        let container = parse(&container_text);
        let needle = parse(&needle_text);

        let stored = extract_value_keys(&OpContext::default(), &container).unwrap();
        let probe_keys = query_keys(&needle_text, Strategy::KeyBased);
        let result = consistent(&probe(&stored, &probe_keys), Strategy::KeyBased);

        if container.contains_key(&needle).unwrap() {
            assert!(
                result.matches,
                "index dropped a true key match: {container_text} key-contains {needle_text}"
            );
        }
    }
}

#[test]
fn test_recheck_always_required_for_containment() {
    let result = consistent(&[true, true], Strategy::Structural);
    assert!(result.recheck);
    let result = consistent(&[true], Strategy::KeyBased);
    assert!(result.recheck);
}

#[test]
fn test_contained_by_strategy() {
    let keys = extract_query_keys(&OpContext::default(), &parse("(a b)"), Strategy::ContainedBy)
        .unwrap();
    assert_eq!(keys.search_mode, SearchMode::All);
    assert!(keys.keys.is_empty());
    // With no pre-filtering, everything is a candidate pending recheck
    assert!(consistent(&[], Strategy::ContainedBy).matches);
}

#[test]
fn test_triconsistent_agrees_with_consistent() {
    // A definite-false key kills the candidate in both predicates
    let tri = triconsistent(&[Ternary::True, Ternary::False], Strategy::Structural);
    assert_eq!(tri, Ternary::False);
    assert!(!consistent(&[true, false], Strategy::Structural).matches);

    // All-maybe stays maybe
    let tri = triconsistent(&[Ternary::Maybe, Ternary::Maybe], Strategy::KeyBased);
    assert_eq!(tri, Ternary::Maybe);
}

#[test]
fn test_triconsistent_single_atom_shortcut() {
    // A single-atom query with its key definitely present concludes
    // without recheck
    let atom_keys = query_keys("alpha", Strategy::Structural);
    assert_eq!(atom_keys.len(), 1);
    assert_eq!(
        triconsistent(&[Ternary::True], Strategy::Structural),
        Ternary::True
    );
}

#[test]
fn test_distinct_kinds_produce_distinct_keys() {
    // The same content hash under different kind markers must not collide
    let symbol_key = value_keys("abc");
    let string_key = value_keys("\"abc\"");
    assert_ne!(symbol_key, string_key);

    let int_key = value_keys("7");
    let float_key = value_keys("7.0");
    assert_ne!(int_key, float_key);
}

#[test]
fn test_dedup_and_cap_hold_for_wide_values() {
    let wide = format!(
        "({})",
        (0..5000)
            .map(|i| format!("f{}", i % 100))
            .collect::<Vec<_>>()
            .join(" ")
    );
    let keys = value_keys(&wide);
    // 100 distinct symbols + 1 list-head key
    assert_eq!(keys.len(), 101);
    let mut sorted = keys.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), keys.len(), "keys must be deduplicated");
}
