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

//! Containment end-to-end scenarios and properties

mod common;

use lisq::Sexp;

fn parse(text: &str) -> Sexp {
    Sexp::parse(text).unwrap()
}

fn contains(container: &str, needle: &str) -> bool {
    parse(container).contains(&parse(needle)).unwrap()
}

fn contains_key(container: &str, needle: &str) -> bool {
    parse(container).contains_key(&parse(needle)).unwrap()
}

#[test]
fn test_scenario_simple_list() {
    // (a b c): atom present, partial sublist absent, head key-present
    assert!(contains("(a b c)", "b"));
    assert!(!contains("(a b c)", "(a b)"));
    assert!(contains_key("(a b c)", "a"));
}

#[test]
fn test_scenario_user_record() {
    let data = "(user (name \"alice\") (age 30))";
    // Key-based finds the sparse probe
    assert!(contains_key(data, "(user (age 30))"));
    // Structural does not: sublist lengths differ
    assert!(!contains(data, "(user (age 30))"));
    // But the exact field is structurally present
    assert!(contains(data, "(age 30)"));
}

#[test]
fn test_containment_reflexivity_corpus() {
    let mut rng = common::rng(0xF00D);
    for _ in 0..200 {
        let text = common::random_sexp(&mut rng, 3);
        let value = parse(&text);
        assert!(
            value.contains(&value).unwrap(),
            "contains({text}, {text}) must hold"
        );
    }
}

#[test]
fn test_key_containment_reflexivity() {
    // Generic case: lists with distinct heads and tails
    for text in [
        "(user (name \"alice\") (age 30))",
        "(cfg (a 1) (b 2))",
        "(deep (mid (leaf 1) (leaf2 2)) (other 3))",
        "atom",
        "42",
    ] {
        let value = parse(text);
        assert!(
            value.contains_key(&value).unwrap(),
            "contains_key({text}, {text})"
        );
    }
}

#[test]
fn test_bloom_soundness_corpus() {
    // Whenever structural containment holds, the needle's Bloom signature
    // must be a subset of the container's (no false negatives from the
    // filter). Key-based containment filters on the needle's atom-only
    // signature instead, since the matching container list may be wider.
    let mut rng = common::rng(0xB100);
    for _ in 0..300 {
        let container_text = common::random_sexp(&mut rng, 3);
        let needle_text = common::random_sexp(&mut rng, 2);
        let container = parse(&container_text);
        let needle = parse(&needle_text);

        if container.contains(&needle).unwrap() {
            let container_sig = container.bloom().unwrap();
            let needle_sig = needle.bloom().unwrap();
            assert!(
                container_sig.may_contain(needle_sig),
                "bloom rejected a true containment: {container_text} vs {needle_text}"
            );
        }
    }
}

#[test]
fn test_key_containment_survives_filtering_corpus() {
    // The key-based operator's internal fast paths (bloom, type filters)
    // must never flip a positive: spot-check against wider containers
    // built directly around the needle
    let mut rng = common::rng(0xB101);
    for _ in 0..100 {
        let field = common::random_sexp(&mut rng, 1);
        let container_text = format!("(rec (a 1) ({field} x) (z 9))");
        let needle_text = "(rec (a 1))";
        assert!(
            contains_key(&container_text, needle_text),
            "{container_text} must key-contain {needle_text}"
        );
    }
}

#[test]
fn test_structural_implies_key_based_for_exact_probes() {
    // A structurally contained list probe is also key-contained when its
    // heads line up (the key rules only relax tail matching)
    let cases = [
        ("(x (k 1 2))", "(k 1 2)"),
        ("(top (user (id 1)))", "(user (id 1))"),
    ];
    for (container, needle) in cases {
        assert!(contains(container, needle), "{container} contains {needle}");
        assert!(
            contains_key(container, needle),
            "{container} key-contains {needle}"
        );
    }
}

#[test]
fn test_key_containment_order_insensitive() {
    let data = "(point (x 1) (y 2) (z 3))";
    assert!(contains_key(data, "(point (z 3) (x 1))"));
    assert!(contains_key(data, "(point (y 2) (z 3) (x 1))"));
    assert!(!contains_key(data, "(point (w 9))"));
}

#[test]
fn test_containment_mixed_formats() {
    // Needle parsed standalone (compact symbol table) against a container
    // whose matching subtree sits inside a large-format list
    let container = "(pad1 pad2 pad3 pad4 pad5 (target (k \"v\")))";
    assert!(contains(container, "(target (k \"v\"))"));
    assert!(contains(container, "(k \"v\")"));
    assert!(contains(container, "\"v\""));
    assert!(!contains(container, "(target)"));
}

#[test]
fn test_negative_queries() {
    let data = "(a (b 1) (c 2.5) \"s\")";
    for needle in ["z", "3", "9.5", "\"t\"", "(b 2)", "(a b)"] {
        assert!(!contains(data, needle), "must not contain {needle}");
    }
}

#[test]
fn test_float_and_integer_needles_are_distinct() {
    assert!(contains("(x 1)", "1"));
    assert!(!contains("(x 1)", "1.0"));
    assert!(contains("(x 1.0)", "1.0"));
    assert!(!contains("(x 1.0)", "1"));
}
