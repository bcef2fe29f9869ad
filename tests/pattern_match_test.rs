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

//! Pattern matching scenarios

mod common;

use lisq::Sexp;

fn parse(text: &str) -> Sexp {
    Sexp::parse(text).unwrap()
}

fn matches(expr: &str, pattern: &str) -> bool {
    parse(expr).matches(&parse(pattern)).unwrap()
}

#[test]
fn test_scenario_variadic_plus() {
    // (+ 1 2 3) matches (+ _*) but not (+ _ _)
    assert!(matches("(+ 1 2 3)", "(+ _*)"));
    assert!(!matches("(+ 1 2 3)", "(+ _ _)"));
    assert!(matches("(+ 1 2)", "(+ _ _)"));
}

#[test]
fn test_wildcard_matches_any_root() {
    let mut rng = common::rng(0xAB);
    let wildcard = parse("_");
    for _ in 0..100 {
        let text = common::random_sexp(&mut rng, 3);
        let value = parse(&text);
        assert!(value.matches(&wildcard).unwrap(), "_ must match {text}");
        // find_first with the bare wildcard returns the value itself
        let found = value.find_first(&wildcard).unwrap().unwrap();
        assert!(found.equal(&value).unwrap(), "find_first(_) on {text}");
    }
}

#[test]
fn test_literal_self_match_corpus() {
    // Any capture-free value matches itself as a pattern, as long as it
    // contains no pattern symbols
    let mut rng = common::rng(0xCD);
    for _ in 0..100 {
        let text = common::random_sexp(&mut rng, 3);
        let value = parse(&text);
        assert!(value.matches(&value).unwrap(), "self-match of {text}");
    }
}

#[test]
fn test_define_shapes() {
    assert!(matches("(define x 10)", "(define _ _)"));
    assert!(matches("(define (f a) (+ a 1))", "(define _ _)"));
    assert!(!matches("(define x)", "(define _ _)"));
    assert!(matches("(define (f a) (+ a 1))", "(define (_ _) _)"));
}

#[test]
fn test_rest_edge_cases() {
    // Rest alone matches a whole list, even with no elements to consume
    assert!(matches("(f)", "(f _*)"));
    assert!(matches("(f a b c d e f g)", "(f _*)"));
    // Rest must be terminal
    assert!(!matches("(f a b)", "(f _* b)"));
}

#[test]
fn test_captures_parse_and_match() {
    assert!(matches("(define x 10)", "(define ?name ?value)"));
    assert!(matches("(list 1 2 3)", "(list ??rest)"));
    assert!(matches("(f 9)", "(f ?)"));
}

#[test]
fn test_find_first_depth_first_order() {
    // Pre-order, left to right: outer (g 1) wins over nested (g 2)
    let expr = parse("(top (g 1) (wrap (g 2)))");
    let found = expr.find_first(&parse("(g _)")).unwrap().unwrap();
    assert_eq!(found, parse("(g 1)"));

    // Nested match found when it is the only one
    let expr = parse("(top (wrap (g 2)))");
    let found = expr.find_first(&parse("(g _)")).unwrap().unwrap();
    assert_eq!(found, parse("(g 2)"));

    // Absence is None, not an error
    assert!(parse("(a b)").find_first(&parse("(z _)")).unwrap().is_none());
}

#[test]
fn test_found_subtree_is_first_class() {
    // The extracted match supports further operations
    let expr = parse("(calls (f 1 2) (g 3))");
    let found = expr.find_first(&parse("(f _ _)")).unwrap().unwrap();
    assert_eq!(found.length().unwrap(), 3);
    assert_eq!(found.car().unwrap().unwrap(), parse("f"));
    assert_eq!(found.semantic_hash(), parse("(f 1 2)").semantic_hash());
}

#[test]
fn test_atom_patterns() {
    assert!(matches("42", "42"));
    assert!(matches("42", "_"));
    assert!(!matches("42", "43"));
    assert!(matches("\"s\"", "\"s\""));
    assert!(!matches("sym", "\"sym\""));
    assert!(matches("()", "()"));
}
