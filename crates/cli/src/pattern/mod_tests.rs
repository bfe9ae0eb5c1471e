#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use proptest::prelude::*;
use yare::parameterized;

use super::*;
use crate::config::ScopeFlags;
use crate::results::RuleResult;

fn scope(use_regex: bool, match_case: bool) -> ScopeFlags {
    ScopeFlags {
        use_regex,
        match_case,
        ..ScopeFlags::default()
    }
}

fn found<'h>(pattern: &CompiledPattern, haystack: &'h str) -> Vec<&'h str> {
    pattern.find_iter(haystack).map(|m| m.text).collect()
}

// =============================================================================
// LITERAL MODE
// =============================================================================

#[test]
fn literal_dot_does_not_match_any_character() {
    let p = check("a.b", &scope(false, false)).unwrap();
    assert!(p.is_match("a.b"));
    assert!(!p.is_match("axb"));
}

#[parameterized(
    parens = { "f(x)" },
    brackets = { "[a-z]" },
    star = { "a*" },
    anchors = { "^start$" },
    backslash = { r"C:\path" },
    braces = { "{1,2}" },
    pipe = { "a|b" },
)]
fn literal_metacharacters_match_themselves(search: &str) {
    let p = check(search, &scope(false, true)).unwrap();
    assert_eq!(found(&p, &format!("<{search}>")), vec![search]);
}

#[test]
fn case_insensitive_by_default() {
    let p = check("colour", &scope(false, false)).unwrap();
    assert_eq!(found(&p, "Colour colour COLOUR"), vec!["Colour", "colour", "COLOUR"]);
}

#[test]
fn match_case_is_exact() {
    let p = check("colour", &scope(false, true)).unwrap();
    assert_eq!(found(&p, "Colour colour COLOUR"), vec!["colour"]);
}

proptest! {
    #[test]
    fn literal_search_always_compiles_and_finds_itself(s in "\\PC{1,16}") {
        let p = check(&s, &scope(false, true)).unwrap();
        prop_assert!(p.is_match(&s));
    }
}

// =============================================================================
// REGEX MODE
// =============================================================================

#[test]
fn regex_mode_interprets_metacharacters() {
    let p = check("colou?r", &scope(true, false)).unwrap();
    assert_eq!(found(&p, "color colour"), vec!["color", "colour"]);
}

#[test]
fn invalid_regex_is_reported() {
    let err = check("(", &scope(true, false)).unwrap_err();
    assert!(matches!(err, PatternError::Invalid { .. }));
    assert!(err.to_string().contains('('));
}

#[test]
fn invalid_regex_compiles_to_none() {
    assert!(compile("(", &scope(true, false)).is_none());
    assert!(compile("(", &scope(false, false)).is_some());
}

#[test]
fn empty_search_is_rejected() {
    assert!(matches!(check("", &scope(false, false)), Err(PatternError::Empty)));
}

#[test]
fn zero_length_matches_are_ignored() {
    let p = check("x*", &scope(true, false)).unwrap();
    assert_eq!(found(&p, "axxb"), vec!["xx"]);
    assert!(!p.is_match("abc"));
}

// =============================================================================
// REPLACEMENT
// =============================================================================

#[test]
fn replace_all_is_literal_and_records_matches() {
    let p = check("(o)", &scope(true, false)).unwrap();
    let mut result = RuleResult::default();
    let out = p.replace_all("foo", "$1", &mut result).unwrap();
    assert_eq!(out, "f$1$1");
    assert_eq!(result.total, 2);
    assert_eq!(result.matches.len(), 1);
}

#[test]
fn replace_all_without_match_is_none() {
    let p = check("z", &scope(false, false)).unwrap();
    let mut result = RuleResult::default();
    assert!(p.replace_all("abc", "y", &mut result).is_none());
    assert!(result.is_empty());
}

#[test]
fn replace_keeps_distinct_case_variants() {
    let p = check("colour", &scope(false, false)).unwrap();
    let mut result = RuleResult::default();
    let out = p.replace_all("Colour, colour", "color", &mut result).unwrap();
    assert_eq!(out, "color, color");
    assert_eq!(
        result.matches.iter().collect::<Vec<_>>(),
        vec!["Colour", "colour"]
    );
}
