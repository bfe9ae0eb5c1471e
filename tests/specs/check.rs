//! Behavioral specs for `xword check`.

use crate::prelude::*;

/// > A literal search is escaped and matched case-insensitively by default
#[test]
fn check_literal_search() {
    xword_cmd()
        .args(["check", "a.b"])
        .assert()
        .success()
        .stdout("ok: /a\\.b/gi\n");
}

/// > --regex keeps the pattern as written; --match-case drops the i flag
#[test]
fn check_regex_with_match_case() {
    xword_cmd()
        .args(["check", "colou?r", "--regex", "--match-case"])
        .assert()
        .success()
        .stdout("ok: /colou?r/g\n");
}

/// > A malformed regex exits 1 with the reason
#[test]
fn check_invalid_regex_fails() {
    xword_cmd()
        .args(["check", "(", "--regex"])
        .assert()
        .code(1)
        .stdout("")
        .stderr(predicates::str::contains("invalid pattern"));
}

/// > An empty search string is rejected
#[test]
fn check_empty_search_fails() {
    xword_cmd()
        .args(["check", ""])
        .assert()
        .code(1)
        .stderr(predicates::str::contains("empty"));
}
