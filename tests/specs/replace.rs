//! Behavioral specs for `xword replace`.

use crate::prelude::*;

// =============================================================================
// TEXT OUTPUT
// =============================================================================

/// > Each active rule reports its total and distinct matches, in rule order
#[test]
fn replace_reports_per_rule_totals() {
    xword_cmd()
        .args(["replace", "page.html", "--no-color"])
        .current_dir(fixture("basic"))
        .assert()
        .success()
        .stdout(
            "colour: 3 matches\n  \"Colour\", \"colour\"\ngrey: 1 match\n  \"grey\"\n2 rules, 4 matches\n",
        );
}

/// > Script content is never searched
#[test]
fn replace_skips_script_text() {
    let project = Project::empty();
    project.file("xword.toml", "[[rules]]\nsearch = \"colour\"\nreplace = \"color\"\n");
    project.file("page.html", "<script>colour</script><p>plain</p>");

    xword_cmd()
        .args(["replace", "page.html", "--no-color"])
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicates::str::starts_with("colour: 0 matches\n"));
}

// =============================================================================
// JSON OUTPUT
// =============================================================================

/// > JSON output maps each search string to its matches and total
#[test]
fn replace_json_output() {
    let output = xword_cmd()
        .args(["replace", "page.html", "-o", "json"])
        .current_dir(fixture("basic"))
        .output()
        .unwrap();
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(value["colour"]["total"], 3);
    assert_eq!(value["grey"]["matches"], serde_json::json!(["grey"]));
}

// =============================================================================
// WRITING
// =============================================================================

/// > --write saves the rewritten body markup; the input file is untouched
#[test]
fn replace_write_saves_result() {
    let project = Project::empty();
    project.file("xword.toml", "[[rules]]\nsearch = \"colour\"\nreplace = \"color\"\n");
    project.file("page.html", "<p>Colour and colour</p>");

    xword_cmd()
        .args(["replace", "page.html", "--write", "out.html"])
        .current_dir(project.path())
        .assert()
        .success();

    assert_eq!(project.read("out.html"), "<p>color and color</p>");
    assert_eq!(project.read("page.html"), "<p>Colour and colour</p>");
}

/// > Replacement strings are inserted literally
#[test]
fn replace_is_literal() {
    let project = Project::empty();
    project.file(
        "xword.toml",
        "[scope]\nuse_regex = true\n\n[[rules]]\nsearch = \"(\\\\w+)@x\"\nreplace = \"$1\"\n",
    );
    project.file("page.html", "<p>me@x</p>");

    xword_cmd()
        .args(["replace", "page.html", "--write", "out.html"])
        .current_dir(project.path())
        .assert()
        .success();

    assert_eq!(project.read("out.html"), "<p>$1</p>");
}

// =============================================================================
// FRAMES
// =============================================================================

/// > Same-origin frames are searched; remote and missing frames are skipped
#[test]
fn replace_searches_loaded_frames() {
    xword_cmd()
        .args(["replace", "page.html", "--no-color"])
        .current_dir(fixture("frames"))
        .assert()
        .success()
        .stdout(predicates::str::starts_with(
            "colour: 3 matches\n  \"colour\", \"Colour\"\n",
        ));
}

// =============================================================================
// ERRORS
// =============================================================================

/// > A document that cannot be read exits 2
#[test]
fn replace_missing_document_fails() {
    let project = Project::empty();
    xword_cmd()
        .args(["replace", "nope.html"])
        .current_dir(project.path())
        .assert()
        .code(2)
        .stderr(predicates::str::contains("nope.html"));
}

/// > An invalid rule is skipped while the others still run
#[test]
fn replace_invalid_regex_is_isolated() {
    let project = Project::empty();
    project.file(
        "xword.toml",
        "[scope]\nuse_regex = true\n\n[[rules]]\nsearch = \"(\"\n\n[[rules]]\nsearch = \"b+\"\nreplace = \"B\"\n",
    );
    project.file("page.html", "<p>abbc</p>");

    xword_cmd()
        .args(["replace", "page.html", "--no-color"])
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("(: 0 matches"))
        .stdout(predicates::str::contains("b+: 1 match"))
        .stderr(predicates::str::contains("invalid pattern"));
}
