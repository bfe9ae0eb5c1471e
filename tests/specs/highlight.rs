//! Behavioral specs for `xword highlight`.

use crate::prelude::*;

const MARKUP_CONFIG: &str = "[scope]\nscan_markup = true\n\n[[rules]]\nsearch = \"colour\"\n";

/// > Overlay highlighting counts page text but not form controls
#[test]
fn highlight_reports_page_text_matches() {
    xword_cmd()
        .args(["highlight", "page.html", "--no-color"])
        .current_dir(fixture("basic"))
        .assert()
        .success()
        .stdout(
            "colour: 2 matches\n  \"Colour\", \"colour\"\ngrey: 1 match\n  \"grey\"\n2 rules, 3 matches\n",
        );
}

/// > Overlay highlighting paints a canvas and leaves the text alone
#[test]
fn highlight_overlay_adds_canvas() {
    let project = Project::empty();
    project.file("xword.toml", "[[rules]]\nsearch = \"colour\"\n");
    project.file("page.html", "<p>colour</p>");

    xword_cmd()
        .args(["highlight", "page.html", "--write", "out.html"])
        .current_dir(project.path())
        .assert()
        .success();

    let out = project.read("out.html");
    assert!(out.contains("xword-highlight-canvas"), "{out}");
    assert!(out.contains(">colour<"), "{out}");
    assert!(!out.contains("<xword"), "{out}");
}

/// > Markup scope wraps each match in a numbered highlight element
#[test]
fn highlight_markup_scope_wraps_matches() {
    let project = Project::empty();
    project.file("xword.toml", MARKUP_CONFIG);
    project.file("page.html", "<p>colour and Colour</p>");

    xword_cmd()
        .args(["highlight", "page.html", "--write", "out.html", "--no-color"])
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicates::str::starts_with("colour: 2 matches\n"));

    let out = project.read("out.html");
    assert_eq!(out.matches("class=\"xword-search-n-highlight\"").count(), 2);
    assert!(out.contains("<span class=\"x-word-count\">1</span>"), "{out}");
    assert!(out.contains("<span class=\"x-word-count\">2</span>"), "{out}");
}

/// > Highlighting an already highlighted document adds no new wrappers
#[test]
fn highlight_markup_scope_is_idempotent() {
    let project = Project::empty();
    project.file("xword.toml", MARKUP_CONFIG);
    project.file("page.html", "<p>colour</p>");

    xword_cmd()
        .args(["highlight", "page.html", "--write", "once.html"])
        .current_dir(project.path())
        .assert()
        .success();
    xword_cmd()
        .args(["highlight", "once.html", "--write", "twice.html", "--no-color"])
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicates::str::starts_with("colour: 1 match\n"));

    assert_eq!(project.read("once.html"), project.read("twice.html"));
}

/// > Without a config file there are no rules to apply
#[test]
fn highlight_without_config_reports_nothing() {
    let project = Project::empty();
    project.file("page.html", "<p>colour</p>");

    xword_cmd()
        .args(["highlight", "page.html", "--no-color"])
        .current_dir(project.path())
        .assert()
        .success()
        .stdout("0 rules, 0 matches\n")
        .stderr(predicates::str::contains("no xword.toml found"));
}
