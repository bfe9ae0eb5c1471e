//! Behavioral specs for configuration loading.

use crate::prelude::*;

/// > --config selects a settings file outside the working directory
#[test]
fn explicit_config_is_used() {
    let project = Project::empty();
    project.file("settings/site.toml", "[[rules]]\nsearch = \"a\"\nreplace = \"b\"\n");
    project.file("page.html", "<p>a</p>");

    xword_cmd()
        .args(["replace", "page.html", "-C", "settings/site.toml", "--no-color"])
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicates::str::starts_with("a: 1 match\n"));
}

/// > XWORD_CONFIG is read when --config is absent
#[test]
fn config_from_environment() {
    let project = Project::empty();
    project.file("other.toml", "[[rules]]\nsearch = \"a\"\n");
    project.file("page.html", "<p>a</p>");

    xword_cmd()
        .args(["highlight", "page.html", "--no-color"])
        .env("XWORD_CONFIG", project.path().join("other.toml"))
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicates::str::starts_with("a: 1 match\n"));
}

/// > Config is discovered in a parent directory
#[test]
fn config_discovered_in_parent() {
    let project = Project::empty();
    project.file("xword.toml", "[[rules]]\nsearch = \"a\"\n");
    project.file("site/page.html", "<p>a a</p>");

    xword_cmd()
        .args(["replace", "page.html", "--no-color"])
        .current_dir(project.path().join("site"))
        .assert()
        .success()
        .stdout(predicates::str::starts_with("a: 2 matches\n"));
}

/// > Browser-store field names are accepted
#[test]
fn camel_case_settings_load() {
    let project = Project::empty();
    project.file(
        "xword.toml",
        "[searchConfig]\nmatchCase = true\n\n[[searchReplace]]\nsearch = \"A\"\nreplace = \"b\"\n",
    );
    project.file("page.html", "<p>a A</p>");

    xword_cmd()
        .args(["replace", "page.html", "--no-color"])
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicates::str::starts_with("A: 1 match\n"));
}

/// > Unknown keys are rejected with exit code 2
#[test]
fn unknown_key_is_an_error() {
    let project = Project::empty();
    project.file("xword.toml", "[scope]\nbogus = true\n");
    project.file("page.html", "<p>a</p>");

    xword_cmd()
        .args(["replace", "page.html"])
        .current_dir(project.path())
        .assert()
        .code(2)
        .stderr(predicates::str::contains("xword.toml"));
}
