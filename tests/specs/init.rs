//! Behavioral specs for `xword init`.

use crate::prelude::*;

/// > xword init creates xword.toml in current directory
#[test]
fn init_creates_xword_toml() {
    let project = Project::empty();

    xword_cmd()
        .arg("init")
        .current_dir(project.path())
        .assert()
        .success()
        .stdout(predicates::str::contains("Created xword.toml"));

    assert!(project.read("xword.toml").contains("[continuous]"));
}

/// > The generated config is accepted by the other commands
#[test]
fn init_output_loads() {
    let project = Project::empty();
    project.file("page.html", "<p>text</p>");
    xword_cmd().arg("init").current_dir(project.path()).assert().success();

    xword_cmd()
        .args(["replace", "page.html", "--no-color"])
        .current_dir(project.path())
        .assert()
        .success()
        .stdout("0 rules, 0 matches\n")
        .stderr("");
}

/// > Refuses to overwrite existing xword.toml without --force
#[test]
fn init_refuses_to_overwrite_without_force() {
    let project = Project::empty();
    project.file("xword.toml", "# existing\n");

    xword_cmd()
        .arg("init")
        .current_dir(project.path())
        .assert()
        .code(1)
        .stderr(predicates::str::contains("already exists"))
        .stderr(predicates::str::contains("--force"));

    assert_eq!(project.read("xword.toml"), "# existing\n");
}

/// > --force overwrites existing xword.toml
#[test]
fn init_force_overwrites_existing_config() {
    let project = Project::empty();
    project.file("xword.toml", "# existing\n");

    xword_cmd()
        .args(["init", "--force"])
        .current_dir(project.path())
        .assert()
        .success();

    assert!(project.read("xword.toml").contains("[scope]"));
}
