#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

use super::*;
use clap::CommandFactory;

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("xword").chain(args.iter().copied())).unwrap()
}

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn replace_defaults() {
    let cli = parse(&["replace", "page.html"]);
    let Command::Replace(args) = cli.command else {
        panic!("expected replace");
    };
    assert_eq!(args.document, PathBuf::from("page.html"));
    assert_eq!(args.output, OutputFormat::Text);
    assert_eq!(args.color_mode(), ColorMode::Auto);
    assert!(args.write.is_none());
}

#[test]
fn highlight_with_options() {
    let cli = parse(&["highlight", "page.html", "-o", "json", "--write", "out.html", "--color", "always"]);
    let Command::Highlight(args) = cli.command else {
        panic!("expected highlight");
    };
    assert_eq!(args.output, OutputFormat::Json);
    assert_eq!(args.write, Some(PathBuf::from("out.html")));
    assert_eq!(args.color_mode(), ColorMode::Always);
}

#[test]
fn no_color_overrides_color() {
    let cli = parse(&["replace", "p.html", "--color", "always", "--no-color"]);
    let Command::Replace(args) = cli.command else {
        panic!("expected replace");
    };
    assert_eq!(args.color_mode(), ColorMode::Never);
}

#[test]
fn config_flag_is_global() {
    let cli = parse(&["check", "a.b", "--regex", "-C", "site.toml"]);
    assert_eq!(cli.config, Some(PathBuf::from("site.toml")));
    let Command::Check(args) = cli.command else {
        panic!("expected check");
    };
    assert_eq!(args.search, "a.b");
    assert!(args.regex);
    assert!(!args.match_case);
}

#[test]
fn init_force() {
    let cli = parse(&["init", "--force"]);
    assert!(matches!(cli.command, Command::Init(InitArgs { force: true })));
}

#[test]
fn document_is_required() {
    assert!(Cli::try_parse_from(["xword", "replace"]).is_err());
}

#[test]
fn unknown_output_format_is_rejected() {
    assert!(Cli::try_parse_from(["xword", "replace", "p.html", "-o", "html"]).is_err());
}
