//! Tests for CLI argument parsing

use std::path::PathBuf;

use clap::error::ErrorKind;
use clap::Parser;
use rstest::rstest;

use orgunit_tree::cli::Cli;

#[test]
fn given_short_flags_when_parsing_then_paths_are_set() {
    let cli = Cli::try_parse_from(["orgunit-tree", "-i", "events.csv", "-o", "tree.json"]).unwrap();

    assert_eq!(cli.input, Some(PathBuf::from("events.csv")));
    assert_eq!(cli.output, Some(PathBuf::from("tree.json")));
    assert!(!cli.strict);
    assert!(!cli.quiet);
    assert_eq!(cli.debug, 0);
}

#[test]
fn given_long_flags_when_parsing_then_options_are_set() {
    let cli = Cli::try_parse_from([
        "orgunit-tree",
        "--input",
        "events.csv",
        "--output",
        "tree.json",
        "--strict",
        "--quiet",
        "-dd",
    ])
    .unwrap();

    assert!(cli.strict);
    assert!(cli.quiet);
    assert_eq!(cli.debug, 2);
}

#[rstest]
#[case::no_flags(&["orgunit-tree"])]
#[case::input_only(&["orgunit-tree", "--input", "events.csv"])]
#[case::output_only(&["orgunit-tree", "-o", "tree.json"])]
fn given_missing_required_flag_when_parsing_then_usage_error(#[case] args: &[&str]) {
    let err = Cli::try_parse_from(args).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
    assert_ne!(err.exit_code(), 0);
}

#[test]
fn given_generate_when_parsing_then_paths_are_not_required() {
    let cli = Cli::try_parse_from(["orgunit-tree", "--generate", "bash"]).unwrap();

    assert!(cli.generate.is_some());
    assert!(cli.input.is_none());
}
