//! Tests for CLI dispatch logic.

use std::path::PathBuf;

use super::*;
use crate::cli::commands::{check_command, dump_command};

#[test]
fn dump_params_defaults() {
    let m = dump_command()
        .try_get_matches_from(["dump", "Prelude.kif"])
        .unwrap();
    let params = DumpParams::from_matches(&m);

    assert_eq!(params.interface_path, PathBuf::from("Prelude.kif"));
    assert_eq!(params.color, ColorChoice::Auto);
    assert!(!params.json);
}

#[test]
fn dump_params_extracts_flags() {
    let m = dump_command()
        .try_get_matches_from(["dump", "-", "--color", "always"])
        .unwrap();
    let params = DumpParams::from_matches(&m);

    assert_eq!(params.interface_path, PathBuf::from("-"));
    assert_eq!(params.color, ColorChoice::Always);
}

#[test]
fn json_dump_is_never_colored() {
    let m = dump_command()
        .try_get_matches_from(["dump", "Prelude.kif", "--json"])
        .unwrap();
    let args: crate::commands::dump::DumpArgs = DumpParams::from_matches(&m).into();
    assert!(args.json);
    assert!(!args.color);
}

#[test]
fn json_conflicts_with_explicit_color() {
    let result =
        dump_command().try_get_matches_from(["dump", "a.kif", "--json", "--color", "always"]);
    assert!(result.is_err());
}

#[test]
fn dump_requires_file() {
    assert!(dump_command().try_get_matches_from(["dump"]).is_err());
}

#[test]
fn check_params_extracts_limits() {
    let m = check_command()
        .try_get_matches_from([
            "check",
            "Prelude.kif",
            "--max-records",
            "500",
            "--recursion-limit",
            "64",
        ])
        .unwrap();
    let params = CheckParams::from_matches(&m);

    assert_eq!(params.interface_path, PathBuf::from("Prelude.kif"));
    assert_eq!(params.max_records, Some(500));
    assert_eq!(params.recursion_limit, Some(64));
}

#[test]
fn check_limits_are_optional() {
    let m = check_command()
        .try_get_matches_from(["check", "Prelude.kif"])
        .unwrap();
    let params = CheckParams::from_matches(&m);
    assert_eq!(params.max_records, None);
    assert_eq!(params.recursion_limit, None);
}

#[test]
fn check_rejects_non_numeric_limit() {
    let result =
        check_command().try_get_matches_from(["check", "Prelude.kif", "--max-records", "lots"]);
    assert!(result.is_err());
}

#[test]
fn check_help_lists_limits() {
    let help = check_command().render_help().to_string();
    assert!(help.contains("--max-records"));
    assert!(help.contains("--recursion-limit"));
    assert!(!help.contains("--json"));
}

#[test]
fn verbosity_levels() {
    let level = |args: &[&str]| {
        let m = build_cli().try_get_matches_from(args.iter().copied()).unwrap();
        verbosity(&m)
    };
    assert_eq!(level(&["kestrel", "check", "a.kif"]), "warn");
    assert_eq!(level(&["kestrel", "-v", "check", "a.kif"]), "info");
    assert_eq!(level(&["kestrel", "check", "a.kif", "-vv"]), "debug");
    assert_eq!(level(&["kestrel", "-vvvv", "dump", "a.kif"]), "trace");
}

#[test]
fn subcommand_is_required() {
    assert!(build_cli().try_get_matches_from(["kestrel"]).is_err());
}
