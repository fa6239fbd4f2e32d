//! Shared argument builders for CLI commands.
//!
//! Each function returns a `clap::Arg` that can be composed into commands.

use std::path::PathBuf;

use clap::{Arg, ArgAction, value_parser};

/// Interface file (positional, `-` for stdin).
pub fn interface_path_arg() -> Arg {
    Arg::new("interface_path")
        .value_name("FILE")
        .required(true)
        .value_parser(value_parser!(PathBuf))
        .help("Interface file (use \"-\" for stdin)")
}

/// Color output control (--color).
pub fn color_arg() -> Arg {
    Arg::new("color")
        .long("color")
        .value_name("WHEN")
        .default_value("auto")
        .value_parser(["auto", "always", "never"])
        .help("Colorize output")
}

/// JSON output (--json).
pub fn json_arg() -> Arg {
    Arg::new("json")
        .long("json")
        .action(ArgAction::SetTrue)
        .conflicts_with("color")
        .help("Print the decoded tables as JSON")
}

/// Record budget (--max-records).
pub fn max_records_arg() -> Arg {
    Arg::new("max_records")
        .long("max-records")
        .value_name("N")
        .value_parser(value_parser!(usize))
        .help("Reject interfaces with more records than this")
}

/// Nesting limit (--recursion-limit).
pub fn recursion_limit_arg() -> Arg {
    Arg::new("recursion_limit")
        .long("recursion-limit")
        .value_name("N")
        .value_parser(value_parser!(usize))
        .help("Maximum nesting depth while decoding")
}

/// Verbosity (-v, repeatable).
pub fn verbose_arg() -> Arg {
    Arg::new("verbose")
        .short('v')
        .long("verbose")
        .action(ArgAction::Count)
        .global(true)
        .help("Increase log verbosity (-v info, -vv debug, -vvv trace)")
}
