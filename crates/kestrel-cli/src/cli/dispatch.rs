//! Dispatch logic: extract params from ArgMatches and convert to command args.

use std::path::PathBuf;

use clap::ArgMatches;

use super::ColorChoice;
use crate::commands::check::CheckArgs;
use crate::commands::dump::DumpArgs;

pub struct DumpParams {
    pub interface_path: PathBuf,
    pub color: ColorChoice,
    pub json: bool,
}

impl DumpParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            interface_path: interface_path(m),
            color: parse_color(m),
            json: m.get_flag("json"),
        }
    }
}

impl From<DumpParams> for DumpArgs {
    fn from(p: DumpParams) -> Self {
        Self {
            interface_path: p.interface_path,
            color: !p.json && p.color.should_colorize(),
            json: p.json,
        }
    }
}

pub struct CheckParams {
    pub interface_path: PathBuf,
    pub max_records: Option<usize>,
    pub recursion_limit: Option<usize>,
}

impl CheckParams {
    pub fn from_matches(m: &ArgMatches) -> Self {
        Self {
            interface_path: interface_path(m),
            max_records: m.get_one::<usize>("max_records").copied(),
            recursion_limit: m.get_one::<usize>("recursion_limit").copied(),
        }
    }
}

impl From<CheckParams> for CheckArgs {
    fn from(p: CheckParams) -> Self {
        Self {
            interface_path: p.interface_path,
            max_records: p.max_records,
            recursion_limit: p.recursion_limit,
        }
    }
}

/// Log filter directive for the `-v` count.
pub fn verbosity(m: &ArgMatches) -> &'static str {
    match m.get_count("verbose") {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// The positional is required, so clap has already rejected its absence.
fn interface_path(m: &ArgMatches) -> PathBuf {
    m.get_one::<PathBuf>("interface_path")
        .cloned()
        .unwrap_or_default()
}

/// Parse --color flag into ColorChoice.
fn parse_color(m: &ArgMatches) -> ColorChoice {
    match m.get_one::<String>("color").map(|s| s.as_str()) {
        Some("always") => ColorChoice::Always,
        Some("never") => ColorChoice::Never,
        _ => ColorChoice::Auto,
    }
}
