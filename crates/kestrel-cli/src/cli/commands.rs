//! Command builders for the CLI.

use clap::Command;

use super::args::*;

/// Build the complete CLI with all subcommands.
pub fn build_cli() -> Command {
    Command::new("kestrel")
        .about("Inspect Kestrel module interface metadata")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(verbose_arg())
        .subcommand(dump_command())
        .subcommand(check_command())
}

/// Show the raw interface tables.
pub fn dump_command() -> Command {
    Command::new("dump")
        .about("Show the tables of an interface file")
        .after_help(
            r#"EXAMPLES:
  kestrel dump Prelude.kif             # indexed table listing
  kestrel dump Prelude.kif --json      # tables as JSON
  kestrel dump - < Prelude.kif         # from stdin"#,
        )
        .arg(interface_path_arg())
        .arg(color_arg())
        .arg(json_arg())
}

/// Load, verify and decode an interface.
pub fn check_command() -> Command {
    Command::new("check")
        .about("Load an interface file and print its exports")
        .after_help(
            r#"EXAMPLES:
  kestrel check Prelude.kif
  kestrel check Prelude.kif --max-records 100000
  kestrel check Prelude.kif --recursion-limit 256"#,
        )
        .arg(interface_path_arg())
        .arg(max_records_arg())
        .arg(recursion_limit_arg())
}
