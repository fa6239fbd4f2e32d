mod cli;
mod commands;

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use cli::{CheckParams, DumpParams, build_cli, verbosity};

fn main() -> ExitCode {
    let matches = match build_cli().try_get_matches() {
        Ok(matches) => matches,
        Err(err) => {
            let _ = err.print();
            // help and version requests are not failures
            return if err.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(verbosity(&matches)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match matches.subcommand() {
        Some(("dump", m)) => {
            let params = DumpParams::from_matches(m);
            commands::dump::run(params.into())
        }
        Some(("check", m)) => {
            let params = CheckParams::from_matches(m);
            commands::check::run(params.into())
        }
        _ => unreachable!("clap should have caught this"),
    }
}
