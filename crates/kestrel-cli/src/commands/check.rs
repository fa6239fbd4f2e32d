use std::fmt::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;

use kestrel_compiler::{Diagnostics, InterfaceLoader, Severity};

use super::interface_loader::{CommandError, finish, read_interface};

pub struct CheckArgs {
    pub interface_path: PathBuf,
    pub max_records: Option<usize>,
    pub recursion_limit: Option<usize>,
}

pub fn run(args: CheckArgs) -> ExitCode {
    finish(execute(&args))
}

/// Load the interface the way an importing module would and list its exports.
pub fn execute(args: &CheckArgs) -> Result<String, CommandError> {
    let bytes = read_interface(&args.interface_path)?;

    let mut loader = InterfaceLoader::new();
    if let Some(limit) = args.max_records {
        loader = loader.with_max_records(limit);
    }
    if let Some(limit) = args.recursion_limit {
        loader = loader.with_recursion_limit(limit);
    }

    let mut diagnostics = Diagnostics::new();
    let module = loader.load(&bytes, &mut diagnostics).map_err(|_| {
        CommandError::Metadata(
            diagnostics
                .render(Severity::Fatal)
                .trim_end()
                .to_string(),
        )
    })?;

    let mut out = String::new();
    for export in &module.exports {
        write!(out, "{} :: {}", export.name, export.sigma).unwrap();
        if let Some(body) = &export.inline {
            write!(out, " = {body}").unwrap();
        }
        out.push('\n');
    }
    Ok(out)
}
