use std::path::PathBuf;
use std::process::ExitCode;

use kestrel_core::Colors;
use kestrel_meta::{Interface, dump};

use super::interface_loader::{CommandError, finish, read_interface};

pub struct DumpArgs {
    pub interface_path: PathBuf,
    pub color: bool,
    pub json: bool,
}

pub fn run(args: DumpArgs) -> ExitCode {
    finish(execute(&args))
}

/// Render the tables without verifying them, so corrupt references still show.
pub fn execute(args: &DumpArgs) -> Result<String, CommandError> {
    let bytes = read_interface(&args.interface_path)?;
    let interface =
        Interface::from_bytes(&bytes).map_err(|e| CommandError::Metadata(e.to_string()))?;

    if args.json {
        let mut out = serde_json::to_string_pretty(&interface)?;
        out.push('\n');
        return Ok(out);
    }
    Ok(dump(&interface, Colors::new(args.color)))
}
