use std::fs;
use std::io::{self, Read};
use std::path::Path;
use std::process::ExitCode;

/// Failure of a CLI command.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("failed to read '{path}': {source}")]
    Read { path: String, source: io::Error },

    #[error("failed to read stdin: {0}")]
    Stdin(io::Error),

    #[error("failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The interface metadata is unusable. Already reported as a diagnostic.
    #[error("{0}")]
    Metadata(String),
}

impl CommandError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            CommandError::Metadata(_) => ExitCode::from(2),
            _ => ExitCode::from(1),
        }
    }
}

/// Read an interface blob from a file, or stdin for `-`.
pub fn read_interface(path: &Path) -> Result<Vec<u8>, CommandError> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin()
            .read_to_end(&mut buf)
            .map_err(CommandError::Stdin)?;
        return Ok(buf);
    }
    let bytes = fs::read(path).map_err(|source| CommandError::Read {
        path: path.display().to_string(),
        source,
    })?;
    tracing::info!(path = %path.display(), bytes = bytes.len(), "read interface");
    Ok(bytes)
}

/// Print a command result, mapping failures to the exit status.
pub fn finish(result: Result<String, CommandError>) -> ExitCode {
    match result {
        Ok(out) => {
            print!("{out}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            err.exit_code()
        }
    }
}
