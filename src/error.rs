use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Readline error: {0}")]
    Readline(#[from] rustyline::error::ReadlineError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Can't open {}", .path.display())]
    ScriptOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Flag error: {0}")]
    FlagError(String),
}

impl ShellError {
    /// Process exit code used when this error ends the interpreter.
    pub fn exit_code(&self) -> i32 {
        match self {
            ShellError::ScriptOpen { source, .. }
                if source.kind() == std::io::ErrorKind::NotFound =>
            {
                127
            }
            ShellError::ScriptOpen { .. } => 126,
            ShellError::FlagError(_) => 2,
            _ => 1,
        }
    }
}
