use thiserror::Error;

pub mod executor;
pub mod signal;

pub use executor::{status_code, ProcessExecutor};

/// `exec` found the file but could not run it.
pub const STATUS_NOT_EXECUTABLE: i32 = 126;
pub const STATUS_NOT_FOUND: i32 = 127;
/// Added to the signal number for children killed by a signal.
pub const STATUS_SIGNAL_BASE: i32 = 128;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("{0}")]
    Spawn(#[source] std::io::Error),
    #[error("wait failed: {0}")]
    Wait(#[source] std::io::Error),
    #[error("Signal error: {0}")]
    SignalError(String),
}

impl ProcessError {
    /// Status reported for the command that hit this error.
    pub fn status(&self) -> i32 {
        STATUS_NOT_EXECUTABLE
    }
}
