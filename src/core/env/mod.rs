mod vars;

pub use vars::Environment;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EnvError {
    #[error("Environment variable not found: {0}")]
    VarNotFound(String),
    #[error("Invalid variable name: '{0}'")]
    InvalidName(String),
}
