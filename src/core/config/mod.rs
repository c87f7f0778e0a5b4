use std::path::PathBuf;

use thiserror::Error;

mod loader;
mod paths;

pub(crate) use loader::strip_quotes;
pub use loader::ConfigLoader;
pub use paths::ConfigPaths;

use crate::core::env::Environment;

pub const DEFAULT_HISTORY_MAX: usize = 4096;

/// Startup state read from the rc file, applied to a session in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Alias { name: String, value: String },
    SetEnv { name: String, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub paths: ConfigPaths,
    pub history_max: usize,
    pub directives: Vec<Directive>,
    /// 1-based numbers of rc lines that were malformed and ignored.
    pub skipped_lines: Vec<usize>,
}

impl Config {
    pub fn new(paths: ConfigPaths) -> Self {
        Config {
            paths,
            history_max: DEFAULT_HISTORY_MAX,
            directives: Vec::new(),
            skipped_lines: Vec::new(),
        }
    }

    /// Reads the rc file, then lets `HSH_HISTSIZE` override the history bound.
    /// The override is applied even when the rc file could not be read.
    pub fn load(&mut self, env: &Environment) -> Result<(), ConfigError> {
        let paths = self.paths.clone();
        let loaded = ConfigLoader::new(&paths).load_configs(self);

        if let Some(size) = env.lookup("HSH_HISTSIZE") {
            self.history_max = size
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidHistSize(size.to_string()))?;
        }
        loaded
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Home directory not found")]
    HomeDirNotFound,
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}:{line}: {message}", .path.display())]
    Parse {
        path: PathBuf,
        line: usize,
        message: String,
    },
    #[error("invalid HSH_HISTSIZE '{0}'")]
    InvalidHistSize(String),
}
