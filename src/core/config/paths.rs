use super::ConfigError;
use std::path::{Path, PathBuf};

pub const RC_FILE: &str = ".hshrc";
pub const HISTORY_FILE: &str = ".hsh_history";

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub rc_path: PathBuf,
    pub history_path: PathBuf,
}

impl ConfigPaths {
    pub fn new() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::HomeDirNotFound)?;
        Ok(Self::in_dir(&home))
    }

    pub fn in_dir(dir: &Path) -> Self {
        ConfigPaths {
            rc_path: dir.join(RC_FILE),
            history_path: dir.join(HISTORY_FILE),
        }
    }
}
