use std::io::Write;
use std::path::PathBuf;

use tracing::debug;

use super::{Command, CommandError, Outcome};
use crate::path::is_searchable_dir;
use crate::shell::Session;

#[derive(Clone, Default)]
pub struct CdCommand;

impl CdCommand {
    pub fn new() -> Self {
        Self
    }

    /// The directory name to change to, and whether to echo it (`cd -`).
    fn target(session: &Session, args: &[String]) -> Result<(String, bool), CommandError> {
        match args.first().map(String::as_str) {
            Some("-") => session
                .env()
                .lookup("OLDPWD")
                .map(|dir| (dir.to_string(), true))
                .ok_or(CommandError::NoOldPwd),
            Some(dir) => Ok((dir.to_string(), false)),
            None => {
                let home = session.env().lookup("HOME").filter(|h| !h.is_empty());
                Ok((home.unwrap_or("/").to_string(), false))
            }
        }
    }
}

impl Command for CdCommand {
    fn execute(&self, session: &mut Session, args: &[String]) -> Result<Outcome, CommandError> {
        let (target, echo) = Self::target(session, args)?;

        let candidate = session.cwd().join(&target);
        let resolved: PathBuf = candidate
            .canonicalize()
            .ok()
            .filter(|dir| is_searchable_dir(dir))
            .ok_or_else(|| CommandError::CdFailed(target.clone()))?;

        let previous = session.cwd().to_string_lossy().into_owned();
        let current = resolved.to_string_lossy().into_owned();
        session.env_mut().set("OLDPWD", &previous)?;
        session.env_mut().set("PWD", &current)?;
        debug!(from = %previous, to = %current, "changed directory");
        session.set_cwd(resolved);

        if echo {
            writeln!(session.out(), "{}", current)?;
        }
        Ok(Outcome::Status(0))
    }
}
