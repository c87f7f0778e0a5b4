use std::io::Write;

use super::{Command, CommandError, Outcome};
use crate::core::aliases::AliasManager;
use crate::core::config::strip_quotes;
use crate::shell::Session;

#[derive(Clone, Default)]
pub struct AliasCommand;

impl AliasCommand {
    pub fn new() -> Self {
        Self
    }

    fn list(session: &mut Session) -> Result<(), CommandError> {
        let listing: Vec<String> = session
            .aliases()
            .iter()
            .map(|(name, value)| AliasManager::format_entry(name, value))
            .collect();
        let out = session.out();
        for line in listing {
            writeln!(out, "{}", line)?;
        }
        Ok(())
    }

    /// Handles one argument; returns false when it names an unknown alias.
    fn apply(session: &mut Session, arg: &str) -> Result<bool, CommandError> {
        if let Some((name, value)) = arg.split_once('=') {
            if name.is_empty() {
                session.report("alias", &format!("{}: invalid alias name", arg));
                return Ok(false);
            }
            let value = strip_quotes(value);
            if value.is_empty() {
                session.aliases_mut().remove(name);
            } else {
                session.aliases_mut().add(name, value);
            }
            return Ok(true);
        }

        match session.aliases().get(arg) {
            Some(value) => {
                let line = AliasManager::format_entry(arg, value);
                writeln!(session.out(), "{}", line)?;
                Ok(true)
            }
            None => {
                session.report("alias", &format!("{} not found", arg));
                Ok(false)
            }
        }
    }
}

impl Command for AliasCommand {
    fn execute(&self, session: &mut Session, args: &[String]) -> Result<Outcome, CommandError> {
        if args.is_empty() {
            Self::list(session)?;
            return Ok(Outcome::Status(0));
        }

        let mut failed = false;
        for arg in args {
            if !Self::apply(session, arg)? {
                failed = true;
            }
        }
        Ok(Outcome::Status(if failed { 1 } else { 0 }))
    }
}
