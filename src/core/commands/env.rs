use std::io::Write;

use super::{Command, CommandError, Outcome};
use crate::shell::Session;

/// `env`: print every variable as `NAME=VALUE`.
#[derive(Clone, Default)]
pub struct EnvCommand;

/// `setenv NAME VALUE`
#[derive(Clone, Default)]
pub struct SetenvCommand;

/// `unsetenv NAME...`
#[derive(Clone, Default)]
pub struct UnsetenvCommand;

impl Command for EnvCommand {
    fn execute(&self, session: &mut Session, args: &[String]) -> Result<Outcome, CommandError> {
        if !args.is_empty() {
            return Err(CommandError::InvalidArguments(
                "Usage: env".to_string(),
            ));
        }

        let lines = session.env_mut().flatten().join("\n");
        if !lines.is_empty() {
            writeln!(session.out(), "{}", lines)?;
        }
        Ok(Outcome::Status(0))
    }
}

impl Command for SetenvCommand {
    fn execute(&self, session: &mut Session, args: &[String]) -> Result<Outcome, CommandError> {
        let [name, value] = args else {
            return Err(CommandError::InvalidArguments(
                "Usage: setenv NAME VALUE".to_string(),
            ));
        };
        session.env_mut().set(name, value)?;
        Ok(Outcome::Status(0))
    }
}

impl Command for UnsetenvCommand {
    fn execute(&self, session: &mut Session, args: &[String]) -> Result<Outcome, CommandError> {
        if args.is_empty() {
            return Err(CommandError::InvalidArguments(
                "Usage: unsetenv NAME...".to_string(),
            ));
        }
        for name in args {
            session.env_mut().unset(name);
        }
        Ok(Outcome::Status(0))
    }
}
