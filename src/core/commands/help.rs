use std::io::Write;

use super::{Builtin, Command, CommandError, Outcome};
use crate::shell::Session;

#[derive(Clone, Default)]
pub struct HelpCommand;

impl Command for HelpCommand {
    fn execute(&self, session: &mut Session, args: &[String]) -> Result<Outcome, CommandError> {
        let out = session.out();
        match args.first() {
            None => {
                writeln!(out, "hsh builtins:")?;
                for builtin in Builtin::ALL {
                    writeln!(out, "  {:<26}{}", builtin.usage(), builtin.description())?;
                }
            }
            Some(name) => {
                let builtin = Builtin::lookup(name).ok_or_else(|| {
                    CommandError::InvalidArguments(format!("no help topics match '{}'", name))
                })?;
                writeln!(out, "Usage: {}", builtin.usage())?;
                writeln!(out, "    {}", builtin.description())?;
            }
        }
        Ok(Outcome::Status(0))
    }
}
