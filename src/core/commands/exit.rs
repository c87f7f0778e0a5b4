use super::{Command, CommandError, Outcome};
use crate::shell::Session;

#[derive(Clone, Default)]
pub struct ExitCommand;

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }

    /// Accepts unsigned decimal numbers that fit an `i32`.
    fn parse_status(arg: &str) -> Result<i32, CommandError> {
        let digits = arg.strip_prefix('+').unwrap_or(arg);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CommandError::IllegalNumber(arg.to_string()));
        }
        digits
            .parse::<i32>()
            .map(|n| n % 256)
            .map_err(|_| CommandError::IllegalNumber(arg.to_string()))
    }
}

impl Command for ExitCommand {
    fn execute(&self, session: &mut Session, args: &[String]) -> Result<Outcome, CommandError> {
        match args.first() {
            None => Ok(Outcome::Exit(session.status())),
            Some(arg) => Self::parse_status(arg).map(Outcome::Exit),
        }
    }
}
