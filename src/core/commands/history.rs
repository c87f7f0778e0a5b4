use std::io::Write;

use super::{Command, CommandError, Outcome};
use crate::input::history::HistoryEntry;
use crate::shell::Session;

#[derive(Clone, Default)]
pub struct HistoryCommand;

impl HistoryCommand {
    pub fn new() -> Self {
        Self
    }

    fn format_entry(entry: &HistoryEntry) -> String {
        format!("{}: {}", entry.index, entry.line)
    }
}

impl Command for HistoryCommand {
    fn execute(&self, session: &mut Session, args: &[String]) -> Result<Outcome, CommandError> {
        let count = match args {
            [] => session.history().len(),
            [n] => n.parse::<usize>().map_err(|_| {
                CommandError::InvalidArguments(format!("Invalid count: {}", n))
            })?,
            _ => {
                return Err(CommandError::InvalidArguments(
                    "Usage: history [count]".to_string(),
                ))
            }
        };

        let listing: Vec<String> = session
            .history()
            .get_recent(count)
            .map(Self::format_entry)
            .collect();
        let out = session.out();
        for line in listing {
            writeln!(out, "{}", line)?;
        }
        Ok(Outcome::Status(0))
    }
}
