use std::path::PathBuf;

use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use tracing::debug;

use super::{History, LineSource, ShellCompleter};
use crate::error::ShellError;
use crate::shell::Session;

pub const PROMPT: &str = "$ ";

/// Terminal input through rustyline, with completion and highlighting.
pub struct InteractiveSource {
    editor: Editor<ShellCompleter, DefaultHistory>,
}

impl InteractiveSource {
    /// Seeds the editor's recall buffer from `history`.
    pub fn new(history: &History, cwd: PathBuf) -> Result<Self, ShellError> {
        let mut editor = Editor::<ShellCompleter, DefaultHistory>::new()?;
        editor.set_helper(Some(ShellCompleter::new(cwd)));
        for entry in history.entries() {
            editor.add_history_entry(entry.line.as_str())?;
        }
        Ok(Self { editor })
    }
}

impl LineSource for InteractiveSource {
    fn next_line(&mut self) -> Result<Option<String>, ShellError> {
        loop {
            match self.editor.readline(PROMPT) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        self.editor.add_history_entry(line.as_str())?;
                    }
                    return Ok(Some(line));
                }
                Err(ReadlineError::Interrupted) => {
                    debug!("interrupted at prompt");
                    continue;
                }
                Err(ReadlineError::Eof) => return Ok(None),
                Err(e) => return Err(e.into()),
            }
        }
    }

    fn prepare(&mut self, session: &Session) {
        if let Some(helper) = self.editor.helper_mut() {
            helper.sync(session);
        }
    }
}
