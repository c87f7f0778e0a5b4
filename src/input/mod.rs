//! Where command lines come from.

mod completer;
mod editor;
pub mod history;

use std::io::BufRead;

pub use completer::ShellCompleter;
pub use editor::InteractiveSource;
pub use history::{History, HistoryEntry};

use crate::error::ShellError;
use crate::shell::Session;

pub trait LineSource {
    /// The next line without its terminator, or `None` at end of input.
    fn next_line(&mut self) -> Result<Option<String>, ShellError>;

    /// Called before every read with the session as it stands.
    fn prepare(&mut self, _session: &Session) {}
}

/// Reads lines from a script file or redirected standard input.
pub struct ReaderSource<R> {
    reader: R,
    buf: Vec<u8>,
}

impl<R: BufRead> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
        }
    }
}

impl<R: BufRead> LineSource for ReaderSource<R> {
    fn next_line(&mut self) -> Result<Option<String>, ShellError> {
        self.buf.clear();
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(None);
        }
        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }
        Ok(Some(String::from_utf8_lossy(&self.buf).into_owned()))
    }
}

/// A single line, as given with `-c`.
pub struct OneShotSource {
    line: Option<String>,
}

impl OneShotSource {
    pub fn new(line: &str) -> Self {
        Self {
            line: Some(line.to_string()),
        }
    }
}

impl LineSource for OneShotSource {
    fn next_line(&mut self) -> Result<Option<String>, ShellError> {
        Ok(self.line.take())
    }
}
