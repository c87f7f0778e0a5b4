//! Where per-command error messages go.

use std::cell::RefCell;
use std::io::{self, IsTerminal, Write};
use std::rc::Rc;

use tracing::debug;

use crate::highlight::SyntaxHighlighter;

/// Receives diagnostics such as `hsh: 3: foobarbaz` / `not found`.
///
/// Reporting never fails; a sink that cannot write drops the message.
pub trait Diagnostics {
    fn report(&mut self, context: &str, message: &str);
}

/// Writes `<context>: <message>` lines to standard error.
pub struct StderrDiagnostics {
    highlighter: Option<SyntaxHighlighter>,
}

impl Default for StderrDiagnostics {
    fn default() -> Self {
        Self::new()
    }
}

impl StderrDiagnostics {
    pub fn new() -> Self {
        let highlighter = io::stderr().is_terminal().then(SyntaxHighlighter::new);
        Self { highlighter }
    }
}

impl Diagnostics for StderrDiagnostics {
    fn report(&mut self, context: &str, message: &str) {
        let line = format!("{}: {}", context, message);
        let line = match &self.highlighter {
            Some(highlighter) => highlighter.highlight_error(&line),
            None => line,
        };
        if let Err(e) = writeln!(io::stderr().lock(), "{}", line) {
            debug!(error = %e, "writing diagnostic");
        }
    }
}

/// Keeps diagnostics in memory; clones share the same buffer.
#[derive(Clone, Default)]
pub struct MemoryDiagnostics {
    messages: Rc<RefCell<Vec<String>>>,
}

impl MemoryDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.borrow().clone()
    }

    pub fn clear(&self) {
        self.messages.borrow_mut().clear();
    }
}

impl Diagnostics for MemoryDiagnostics {
    fn report(&mut self, context: &str, message: &str) {
        self.messages
            .borrow_mut()
            .push(format!("{}: {}", context, message));
    }
}
