use std::borrow::Cow;
use std::path::PathBuf;

use super::{command::CommandCompleter, path::PathCompleter};
use crate::highlight::SyntaxHighlighter;
use crate::shell::Session;

use rustyline::{
    completion::{Completer, Pair},
    highlight::{CmdKind, Highlighter},
    hint::Hinter,
    validate::Validator,
    Context, Helper,
};

/// Line editor helper: completion plus syntax highlighting.
#[derive(Clone)]
pub struct ShellCompleter {
    command_completer: CommandCompleter,
    path_completer: PathCompleter,
    highlighter: SyntaxHighlighter,
}

impl ShellCompleter {
    pub fn new(cwd: PathBuf) -> Self {
        ShellCompleter {
            command_completer: CommandCompleter::new(),
            path_completer: PathCompleter::new(cwd),
            highlighter: SyntaxHighlighter::new(),
        }
    }

    /// Picks up `PATH`, aliases and the working directory from the session.
    pub fn sync(&mut self, session: &Session) {
        self.command_completer
            .refresh_commands(session.env().lookup("PATH"), session.cwd());
        self.command_completer.update_aliases(session.aliases());
        self.path_completer.set_base(session.cwd());
    }

    fn word_start(line: &str) -> usize {
        line.rfind(char::is_whitespace).map_or(0, |idx| idx + 1)
    }

    /// True when the word at the cursor is in command position.
    fn is_command_position(before_word: &str) -> bool {
        let trimmed = before_word.trim_end();
        trimmed.is_empty()
            || trimmed.ends_with("&&")
            || trimmed.ends_with("||")
            || trimmed.ends_with(';')
    }

    fn candidates(&self, line: &str, pos: usize) -> (usize, Vec<Pair>) {
        let upto = &line[..pos];
        let start = Self::word_start(upto);
        let word = &upto[start..];

        if Self::is_command_position(&upto[..start]) && !word.contains('/') {
            (start, self.command_completer.complete_command(word))
        } else {
            (start, self.path_completer.complete_path(word))
        }
    }
}

impl Helper for ShellCompleter {}

impl Highlighter for ShellCompleter {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Owned(self.highlighter.highlight_command(line))
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _kind: CmdKind) -> bool {
        true
    }

    fn highlight_hint<'h>(&self, hint: &'h str) -> Cow<'h, str> {
        Cow::Owned(self.highlighter.highlight_hint(hint))
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;
}

impl Validator for ShellCompleter {}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.candidates(line, pos))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::test_support::Harness;
    use std::fs;

    #[test]
    fn test_command_then_path_position() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let mut h = Harness::in_dir(dir.path());
        h.session.aliases_mut().add("hello", "echo hello");
        let mut completer = ShellCompleter::new(PathBuf::from("/"));
        completer.sync(&h.session);

        let (start, pairs) = completer.candidates("hel", 3);
        assert_eq!(start, 0);
        assert!(pairs.iter().any(|p| p.display == "help"));
        assert!(pairs.iter().any(|p| p.display == "hello (alias)"));

        let line = "cat no";
        let (start, pairs) = completer.candidates(line, line.len());
        assert_eq!(start, 4);
        assert_eq!(pairs[0].replacement, "notes.txt ");

        let line = "true && hel";
        let (start, pairs) = completer.candidates(line, line.len());
        assert_eq!(start, 8);
        assert!(pairs.iter().any(|p| p.display == "help"));
    }
}
