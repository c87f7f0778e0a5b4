use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::aliases::AliasManager;
use crate::core::config::Directive;
use crate::core::env::Environment;
use crate::diagnostic::{Diagnostics, StderrDiagnostics};
use crate::input::history::{History, HistoryError};
use crate::process::{ProcessError, ProcessExecutor};

/// Everything a line can read or change while it runs.
///
/// The working directory lives here rather than in the process, so builtins
/// never call `set_current_dir` and children are started in `cwd`.
pub struct Session {
    program: String,
    env: Environment,
    history: History,
    aliases: AliasManager,
    cwd: PathBuf,
    status: i32,
    line_count: usize,
    interactive: bool,
    out: Box<dyn Write>,
    /// Set once `out` is not the process stdout; children are then piped into it.
    capture_children: bool,
    diagnostics: Box<dyn Diagnostics>,
    executor: ProcessExecutor,
}

impl Session {
    pub fn new(program: &str, env: Environment, history: History, cwd: PathBuf) -> Self {
        Session {
            program: program.to_string(),
            env,
            history,
            aliases: AliasManager::new(),
            cwd,
            status: 0,
            line_count: 0,
            interactive: false,
            out: Box::new(io::stdout()),
            capture_children: false,
            diagnostics: Box::new(StderrDiagnostics::new()),
            executor: ProcessExecutor::new(),
        }
    }

    pub fn with_output(mut self, out: Box<dyn Write>) -> Self {
        self.out = out;
        self.capture_children = true;
        self
    }

    pub fn with_diagnostics(mut self, diagnostics: Box<dyn Diagnostics>) -> Self {
        self.diagnostics = diagnostics;
        self
    }

    pub fn set_interactive(&mut self, interactive: bool) {
        self.interactive = interactive;
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut Environment {
        &mut self.env
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    pub fn aliases(&self) -> &AliasManager {
        &self.aliases
    }

    pub fn aliases_mut(&mut self) -> &mut AliasManager {
        &mut self.aliases
    }

    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    pub fn set_cwd(&mut self, cwd: PathBuf) {
        self.cwd = cwd;
    }

    pub fn status(&self) -> i32 {
        self.status
    }

    pub fn set_status(&mut self, status: i32) {
        self.status = status;
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }

    pub fn out(&mut self) -> &mut dyn Write {
        self.out.as_mut()
    }

    /// Records a line read from the source. Every line counts toward the
    /// diagnostic line number, blank and comment-only ones included.
    pub fn accept_line(&mut self, line: &str) {
        self.history.add(line);
        self.line_count += 1;
    }

    /// Emits `<program>: <line>: <command>: <message>`.
    pub fn report(&mut self, command: &str, message: &str) {
        let context = format!("{}: {}: {}", self.program, self.line_count, command);
        self.diagnostics.report(&context, message);
    }

    /// Runs an external program with this session's environment and directory.
    pub fn spawn(&mut self, program: &Path, argv: &[String]) -> Result<i32, ProcessError> {
        // Keep builtin output ahead of whatever the child prints.
        if let Err(e) = self.out.flush() {
            debug!(error = %e, "flushing before spawn");
        }
        if !self.capture_children {
            return self
                .executor
                .spawn_process(program, argv, self.env.iter(), &self.cwd);
        }

        let (code, output) =
            self.executor
                .capture_process(program, argv, self.env.iter(), &self.cwd)?;
        if let Err(e) = self.out.write_all(&output) {
            debug!(error = %e, "dropping child output");
        }
        Ok(code)
    }

    /// Applies rc-file directives; environment values may refer to
    /// `$HOME` and `$PATH` as they stand at that point.
    pub fn apply_directives(&mut self, directives: &[Directive]) {
        for directive in directives {
            match directive {
                Directive::Alias { name, value } => self.aliases.add(name, value),
                Directive::SetEnv { name, value } => {
                    let value = self.env.expand_value(value).into_owned();
                    if let Err(e) = self.env.set(name, &value) {
                        debug!(error = %e, "skipping rc variable");
                    }
                }
            }
        }
    }

    pub fn persist_history(&self) -> Result<(), HistoryError> {
        self.history.persist()
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}
