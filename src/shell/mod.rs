use std::env;
use std::fs::File;
use std::io::{self, BufReader, IsTerminal, Write};
use std::path::PathBuf;

use tracing::{debug, warn};

mod chain;
mod executor;
mod expand;
mod session;
mod tokenize;

pub use chain::{strip_comment, Chain, ChainLink, ChainOp};
pub use executor::{run_chain, run_line, Flow};
pub use expand::Expander;
pub use session::Session;
pub use tokenize::tokenize;

use crate::core::config::{Config, ConfigPaths, DEFAULT_HISTORY_MAX};
use crate::core::env::Environment;
use crate::error::ShellError;
use crate::flags::Flags;
use crate::input::{History, InteractiveSource, LineSource, OneShotSource, ReaderSource};
use crate::process::signal::InterruptFlag;

pub struct Shell {
    session: Session,
    source: Box<dyn LineSource>,
    interrupt: Option<InterruptFlag>,
}

impl Shell {
    pub fn new(session: Session, source: Box<dyn LineSource>) -> Self {
        Shell {
            session,
            source,
            interrupt: None,
        }
    }

    /// Builds the shell for this process: host environment, rc file,
    /// persisted history, and the line source picked from `flags`.
    pub fn from_flags(program: &str, flags: &Flags) -> Result<Self, ShellError> {
        let env = Environment::from_host();
        let cwd = env::current_dir()?;

        let (history, directives) = match ConfigPaths::new() {
            Ok(paths) => {
                let mut config = Config::new(paths);
                if let Err(e) = config.load(&env) {
                    warn!("{}", e);
                }
                let history = History::new(config.paths.history_path.clone(), config.history_max)
                    .unwrap_or_else(|e| {
                        warn!("{}", e);
                        History::in_memory(config.history_max)
                    });
                (history, config.directives)
            }
            Err(e) => {
                warn!("{}; history will not be saved", e);
                (History::in_memory(DEFAULT_HISTORY_MAX), Vec::new())
            }
        };

        let mut session = Session::new(program, env, history, cwd.clone());
        session.apply_directives(&directives);

        let source: Box<dyn LineSource> = if let Some(command) = flags.get_value("command") {
            Box::new(OneShotSource::new(command))
        } else if let Some(script) = flags.script() {
            if !flags.script_args().is_empty() {
                debug!(args = ?flags.script_args(), "ignoring script arguments");
            }
            let path = PathBuf::from(script);
            let file = File::open(&path).map_err(|source| ShellError::ScriptOpen { path, source })?;
            Box::new(ReaderSource::new(BufReader::new(file)))
        } else if io::stdin().is_terminal() {
            session.set_interactive(true);
            Box::new(InteractiveSource::new(session.history(), cwd)?)
        } else {
            Box::new(ReaderSource::new(io::stdin().lock()))
        };

        // Scripts and piped input keep the default SIGINT disposition.
        let interrupt = if session.is_interactive() {
            match InterruptFlag::install() {
                Ok(flag) => Some(flag),
                Err(e) => {
                    warn!("{}", e);
                    None
                }
            }
        } else {
            None
        };

        Ok(Shell {
            session,
            source,
            interrupt,
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Reads and runs lines until `exit` or end of input, then saves
    /// history. Returns the status the process should exit with.
    pub fn run(&mut self) -> Result<i32, ShellError> {
        let result = self.read_eval_loop();
        self.finish();
        result
    }

    fn read_eval_loop(&mut self) -> Result<i32, ShellError> {
        loop {
            self.source.prepare(&self.session);
            let Some(line) = self.source.next_line()? else {
                debug!(status = self.session.status(), "end of input");
                return Ok(self.session.status());
            };

            self.session.accept_line(&line);
            let flow = run_line(&mut self.session, &line);
            self.after_line();

            if let Flow::Exit(code) = flow {
                debug!(code, "exit requested");
                return Ok(code);
            }
        }
    }

    /// Moves the prompt to a fresh line when a child was interrupted.
    fn after_line(&mut self) {
        let interrupted = self.interrupt.as_ref().is_some_and(InterruptFlag::take);
        if interrupted && self.session.is_interactive() {
            if let Err(e) = writeln!(self.session.out()) {
                debug!(error = %e, "writing newline after interrupt");
            }
        }
    }

    fn finish(&mut self) {
        if let Err(e) = self.session.flush() {
            debug!(error = %e, "flushing output");
        }
        if let Err(e) = self.session.persist_history() {
            warn!("{}", e);
        }
    }
}
