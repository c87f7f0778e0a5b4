use thiserror::Error;

mod alias;
mod cd;
mod env;
mod exit;
mod help;
mod history;

pub use alias::AliasCommand;
pub use cd::CdCommand;
pub use env::{EnvCommand, SetenvCommand, UnsetenvCommand};
pub use exit::ExitCommand;
pub use help::HelpCommand;
pub use history::HistoryCommand;

use crate::core::env::EnvError;
use crate::shell::Session;

pub const STATUS_USAGE: i32 = 1;
pub const STATUS_CD_FAILED: i32 = 2;
pub const STATUS_ILLEGAL_NUMBER: i32 = 2;

/// Result of a builtin that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Status(i32),
    /// Stop the interpreter with this final status.
    Exit(i32),
}

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("Illegal number: {0}")]
    IllegalNumber(String),
    #[error("can't cd to {0}")]
    CdFailed(String),
    #[error("OLDPWD not set")]
    NoOldPwd,
    #[error("{0}")]
    Env(#[from] EnvError),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl CommandError {
    pub fn status(&self) -> i32 {
        match self {
            CommandError::IllegalNumber(_) => STATUS_ILLEGAL_NUMBER,
            CommandError::CdFailed(_) => STATUS_CD_FAILED,
            CommandError::InvalidArguments(_)
            | CommandError::NoOldPwd
            | CommandError::Env(_)
            | CommandError::IoError(_) => STATUS_USAGE,
        }
    }
}

pub trait Command {
    /// `args` excludes the command name itself.
    fn execute(&self, session: &mut Session, args: &[String]) -> Result<Outcome, CommandError>;
}

/// The builtin set, matched by exact name before any `PATH` search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Exit,
    Env,
    Setenv,
    Unsetenv,
    Cd,
    Help,
    History,
    Alias,
}

impl Builtin {
    pub const ALL: [Builtin; 8] = [
        Builtin::Exit,
        Builtin::Env,
        Builtin::Setenv,
        Builtin::Unsetenv,
        Builtin::Cd,
        Builtin::Help,
        Builtin::History,
        Builtin::Alias,
    ];

    pub fn lookup(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Builtin::Exit => "exit",
            Builtin::Env => "env",
            Builtin::Setenv => "setenv",
            Builtin::Unsetenv => "unsetenv",
            Builtin::Cd => "cd",
            Builtin::Help => "help",
            Builtin::History => "history",
            Builtin::Alias => "alias",
        }
    }

    pub fn usage(self) -> &'static str {
        match self {
            Builtin::Exit => "exit [status]",
            Builtin::Env => "env",
            Builtin::Setenv => "setenv NAME VALUE",
            Builtin::Unsetenv => "unsetenv NAME...",
            Builtin::Cd => "cd [dir | -]",
            Builtin::Help => "help [builtin]",
            Builtin::History => "history [count]",
            Builtin::Alias => "alias [name[=value] ...]",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Builtin::Exit => "Leave the shell with status, or the last status if omitted.",
            Builtin::Env => "Print the environment, one NAME=VALUE per line.",
            Builtin::Setenv => "Create or overwrite an environment variable.",
            Builtin::Unsetenv => "Remove environment variables.",
            Builtin::Cd => "Change directory to dir, the previous directory (-), or HOME.",
            Builtin::Help => "Show usage for all builtins or a single one.",
            Builtin::History => "List history entries, optionally only the last count.",
            Builtin::Alias => "List, show, or define aliases.",
        }
    }

    fn command(self) -> CommandType {
        match self {
            Builtin::Exit => CommandType::Exit(ExitCommand),
            Builtin::Env => CommandType::Env(EnvCommand),
            Builtin::Setenv => CommandType::Setenv(SetenvCommand),
            Builtin::Unsetenv => CommandType::Unsetenv(UnsetenvCommand),
            Builtin::Cd => CommandType::Cd(CdCommand),
            Builtin::Help => CommandType::Help(HelpCommand),
            Builtin::History => CommandType::History(HistoryCommand),
            Builtin::Alias => CommandType::Alias(AliasCommand),
        }
    }

    pub fn execute(self, session: &mut Session, args: &[String]) -> Result<Outcome, CommandError> {
        self.command().execute(session, args)
    }
}

#[derive(Clone)]
enum CommandType {
    Exit(ExitCommand),
    Env(EnvCommand),
    Setenv(SetenvCommand),
    Unsetenv(UnsetenvCommand),
    Cd(CdCommand),
    Help(HelpCommand),
    History(HistoryCommand),
    Alias(AliasCommand),
}

impl Command for CommandType {
    fn execute(&self, session: &mut Session, args: &[String]) -> Result<Outcome, CommandError> {
        match self {
            CommandType::Exit(cmd) => cmd.execute(session, args),
            CommandType::Env(cmd) => cmd.execute(session, args),
            CommandType::Setenv(cmd) => cmd.execute(session, args),
            CommandType::Unsetenv(cmd) => cmd.execute(session, args),
            CommandType::Cd(cmd) => cmd.execute(session, args),
            CommandType::Help(cmd) => cmd.execute(session, args),
            CommandType::History(cmd) => cmd.execute(session, args),
            CommandType::Alias(cmd) => cmd.execute(session, args),
        }
    }
}
