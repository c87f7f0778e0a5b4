use tracing::debug;

use super::chain::Chain;
use super::expand::Expander;
use super::session::Session;
use super::tokenize::tokenize;
use crate::core::commands::{Builtin, Outcome};
use crate::path::{resolve, Resolution};
use crate::process::{STATUS_NOT_EXECUTABLE, STATUS_NOT_FOUND};

/// Whether the interpreter keeps reading after a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit(i32),
}

/// Parses and runs one input line.
pub fn run_line(session: &mut Session, line: &str) -> Flow {
    let chain = Chain::parse(line);
    run_chain(session, &chain)
}

/// Runs chain elements strictly left to right. A skipped element leaves the
/// status as it was; `exit` stops the walk immediately.
pub fn run_chain(session: &mut Session, chain: &Chain) -> Flow {
    for link in chain.links() {
        if !link.op.should_run(session.status()) {
            debug!(segment = %link.text, op = ?link.op, "skipped");
            continue;
        }
        if let Flow::Exit(code) = run_segment(session, &link.text) {
            return Flow::Exit(code);
        }
    }
    Flow::Continue
}

fn run_segment(session: &mut Session, segment: &str) -> Flow {
    let expanded = Expander {
        aliases: session.aliases(),
        env: session.env(),
        status: session.status(),
        pid: std::process::id(),
    }
    .expand(segment)
    .into_owned();

    let argv = tokenize(&expanded);
    let Some(name) = argv.first() else {
        return Flow::Continue;
    };

    match resolve(name, session.env(), session.cwd()) {
        Resolution::Builtin(builtin) => run_builtin(session, builtin, &argv),
        Resolution::External(program) => {
            let status = match session.spawn(&program, &argv) {
                Ok(code) => code,
                Err(e) => {
                    session.report(name, &e.to_string());
                    e.status()
                }
            };
            session.set_status(status);
            Flow::Continue
        }
        Resolution::NotExecutable(_) => {
            session.report(name, "Permission denied");
            session.set_status(STATUS_NOT_EXECUTABLE);
            Flow::Continue
        }
        Resolution::NotFound => {
            session.report(name, "not found");
            session.set_status(STATUS_NOT_FOUND);
            Flow::Continue
        }
    }
}

fn run_builtin(session: &mut Session, builtin: Builtin, argv: &[String]) -> Flow {
    match builtin.execute(session, &argv[1..]) {
        Ok(Outcome::Status(status)) => {
            session.set_status(status);
            Flow::Continue
        }
        Ok(Outcome::Exit(status)) => {
            session.set_status(status);
            Flow::Exit(status)
        }
        Err(e) => {
            session.report(builtin.name(), &e.to_string());
            session.set_status(e.status());
            Flow::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::test_support::Harness;

    fn run(h: &mut Harness, line: &str) -> Flow {
        h.session.accept_line(line);
        run_line(&mut h.session, line)
    }

    #[test]
    fn test_sequence_always_runs() {
        let mut h = Harness::new();
        assert_eq!(run(&mut h, "false ; echo after"), Flow::Continue);
        assert_eq!(h.output(), "after\n");
        assert_eq!(h.session.status(), 0);
    }

    #[test]
    fn test_and_or_short_circuit() {
        let mut h = Harness::new();
        run(&mut h, "true && echo yes || echo no");
        assert_eq!(h.output(), "yes\n");

        let mut h = Harness::new();
        run(&mut h, "false && echo yes || echo no");
        assert_eq!(h.output(), "no\n");

        let mut h = Harness::new();
        run(&mut h, "false && echo skipped");
        assert_eq!(h.output(), "");
        assert_eq!(h.session.status(), 1);
    }

    #[test]
    fn test_not_found_continues() {
        let mut h = Harness::new();
        run(&mut h, "foobarbaz ; echo still");
        assert_eq!(h.output(), "still\n");
        assert_eq!(h.diagnostics(), vec!["hsh: 1: foobarbaz: not found"]);

        run(&mut h, "foobarbaz");
        assert_eq!(h.session.status(), 127);
    }

    #[test]
    fn test_permission_denied() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("data"), "x").unwrap();
        let mut h = Harness::in_dir(dir.path());
        run(&mut h, "./data");
        assert_eq!(h.session.status(), 126);
        assert_eq!(h.diagnostics(), vec!["hsh: 1: ./data: Permission denied"]);
    }

    #[test]
    fn test_status_variable() {
        let mut h = Harness::new();
        run(&mut h, "cd /nonexistent ; echo $?");
        assert_eq!(h.output(), "2\n");
        assert_eq!(
            h.diagnostics(),
            vec!["hsh: 1: cd: can't cd to /nonexistent"]
        );
    }

    #[test]
    fn test_exit_unwinds_chain() {
        let mut h = Harness::new();
        assert_eq!(run(&mut h, "exit 7 ; echo never"), Flow::Exit(7));
        assert_eq!(h.output(), "");

        assert_eq!(run(&mut h, "exit abc ; echo $?"), Flow::Continue);
        assert_eq!(h.output(), "2\n");
    }

    #[test]
    fn test_setenv_visible_in_later_segment() {
        let mut h = Harness::new();
        run(&mut h, "setenv X v ; echo $X");
        run(&mut h, "echo again $X");
        assert_eq!(h.output(), "v\nagain v\n");
    }

    #[test]
    fn test_alias_runs() {
        let mut h = Harness::new();
        run(&mut h, "alias say=echo ; say it");
        assert_eq!(h.output(), "it\n");
        assert_eq!(h.session.status(), 0);
    }

    #[test]
    fn test_child_uses_session_cwd() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("inner")).unwrap();
        let mut h = Harness::in_dir(dir.path());
        run(&mut h, "cd inner && pwd");
        let expected = dir.path().join("inner").canonicalize().unwrap();
        assert_eq!(h.output(), format!("{}\n", expected.display()));
    }

    #[test]
    fn test_blank_and_comment_lines() {
        let mut h = Harness::new();
        h.session.set_status(5);
        run(&mut h, "   # nothing here");
        run(&mut h, "$UNSET_VARIABLE");
        assert_eq!(h.session.status(), 5);
        assert_eq!(h.session.line_count(), 2);

        run(&mut h, "");
        run(&mut h, "foobarbaz");
        assert_eq!(h.diagnostics(), vec!["hsh: 4: foobarbaz: not found"]);
    }
}
