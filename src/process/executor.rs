use std::os::unix::process::{CommandExt, ExitStatusExt};
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use tracing::debug;

use super::{ProcessError, STATUS_SIGNAL_BASE};

/// Runs one external program in the foreground and waits for it.
#[derive(Clone, Debug, Default)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }

    /// Spawns `program` with `argv` (argv[0] kept as given), exactly the
    /// variables in `env`, and `cwd` as working directory. All three standard
    /// streams are inherited.
    pub fn spawn_process<'a>(
        &self,
        program: &Path,
        argv: &[String],
        env: impl IntoIterator<Item = (&'a str, &'a str)>,
        cwd: &Path,
    ) -> Result<i32, ProcessError> {
        let mut command = build_command(program, argv, env, cwd);
        command.stdout(Stdio::inherit());

        let mut child = command.spawn().map_err(ProcessError::Spawn)?;
        debug!(pid = child.id(), program = %program.display(), "spawned");

        let status = child.wait().map_err(ProcessError::Wait)?;
        let code = status_code(status);
        debug!(pid = child.id(), code, "child finished");
        Ok(code)
    }

    /// Like [`spawn_process`](Self::spawn_process), but collects the child's
    /// standard output instead of inheriting it.
    pub fn capture_process<'a>(
        &self,
        program: &Path,
        argv: &[String],
        env: impl IntoIterator<Item = (&'a str, &'a str)>,
        cwd: &Path,
    ) -> Result<(i32, Vec<u8>), ProcessError> {
        let mut command = build_command(program, argv, env, cwd);
        command.stdout(Stdio::piped());

        let child = command.spawn().map_err(ProcessError::Spawn)?;
        let pid = child.id();
        debug!(pid, program = %program.display(), "spawned with captured stdout");

        let output = child.wait_with_output().map_err(ProcessError::Wait)?;
        let code = status_code(output.status);
        debug!(pid, code, bytes = output.stdout.len(), "child finished");
        Ok((code, output.stdout))
    }
}

fn build_command<'a>(
    program: &Path,
    argv: &[String],
    env: impl IntoIterator<Item = (&'a str, &'a str)>,
    cwd: &Path,
) -> Command {
    let mut command = Command::new(program);
    if let Some(name) = argv.first() {
        command.arg0(name);
    }
    command
        .args(argv.iter().skip(1))
        .stdin(Stdio::inherit())
        .stderr(Stdio::inherit())
        .env_clear()
        .envs(env)
        .current_dir(cwd);
    command
}

/// Exit code of a finished child, or 128+N when it died from signal N.
pub fn status_code(status: ExitStatus) -> i32 {
    match (status.code(), status.signal()) {
        (Some(code), _) => code,
        (None, Some(signal)) => STATUS_SIGNAL_BASE + signal,
        (None, None) => STATUS_SIGNAL_BASE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::STATUS_NOT_EXECUTABLE;
    use std::path::PathBuf;

    const NO_ENV: [(&str, &str); 0] = [];

    fn sh(script: &str) -> Vec<String> {
        vec!["sh".to_string(), "-c".to_string(), script.to_string()]
    }

    #[test]
    fn test_exit_code_passthrough() {
        let executor = ProcessExecutor::new();
        let code = executor
            .spawn_process(Path::new("/bin/sh"), &sh("exit 3"), NO_ENV, Path::new("/"))
            .unwrap();
        assert_eq!(code, 3);
    }

    #[test]
    fn test_signal_status() {
        let executor = ProcessExecutor::new();
        let code = executor
            .spawn_process(Path::new("/bin/sh"), &sh("kill -TERM $$"), NO_ENV, Path::new("/"))
            .unwrap();
        assert_eq!(code, 128 + libc::SIGTERM);
    }

    #[test]
    fn test_child_sees_only_given_env_and_cwd() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out");
        let script = format!(
            "printf '%s|%s|%s' \"$ONLY\" \"${{HOME:-unset}}\" \"$(pwd)\" > {}",
            out.display()
        );
        let executor = ProcessExecutor::new();
        let code = executor
            .spawn_process(
                Path::new("/bin/sh"),
                &sh(&script),
                [("ONLY", "yes")],
                dir.path(),
            )
            .unwrap();
        assert_eq!(code, 0);

        let cwd = dir.path().canonicalize().unwrap();
        assert_eq!(
            std::fs::read_to_string(out).unwrap(),
            format!("yes|unset|{}", cwd.display())
        );
    }

    #[test]
    fn test_capture_stdout() {
        let executor = ProcessExecutor::new();
        let (code, out) = executor
            .capture_process(
                Path::new("/bin/sh"),
                &sh("echo captured; exit 4"),
                NO_ENV,
                Path::new("/"),
            )
            .unwrap();
        assert_eq!(code, 4);
        assert_eq!(out, b"captured\n");
    }

    #[test]
    fn test_spawn_failure() {
        let executor = ProcessExecutor::new();
        let err = executor
            .spawn_process(
                &PathBuf::from("/definitely/not/here"),
                &["x".to_string()],
                NO_ENV,
                Path::new("/"),
            )
            .unwrap_err();
        assert!(matches!(err, ProcessError::Spawn(_)));
        assert_eq!(err.status(), STATUS_NOT_EXECUTABLE);
    }
}
