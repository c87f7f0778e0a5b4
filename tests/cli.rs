use std::fs;
use std::io::Write;
use std::os::unix::process::ExitStatusExt;
use std::path::Path;
use std::process::{Command, Output, Stdio};
use std::thread;
use std::time::Duration;

const TEST_PATH: &str = "/usr/local/bin:/usr/bin:/bin";

fn hsh(home: &Path) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_hsh"));
    cmd.env_clear()
        .env("HOME", home)
        .env("PATH", TEST_PATH)
        .current_dir(home);
    cmd
}

fn run_c(home: &Path, line: &str) -> Output {
    hsh(home).args(["-c", line]).output().unwrap()
}

fn run_stdin(home: &Path, script: &str) -> Output {
    let mut child = hsh(home)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();
    child
        .stdin
        .take()
        .unwrap()
        .write_all(script.as_bytes())
        .unwrap();
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_chain_operators() {
    let home = tempfile::tempdir().unwrap();
    let output = run_c(home.path(), "echo hi && false || echo recovered ; echo $?");
    assert_eq!(stdout(&output), "hi\nrecovered\n0\n");
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_exit_status() {
    let home = tempfile::tempdir().unwrap();
    assert_eq!(run_c(home.path(), "exit 7").status.code(), Some(7));
    assert_eq!(run_c(home.path(), "exit 300").status.code(), Some(44));
    assert_eq!(run_c(home.path(), "false").status.code(), Some(1));
}

#[test]
fn test_not_found_diagnostic() {
    let home = tempfile::tempdir().unwrap();
    let output = run_stdin(home.path(), "true\nfoobarbaz\necho $?\n");
    assert_eq!(stdout(&output), "127\n");
    assert!(
        stderr(&output).contains(": 2: foobarbaz: not found"),
        "stderr was {:?}",
        stderr(&output)
    );
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_end_of_input_uses_last_status() {
    let home = tempfile::tempdir().unwrap();
    let output = run_stdin(home.path(), "foobarbaz\n");
    assert_eq!(output.status.code(), Some(127));
}

#[test]
fn test_illegal_exit_does_not_terminate() {
    let home = tempfile::tempdir().unwrap();
    let output = run_stdin(home.path(), "exit abc\necho alive $?\n");
    assert_eq!(stdout(&output), "alive 2\n");
    assert!(stderr(&output).contains(": 1: exit: Illegal number: abc"));
}

#[test]
fn test_cd_changes_child_directory() {
    let home = tempfile::tempdir().unwrap();
    fs::create_dir(home.path().join("work")).unwrap();
    let expected = home.path().join("work").canonicalize().unwrap();

    let output = run_stdin(home.path(), "cd work\npwd\ncd /nonexistent\necho $?\npwd\n");
    assert_eq!(
        stdout(&output),
        format!("{0}\n2\n{0}\n", expected.display())
    );
    assert!(stderr(&output).contains("cd: can't cd to /nonexistent"));
}

#[test]
fn test_environment_reaches_children() {
    let home = tempfile::tempdir().unwrap();
    let output = run_stdin(
        home.path(),
        "setenv GREETING hello\nsh -c env\nunsetenv GREETING\nenv\n",
    );
    let text = stdout(&output);
    assert_eq!(text.matches("GREETING=hello").count(), 1);
}

#[test]
fn test_history_is_persisted() {
    let home = tempfile::tempdir().unwrap();
    let output = run_stdin(home.path(), "setenv A 1\n\nhistory\n");
    assert_eq!(stdout(&output), "0: setenv A 1\n1: history\n");

    let saved = fs::read_to_string(home.path().join(".hsh_history")).unwrap();
    assert_eq!(saved, "setenv A 1\nhistory\n");

    let output = run_stdin(home.path(), "history 1\n");
    assert_eq!(stdout(&output), "2: history 1\n");
}

#[test]
fn test_rc_file() {
    let home = tempfile::tempdir().unwrap();
    fs::write(
        home.path().join(".hshrc"),
        "# startup\nalias greet='echo hello'\nexport WHERE=$HOME/bin\n",
    )
    .unwrap();

    let output = run_c(home.path(), "greet world ; echo $WHERE");
    assert_eq!(
        stdout(&output),
        format!("hello world\n{}/bin\n", home.path().display())
    );
}

#[test]
fn test_script_argument() {
    let home = tempfile::tempdir().unwrap();
    let script = home.path().join("script.hsh");
    fs::write(&script, "echo one # trailing comment\nexit 5\necho never\n").unwrap();

    let output = hsh(home.path()).arg(&script).output().unwrap();
    assert_eq!(stdout(&output), "one\n");
    assert_eq!(output.status.code(), Some(5));

    let missing = hsh(home.path()).arg("missing.hsh").output().unwrap();
    assert_eq!(missing.status.code(), Some(127));
    assert!(stderr(&missing).contains("Can't open missing.hsh"));
}

#[test]
fn test_version_and_bad_flag() {
    let home = tempfile::tempdir().unwrap();
    let output = hsh(home.path()).arg("--version").output().unwrap();
    assert!(stdout(&output).starts_with("hsh "));

    let output = hsh(home.path()).arg("--bogus").output().unwrap();
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn test_blank_and_comment_lines_are_counted() {
    let home = tempfile::tempdir().unwrap();
    let output = run_stdin(home.path(), "\n# note\nfoobarbaz\n");
    assert!(
        stderr(&output).contains(": 3: foobarbaz: not found"),
        "stderr was {:?}",
        stderr(&output)
    );
}

#[test]
fn test_rc_bad_line_keeps_the_rest() {
    let home = tempfile::tempdir().unwrap();
    fs::write(
        home.path().join(".hshrc"),
        "alias first=echo\nalias broken\nalias second=echo\n",
    )
    .unwrap();

    let output = run_c(home.path(), "first a ; second b");
    assert_eq!(stdout(&output), "a\nb\n");
}

#[test]
fn test_script_arguments_are_accepted() {
    let home = tempfile::tempdir().unwrap();
    let script = home.path().join("args.hsh");
    fs::write(&script, "echo ran\n").unwrap();

    let output = hsh(home.path()).arg(&script).arg("extra").output().unwrap();
    assert_eq!(stdout(&output), "ran\n");
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_sigint_terminates_non_interactive_shell() {
    let home = tempfile::tempdir().unwrap();
    let mut child = hsh(home.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .unwrap();
    let mut stdin = child.stdin.take().unwrap();
    stdin.write_all(b"sleep 2\necho after\n").unwrap();

    thread::sleep(Duration::from_millis(300));
    let pid = child.id() as libc::pid_t;
    assert_eq!(unsafe { libc::kill(pid, libc::SIGINT) }, 0);
    drop(stdin);

    let output = child.wait_with_output().unwrap();
    assert_eq!(output.status.signal(), Some(libc::SIGINT));
    assert_eq!(stdout(&output), "");
}
