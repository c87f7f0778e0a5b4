use std::ffi::CString;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::commands::Builtin;
use crate::core::env::Environment;

/// What a command name maps to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Builtin(Builtin),
    External(PathBuf),
    /// Named by path, exists, but cannot be executed.
    NotExecutable(PathBuf),
    NotFound,
}

/// Builtins first; then a name with a `/` is taken as a path, anything
/// else is searched for along `PATH` (empty entries mean `cwd`).
pub fn resolve(name: &str, env: &Environment, cwd: &Path) -> Resolution {
    if let Some(builtin) = Builtin::lookup(name) {
        return Resolution::Builtin(builtin);
    }

    let resolution = if name.contains('/') {
        resolve_path(name, cwd)
    } else {
        search(name, env.lookup("PATH"), cwd)
    };
    debug!(command = name, ?resolution, "resolved");
    resolution
}

fn resolve_path(name: &str, cwd: &Path) -> Resolution {
    let candidate = cwd.join(name);
    if is_executable(&candidate) {
        Resolution::External(candidate)
    } else if candidate.exists() {
        Resolution::NotExecutable(candidate)
    } else {
        Resolution::NotFound
    }
}

fn search(name: &str, path_var: Option<&str>, cwd: &Path) -> Resolution {
    let Some(path_var) = path_var else {
        return Resolution::NotFound;
    };
    if name.is_empty() {
        return Resolution::NotFound;
    }

    path_var
        .split(':')
        .map(|dir| {
            if dir.is_empty() {
                cwd.join(name)
            } else {
                cwd.join(dir).join(name)
            }
        })
        .find(|candidate| is_executable(candidate))
        .map_or(Resolution::NotFound, Resolution::External)
}

/// A regular file the current user may execute.
pub fn is_executable(path: &Path) -> bool {
    path.is_file() && access_ok(path, libc::X_OK)
}

/// A directory the current user may enter.
pub fn is_searchable_dir(path: &Path) -> bool {
    path.is_dir() && access_ok(path, libc::X_OK)
}

fn access_ok(path: &Path, mode: libc::c_int) -> bool {
    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: c_path is a valid NUL-terminated string for the duration of the call.
    unsafe { libc::access(c_path.as_ptr(), mode) == 0 }
}
