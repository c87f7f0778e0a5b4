use std::fs;
use std::path::{Path, PathBuf};

use rustyline::completion::Pair;

/// File name completion for arguments, relative to the session directory.
#[derive(Clone)]
pub struct PathCompleter {
    base: PathBuf,
}

impl PathCompleter {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    pub fn set_base(&mut self, base: &Path) {
        if self.base != base {
            self.base = base.to_path_buf();
        }
    }

    /// Splits what was typed into the directory part (kept verbatim in the
    /// replacement) and the file name prefix.
    fn split_input(incomplete: &str) -> (&str, &str) {
        match incomplete.rfind('/') {
            Some(idx) => (&incomplete[..=idx], &incomplete[idx + 1..]),
            None => ("", incomplete),
        }
    }

    pub fn complete_path(&self, incomplete: &str) -> Vec<Pair> {
        let (dir_part, prefix) = Self::split_input(incomplete);
        let search_dir = if dir_part.is_empty() {
            self.base.clone()
        } else {
            self.base.join(dir_part)
        };

        let Ok(entries) = fs::read_dir(&search_dir) else {
            return Vec::new();
        };

        let mut matches: Vec<Pair> = entries
            .filter_map(Result::ok)
            .filter_map(|entry| {
                let name = entry.file_name().to_str()?.to_string();
                if !name.starts_with(prefix) || (prefix.is_empty() && name.starts_with('.')) {
                    return None;
                }
                let typed = format!("{}{}", dir_part, name);
                Some(if entry.path().is_dir() {
                    Pair {
                        display: format!("{}/", name),
                        replacement: format!("{}/", typed),
                    }
                } else {
                    Pair {
                        display: name,
                        replacement: format!("{} ", typed),
                    }
                })
            })
            .collect();

        matches.sort_by(|a, b| a.display.cmp(&b.display));
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_complete_relative_to_base() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("src")).unwrap();
        fs::write(dir.path().join("src/main.rs"), "").unwrap();
        fs::write(dir.path().join("setup.sh"), "").unwrap();
        fs::write(dir.path().join(".secret"), "").unwrap();

        let completer = PathCompleter::new(dir.path().to_path_buf());

        let top: Vec<(String, String)> = completer
            .complete_path("s")
            .into_iter()
            .map(|p| (p.display, p.replacement))
            .collect();
        assert_eq!(
            top,
            vec![
                ("setup.sh".to_string(), "setup.sh ".to_string()),
                ("src/".to_string(), "src/".to_string()),
            ]
        );

        let nested = completer.complete_path("src/m");
        assert_eq!(nested.len(), 1);
        assert_eq!(nested[0].replacement, "src/main.rs ");

        assert_eq!(completer.complete_path("").len(), 2);
    }

    #[test]
    fn test_missing_directory() {
        let completer = PathCompleter::new(PathBuf::from("/"));
        assert!(completer.complete_path("/definitely/not/here/x").is_empty());
    }
}
