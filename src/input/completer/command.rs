use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use rustyline::completion::Pair;

use crate::core::aliases::AliasManager;
use crate::core::commands::Builtin;

/// Candidates for the first word: builtins, programs on `PATH`, aliases.
#[derive(Clone, Default)]
pub struct CommandCompleter {
    commands: BTreeSet<String>,
    aliases: BTreeSet<String>,
    scanned_path: Option<String>,
}

impl CommandCompleter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rescans `PATH` only when it differs from the last scan.
    pub fn refresh_commands(&mut self, path_var: Option<&str>, cwd: &Path) {
        if self.scanned_path.as_deref() == path_var && !self.commands.is_empty() {
            return;
        }
        self.commands.clear();
        self.commands
            .extend(Builtin::ALL.iter().map(|b| b.name().to_string()));
        if let Some(path_var) = path_var {
            for dir in path_var.split(':') {
                self.add_dir(&cwd.join(dir));
            }
        }
        self.scanned_path = path_var.map(str::to_string);
    }

    fn add_dir(&mut self, dir: &Path) {
        let Ok(entries) = fs::read_dir(dir) else {
            return;
        };
        for entry in entries.filter_map(Result::ok) {
            let is_file = entry
                .file_type()
                .map(|t| t.is_file() || t.is_symlink())
                .unwrap_or(false);
            if let (true, Some(name)) = (is_file, entry.file_name().to_str()) {
                self.commands.insert(name.to_string());
            }
        }
    }

    pub fn update_aliases(&mut self, aliases: &AliasManager) {
        self.aliases = aliases.iter().map(|(name, _)| name.to_string()).collect();
    }

    pub fn complete_command(&self, input: &str) -> Vec<Pair> {
        let mut matches: Vec<Pair> = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(input))
            .map(|cmd| Pair {
                display: cmd.clone(),
                replacement: format!("{} ", cmd),
            })
            .collect();

        matches.extend(
            self.aliases
                .iter()
                .filter(|alias| alias.starts_with(input))
                .map(|alias| Pair {
                    display: format!("{} (alias)", alias),
                    replacement: format!("{} ", alias),
                }),
        );
        matches
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;

    #[test]
    fn test_builtins_path_and_aliases() {
        let dir = tempfile::tempdir().unwrap();
        let tool = dir.path().join("histogram");
        fs::write(&tool, "").unwrap();
        fs::set_permissions(&tool, fs::Permissions::from_mode(0o755)).unwrap();

        let mut aliases = AliasManager::new();
        aliases.add("hi", "echo hi");

        let mut completer = CommandCompleter::new();
        completer.refresh_commands(dir.path().to_str(), Path::new("/"));
        completer.update_aliases(&aliases);

        let displays: Vec<String> = completer
            .complete_command("hi")
            .into_iter()
            .map(|p| p.display)
            .collect();
        assert_eq!(displays, vec!["histogram", "history", "hi (alias)"]);
    }
}
