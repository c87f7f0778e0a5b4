use std::borrow::Cow;

/// Alias table, kept in definition order. Redefining a name keeps its slot.
#[derive(Clone, Debug, Default)]
pub struct AliasManager {
    aliases: Vec<(Box<str>, Box<str>)>,
}

impl AliasManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, name: &str, command: &str) {
        match self.aliases.iter_mut().find(|(n, _)| &**n == name) {
            Some((_, value)) => *value = command.into(),
            None => self.aliases.push((name.into(), command.into())),
        }
    }

    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.aliases.len();
        self.aliases.retain(|(n, _)| &**n != name);
        before != self.aliases.len()
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.aliases
            .iter()
            .find(|(n, _)| &**n == name)
            .map(|(_, v)| v.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.aliases.iter().map(|(n, v)| (n.as_ref(), v.as_ref()))
    }

    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }

    /// Replaces the first word of `command` with its alias value.
    ///
    /// The result is checked once more so `a -> b -> c` resolves in one
    /// call, but a value that starts with the alias's own name is left alone.
    pub fn expand_command<'a>(&self, command: &'a str) -> Cow<'a, str> {
        let Some(expanded) = self.expand_once(command) else {
            return Cow::Borrowed(command);
        };

        let first = first_word(command);
        if first_word(&expanded) != first {
            if let Some(again) = self.expand_once(&expanded) {
                return Cow::Owned(again);
            }
        }
        Cow::Owned(expanded)
    }

    fn expand_once(&self, command: &str) -> Option<String> {
        let trimmed = command.trim_start();
        let word = first_word(trimmed);
        let value = self.get(word)?;
        Some(format!("{}{}", value, &trimmed[word.len()..]))
    }

    /// `name='value'`, the form printed by the `alias` builtin.
    pub fn format_entry(name: &str, value: &str) -> String {
        format!("{}='{}'", name, value)
    }
}

fn first_word(command: &str) -> &str {
    command.split_whitespace().next().unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_and_get_alias() {
        let mut manager = AliasManager::new();
        manager.add("ll", "ls -la");
        assert_eq!(manager.get("ll"), Some("ls -la"));
    }

    #[test]
    fn test_redefine_keeps_position() {
        let mut manager = AliasManager::new();
        manager.add("ll", "ls -la");
        manager.add("gs", "git status");
        manager.add("ll", "ls -l");
        let all: Vec<(&str, &str)> = manager.iter().collect();
        assert_eq!(all, vec![("ll", "ls -l"), ("gs", "git status")]);
    }

    #[test]
    fn test_expand_command() {
        let mut manager = AliasManager::new();
        manager.add("ll", "ls -la");

        let expanded = manager.expand_command("ll /home");
        assert_eq!(expanded, "ls -la /home");
    }

    #[test]
    fn test_only_first_word() {
        let mut manager = AliasManager::new();
        manager.add("ll", "ls -la");
        assert_eq!(manager.expand_command("echo ll"), "echo ll");
    }

    #[test]
    fn test_no_expansion_needed() {
        let manager = AliasManager::new();
        let command = "ls -l";
        let expanded = manager.expand_command(command);
        assert!(matches!(expanded, Cow::Borrowed(_)));
        assert_eq!(expanded, command);
    }

    #[test]
    fn test_self_reference_expands_once() {
        let mut manager = AliasManager::new();
        manager.add("ls", "ls --color");
        assert_eq!(manager.expand_command("ls /tmp"), "ls --color /tmp");
    }

    #[test]
    fn test_chained_alias_rechecked_once() {
        let mut manager = AliasManager::new();
        manager.add("a", "b -x");
        manager.add("b", "c -y");
        manager.add("c", "d");
        assert_eq!(manager.expand_command("a 1"), "c -y -x 1");
    }

    #[test]
    fn test_expansion_is_idempotent() {
        let mut manager = AliasManager::new();
        manager.add("ll", "ls -la");
        let once = manager.expand_command("ll /tmp").into_owned();
        let twice = manager.expand_command(&once).into_owned();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_remove() {
        let mut manager = AliasManager::new();
        manager.add("ll", "ls -la");
        assert!(manager.remove("ll"));
        assert!(manager.is_empty());
        assert!(!manager.remove("ll"));
    }
}
