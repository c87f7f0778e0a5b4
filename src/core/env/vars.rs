use super::EnvError;
use std::borrow::Cow;
use std::env;

use tracing::debug;

/// Ordered variable table owned by the session.
///
/// Keys are unique. Setting an existing key updates it in place, new keys
/// are appended. The flattened `KEY=VALUE` view is rebuilt lazily whenever
/// `env_changed` is raised by a mutation.
#[derive(Clone, Debug, Default)]
pub struct Environment {
    vars: Vec<(Box<str>, Box<str>)>,
    flattened: Vec<String>,
    env_changed: bool,
}

impl Environment {
    /// Seeds the table from the host process environment.
    pub fn from_host() -> Self {
        let mut environment = Self::default();
        for (key, value) in env::vars_os() {
            if let (Some(key), Some(value)) = (key.to_str(), value.to_str()) {
                if let Err(e) = environment.set(key, value) {
                    debug!(error = %e, "skipping host variable");
                }
            }
        }
        environment
    }

    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut environment = Self::default();
        for (key, value) in pairs {
            if let Err(e) = environment.set(key, value) {
                debug!(error = %e, "skipping variable");
            }
        }
        environment
    }

    pub fn set(&mut self, name: &str, value: &str) -> Result<(), EnvError> {
        if name.is_empty() || name.contains('=') {
            return Err(EnvError::InvalidName(name.to_string()));
        }

        match self.vars.iter_mut().find(|(key, _)| &**key == name) {
            Some((_, existing)) => *existing = value.into(),
            None => self.vars.push((name.into(), value.into())),
        }
        self.env_changed = true;
        Ok(())
    }

    /// Removes `name`, reporting whether it was present.
    pub fn unset(&mut self, name: &str) -> bool {
        let before = self.vars.len();
        self.vars.retain(|(key, _)| &**key != name);
        let removed = self.vars.len() != before;
        if removed {
            self.env_changed = true;
        }
        removed
    }

    pub fn get(&self, name: &str) -> Result<&str, EnvError> {
        self.lookup(name)
            .ok_or_else(move || EnvError::VarNotFound(name.to_string()))
    }

    pub fn lookup(&self, name: &str) -> Option<&str> {
        self.vars
            .iter()
            .find(|(key, _)| &**key == name)
            .map(|(_, value)| value.as_ref())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.vars.iter().map(|(k, v)| (k.as_ref(), v.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }

    pub fn env_changed(&self) -> bool {
        self.env_changed
    }

    /// `KEY=VALUE` lines in table order, rebuilt only after a change.
    pub fn flatten(&mut self) -> &[String] {
        if self.env_changed || self.flattened.len() != self.vars.len() {
            self.flattened = self
                .vars
                .iter()
                .map(|(key, value)| format!("{}={}", key, value))
                .collect();
            self.env_changed = false;
        }
        &self.flattened
    }

    /// Expands `$HOME` and `$PATH` in startup-file values.
    pub fn expand_value<'a>(&self, value: &'a str) -> Cow<'a, str> {
        if !value.contains('$') {
            return Cow::Borrowed(value);
        }

        let mut result = value.to_string();
        for name in ["HOME", "PATH"] {
            let pattern = format!("${}", name);
            if result.contains(&pattern) {
                result = result.replace(&pattern, self.lookup(name).unwrap_or(""));
            }
        }
        Cow::Owned(result)
    }
}
