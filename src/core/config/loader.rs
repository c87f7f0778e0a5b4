use std::{fs, path::Path};

use tracing::{debug, warn};

use super::{Config, ConfigError, ConfigPaths, Directive};

pub struct ConfigLoader<'a> {
    paths: &'a ConfigPaths,
}

impl<'a> ConfigLoader<'a> {
    pub fn new(paths: &'a ConfigPaths) -> Self {
        Self { paths }
    }

    pub fn load_configs(&self, config: &mut Config) -> Result<(), ConfigError> {
        self.source_if_exists(&self.paths.rc_path, config)
    }

    fn source_if_exists(&self, path: &Path, config: &mut Config) -> Result<(), ConfigError> {
        if !path.exists() {
            return Ok(());
        }

        debug!(path = %path.display(), "loading rc file");
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        // A bad line is reported and skipped; the rest of the file still applies.
        for (number, line) in content.lines().enumerate() {
            if let Err(message) = self.process_line(line, config) {
                let error = ConfigError::Parse {
                    path: path.to_path_buf(),
                    line: number + 1,
                    message,
                };
                warn!("{}", error);
                config.skipped_lines.push(number + 1);
            }
        }
        Ok(())
    }

    fn process_line(&self, line: &str, config: &mut Config) -> Result<(), String> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(());
        }

        match line {
            s if s.starts_with("export ") => self.process_export(&s["export ".len()..], config),
            s if s.starts_with("setenv ") => self.process_setenv(&s["setenv ".len()..], config),
            s if s.starts_with("alias ") => self.process_alias(&s["alias ".len()..], config),
            s if s.starts_with("histsize ") => self.process_histsize(&s["histsize ".len()..], config),
            other => {
                debug!(line = other, "ignoring unknown rc directive");
                Ok(())
            }
        }
    }

    fn process_export(&self, var_def: &str, config: &mut Config) -> Result<(), String> {
        let (name, value) = var_def
            .split_once('=')
            .ok_or_else(|| format!("expected NAME=value, got '{}'", var_def.trim()))?;
        config.directives.push(Directive::SetEnv {
            name: name.trim().to_string(),
            value: strip_quotes(value.trim()).to_string(),
        });
        Ok(())
    }

    fn process_setenv(&self, args: &str, config: &mut Config) -> Result<(), String> {
        let parts: Vec<&str> = args.split_whitespace().collect();
        match parts.as_slice() {
            [name, value] => {
                config.directives.push(Directive::SetEnv {
                    name: name.to_string(),
                    value: value.to_string(),
                });
                Ok(())
            }
            _ => Err("setenv takes exactly NAME VALUE".to_string()),
        }
    }

    fn process_alias(&self, def: &str, config: &mut Config) -> Result<(), String> {
        let (name, command) = def
            .split_once('=')
            .ok_or_else(|| format!("expected name=value, got '{}'", def.trim()))?;
        config.directives.push(Directive::Alias {
            name: name.trim().to_string(),
            value: strip_quotes(command.trim()).to_string(),
        });
        Ok(())
    }

    fn process_histsize(&self, value: &str, config: &mut Config) -> Result<(), String> {
        let size = value
            .trim()
            .parse::<usize>()
            .map_err(|_| format!("invalid histsize '{}'", value.trim()))?;
        config.history_max = size;
        Ok(())
    }
}

/// Removes one pair of matching surrounding quotes.
pub(crate) fn strip_quotes(value: &str) -> &str {
    let quoted = value.len() >= 2
        && ((value.starts_with('\'') && value.ends_with('\''))
            || (value.starts_with('"') && value.ends_with('"')));
    if quoted {
        &value[1..value.len() - 1]
    } else {
        value
    }
}
