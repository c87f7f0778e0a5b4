use crate::error::ShellError;
use std::collections::BTreeMap;

#[derive(Debug, Clone)]
pub struct Flags {
    flags: BTreeMap<String, Flag>,
    script: Option<String>,
    script_args: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct Flag {
    pub short: String,
    pub long: String,
    pub description: String,
    pub takes_value: bool,
    pub value: Option<String>,
}

impl Default for Flags {
    fn default() -> Self {
        Self::new()
    }
}

impl Flags {
    pub fn new() -> Self {
        let mut flags = BTreeMap::new();

        flags.insert(
            "help".to_string(),
            Flag {
                short: "-h".to_string(),
                long: "--help".to_string(),
                description: "Print this help message".to_string(),
                takes_value: false,
                value: None,
            },
        );

        flags.insert(
            "version".to_string(),
            Flag {
                short: "-V".to_string(),
                long: "--version".to_string(),
                description: "Show version information".to_string(),
                takes_value: false,
                value: None,
            },
        );

        flags.insert(
            "command".to_string(),
            Flag {
                short: "-c".to_string(),
                long: "--command".to_string(),
                description: "Run a single command line and exit".to_string(),
                takes_value: true,
                value: None,
            },
        );

        flags.insert(
            "debug".to_string(),
            Flag {
                short: "-d".to_string(),
                long: "--debug".to_string(),
                description: "Enable debug logging".to_string(),
                takes_value: false,
                value: None,
            },
        );

        Flags {
            flags,
            script: None,
            script_args: Vec::new(),
        }
    }

    pub fn parse(&mut self, args: &[String]) -> Result<(), ShellError> {
        let mut i = 0;
        while i < args.len() {
            let arg = &args[i];

            // Everything after the script name belongs to the script.
            if self.script.is_some() {
                self.script_args.extend(args[i..].iter().cloned());
                break;
            }

            let matched = self
                .flags
                .values_mut()
                .find(|flag| arg == &flag.short || arg == &flag.long);

            match matched {
                Some(flag) if flag.takes_value => {
                    let value = args.get(i + 1).ok_or_else(|| {
                        ShellError::FlagError(format!("Flag {} requires a value", arg))
                    })?;
                    flag.value = Some(value.clone());
                    i += 1;
                }
                Some(flag) => flag.value = Some("true".to_string()),
                None if arg.starts_with('-') && arg.len() > 1 => {
                    return Err(ShellError::FlagError(format!("Unknown flag {}", arg)));
                }
                None => self.script = Some(arg.clone()),
            }
            i += 1;
        }
        Ok(())
    }

    pub fn is_set(&self, name: &str) -> bool {
        self.flags
            .get(name)
            .and_then(|f| f.value.as_ref())
            .is_some()
    }

    pub fn get_value(&self, name: &str) -> Option<&String> {
        self.flags.get(name).and_then(|f| f.value.as_ref())
    }

    /// Script file given as the first positional argument.
    pub fn script(&self) -> Option<&str> {
        self.script.as_deref()
    }

    /// Arguments given after the script name. They are accepted but not
    /// exposed to the script.
    pub fn script_args(&self) -> &[String] {
        &self.script_args
    }

    pub fn print_help(&self) {
        println!("Usage: hsh [OPTIONS] [SCRIPT [ARGS...]]");
        println!("\nARGS after SCRIPT are accepted and ignored.");
        println!("\nOptions:");
        for flag in self.flags.values() {
            let long = if flag.takes_value {
                format!("{} <arg>", flag.long)
            } else {
                flag.long.clone()
            };
            println!("  {}, {:<17} {}", flag.short, long, flag.description);
        }
    }
}
