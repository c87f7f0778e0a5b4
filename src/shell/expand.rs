use std::borrow::Cow;

use crate::core::aliases::AliasManager;
use crate::core::env::Environment;

/// Inputs for substitution, borrowed from the session for one segment.
pub struct Expander<'s> {
    pub aliases: &'s AliasManager,
    pub env: &'s Environment,
    pub status: i32,
    pub pid: u32,
}

impl Expander<'_> {
    /// Alias expansion of the first word, then one pass of variable
    /// substitution over the whole segment.
    pub fn expand<'a>(&self, segment: &'a str) -> Cow<'a, str> {
        match self.aliases.expand_command(segment) {
            Cow::Borrowed(text) => self.expand_variables(text),
            Cow::Owned(text) => Cow::Owned(self.expand_variables(&text).into_owned()),
        }
    }

    /// Replaces `$?`, `$$` and `$NAME`. Unset names become empty; a `$`
    /// not followed by one of those forms stays as written.
    pub fn expand_variables<'a>(&self, text: &'a str) -> Cow<'a, str> {
        if !text.contains('$') {
            return Cow::Borrowed(text);
        }

        let mut result = String::with_capacity(text.len());
        let mut rest = text;
        while let Some(pos) = rest.find('$') {
            result.push_str(&rest[..pos]);
            let after = &rest[pos + 1..];

            match after.as_bytes().first() {
                Some(b'?') => {
                    result.push_str(&self.status.to_string());
                    rest = &after[1..];
                }
                Some(b'$') => {
                    result.push_str(&self.pid.to_string());
                    rest = &after[1..];
                }
                Some(b) if is_name_byte(*b) => {
                    let end = after
                        .bytes()
                        .position(|b| !is_name_byte(b))
                        .unwrap_or(after.len());
                    result.push_str(self.env.lookup(&after[..end]).unwrap_or(""));
                    rest = &after[end..];
                }
                _ => {
                    result.push('$');
                    rest = after;
                }
            }
        }
        result.push_str(rest);
        Cow::Owned(result)
    }
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}
