use inksac::prelude::*;

use crate::core::commands::Builtin;

#[derive(Debug, Clone, Copy)]
pub struct SyntaxHighlighter {
    color_support: ColorSupport,
}

impl Default for SyntaxHighlighter {
    fn default() -> Self {
        Self::new()
    }
}

impl SyntaxHighlighter {
    pub fn new() -> Self {
        let support = check_color_support().unwrap_or(ColorSupport::NoColor);
        Self {
            color_support: support,
        }
    }

    fn enabled(&self) -> bool {
        !matches!(self.color_support, ColorSupport::NoColor)
    }

    /// Colors command words (builtins bold), flags, and chain operators.
    /// Whitespace is copied through unchanged so cursor positions still line up.
    pub fn highlight_command(&self, input: &str) -> String {
        if !self.enabled() || input.trim().is_empty() {
            return input.to_string();
        }

        let mut result = String::with_capacity(input.len() * 2);
        let mut command_position = true;
        let mut rest = input;
        while !rest.is_empty() {
            let blank_len = rest.len() - rest.trim_start().len();
            result.push_str(&rest[..blank_len]);
            rest = &rest[blank_len..];

            let word_len = rest.find(char::is_whitespace).unwrap_or(rest.len());
            let word = &rest[..word_len];
            rest = &rest[word_len..];
            if word.is_empty() {
                continue;
            }
            result.push_str(&self.highlight_word(word, &mut command_position));
        }
        result
    }

    fn highlight_word(&self, word: &str, command_position: &mut bool) -> String {
        if matches!(word, "&&" | "||" | ";") {
            *command_position = true;
            let operator_style = Style::builder().foreground(Color::Magenta).build();
            return word.style(operator_style).to_string();
        }

        if *command_position {
            *command_position = false;
            let command_style = if Builtin::lookup(word).is_some() {
                Style::builder().foreground(Color::Cyan).bold().build()
            } else {
                Style::builder().foreground(Color::Cyan).build()
            };
            word.style(command_style).to_string()
        } else if word.starts_with('-') {
            let flag_style = Style::builder().foreground(Color::Yellow).build();
            word.style(flag_style).to_string()
        } else if word.starts_with('$') {
            let var_style = Style::builder().foreground(Color::Green).build();
            word.style(var_style).to_string()
        } else {
            word.to_string()
        }
    }

    pub fn highlight_error(&self, error: &str) -> String {
        if !self.enabled() {
            return error.to_string();
        }

        let error_style = Style::builder().foreground(Color::Red).bold().build();

        error.style(error_style).to_string()
    }

    pub fn highlight_hint(&self, hint: &str) -> String {
        if !self.enabled() {
            return hint.to_string();
        }

        let hint_style = Style::builder()
            .foreground(Color::RGB(128, 128, 128))
            .build();

        hint.style(hint_style).to_string()
    }
}
