use std::fmt;

use colored::Colorize;

use crate::cli::output::{current_preferences, OutputPreferences};

#[derive(Clone, Copy, PartialEq, Eq)]
enum Style {
    Header,
    Detail,
    Muted,
    Highlight,
}

/// Applies the shared header/detail styling to screen text.
pub struct Formatter {
    prefs: OutputPreferences,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new()
    }
}

impl Formatter {
    pub fn new() -> Self {
        Self {
            prefs: current_preferences(),
        }
    }

    pub fn header_text(&self, title: impl fmt::Display) -> String {
        self.apply_style(Style::Header, format!("=== {} ===", title))
    }

    pub fn detail_text(&self, message: impl fmt::Display) -> String {
        self.apply_style(Style::Detail, message)
    }

    pub fn muted_text(&self, message: impl fmt::Display) -> String {
        self.apply_style(Style::Muted, message)
    }

    pub fn highlight_text(&self, message: impl fmt::Display) -> String {
        self.apply_style(Style::Highlight, message)
    }

    fn apply_style(&self, style: Style, message: impl fmt::Display) -> String {
        let text = message.to_string();
        if self.prefs.plain_mode {
            return text;
        }
        match style {
            Style::Header => text.bold().green().to_string(),
            Style::Detail => text,
            Style::Muted => text.dimmed().to_string(),
            Style::Highlight => text.bold().bright_green().to_string(),
        }
    }

    pub fn navigation_hint(&self) -> String {
        "(Use ↑ ↓ para navegar, Enter para selecionar, ESC para voltar)".to_string()
    }

    pub fn format_two_column_row(&self, label: &str, description: &str, width: usize) -> String {
        let pad = width.saturating_sub(label.chars().count());
        format!("  {}{}    {}", label, " ".repeat(pad), description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn two_column_rows_pad_by_characters() {
        let formatter = Formatter::new();
        let row = formatter.format_two_column_row("sáb 15", "Hoje", 8);
        assert_eq!(row, "  sáb 15      Hoje");
    }
}
