//! Terminal output for gitswitch: labeled status lines, inline styling and tables.
//!
//! # No-color detection (in priority order):
//! 1. `--no-color` CLI flag (highest priority)
//! 2. `NO_COLOR` environment variable (any value)
//! 3. `TERM=dumb` environment variable
//! 4. Non-TTY stdout (detected via anstream)

use anstream::println;
use anstyle::{AnsiColor, Color, Style};
use comfy_table::{Cell, ContentArrangement, Table, presets};
use std::io::IsTerminal;

/// Placeholder shown for a profile field with no value
pub const UNSET: &str = "(unset)";

/// Color mode for output
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Always emit ANSI colors
    Always,
    /// Emit colors only if TTY and not disabled
    #[default]
    Auto,
    /// Never emit ANSI colors
    Never,
}

impl std::str::FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "always" => Ok(Self::Always),
            "auto" => Ok(Self::Auto),
            "never" => Ok(Self::Never),
            _ => Err(format!("invalid color mode: {}", s)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Ui {
    pub color_enabled: bool,
}

impl Ui {
    pub fn new(mode: ColorMode, force_no_color: bool) -> Self {
        let color_enabled = Self::resolve_color(mode, force_no_color);

        if !color_enabled {
            anstream::ColorChoice::write_global(anstream::ColorChoice::Never);
        }

        Self { color_enabled }
    }

    fn resolve_color(mode: ColorMode, force_no_color: bool) -> bool {
        if force_no_color || std::env::var_os("NO_COLOR").is_some() {
            return false;
        }

        if std::env::var("TERM").is_ok_and(|t| t == "dumb") {
            return false;
        }

        match mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => std::io::stdout().is_terminal(),
        }
    }

    fn paint(&self, style: Style, s: &str) -> String {
        if self.color_enabled {
            format!("{style}{s}{style:#}")
        } else {
            s.to_string()
        }
    }

    fn label(&self, text: &str, color: AnsiColor) -> String {
        self.paint(Style::new().fg_color(Some(Color::Ansi(color))).bold(), text)
    }

    /// Print OK label (green) with message to stdout
    pub fn ok(&self, msg: impl AsRef<str>) {
        println!("{} {}", self.label("OK", AnsiColor::Green), msg.as_ref());
    }

    /// Print WARNING label (yellow) with message to stdout
    pub fn warn(&self, msg: impl AsRef<str>) {
        println!("{} {}", self.label("WARNING", AnsiColor::Yellow), msg.as_ref());
    }

    /// Print INFO label (cyan) with message to stdout
    pub fn info(&self, msg: impl AsRef<str>) {
        println!("{} {}", self.label("INFO", AnsiColor::Cyan), msg.as_ref());
    }

    pub fn dim(&self, s: impl AsRef<str>) -> String {
        self.paint(
            Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))),
            s.as_ref(),
        )
    }

    pub fn bold(&self, s: impl AsRef<str>) -> String {
        self.paint(Style::new().bold(), s.as_ref())
    }

    /// Borderless table for key/value listings
    pub fn simple_table(&self) -> Table {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.load_preset(presets::NOTHING);
        table
    }

    /// Bold when color is enabled
    pub fn header_cell(&self, content: impl Into<String>) -> Cell {
        let cell = Cell::new(content.into());
        if self.color_enabled {
            cell.add_attribute(comfy_table::Attribute::Bold)
        } else {
            cell
        }
    }

    /// Cell for an optional value, dimmed `(unset)` when absent
    pub fn value_cell(&self, value: Option<&str>) -> Cell {
        match value {
            Some(v) => Cell::new(v),
            None if self.color_enabled => Cell::new(UNSET).fg(comfy_table::Color::DarkGrey),
            None => Cell::new(UNSET),
        }
    }

    pub fn println(&self, msg: impl AsRef<str>) {
        println!("{}", msg.as_ref());
    }

    pub fn newline(&self) {
        println!();
    }

    pub fn section(&self, title: impl AsRef<str>) {
        println!("{}", self.bold(title));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_mode_parse() {
        assert_eq!("always".parse::<ColorMode>().unwrap(), ColorMode::Always);
        assert_eq!("AUTO".parse::<ColorMode>().unwrap(), ColorMode::Auto);
        assert_eq!("never".parse::<ColorMode>().unwrap(), ColorMode::Never);
        assert!("sometimes".parse::<ColorMode>().is_err());
    }

    #[test]
    fn test_ui_force_no_color() {
        let ui = Ui::new(ColorMode::Always, true);
        assert!(!ui.color_enabled);
    }

    #[test]
    fn test_plain_styling_without_color() {
        let ui = Ui::new(ColorMode::Never, false);
        assert_eq!(ui.dim("x"), "x");
        assert_eq!(ui.bold("x"), "x");
    }

    #[test]
    fn test_value_cell_unset_placeholder() {
        let ui = Ui::new(ColorMode::Never, false);
        let mut table = ui.simple_table();
        table.add_row(vec![ui.header_cell("hostname"), ui.value_cell(None)]);
        table.add_row(vec![ui.header_cell("ssh_key"), ui.value_cell(Some("id_work"))]);

        let rendered = table.to_string();
        assert!(rendered.contains(UNSET));
        assert!(rendered.contains("id_work"));
    }
}
