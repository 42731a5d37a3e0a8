use std::io::{self, Stdout, Write};

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    style::{Attribute, SetAttribute},
    terminal::{self, ClearType},
    ExecutableCommand,
};

use crate::cli::output::{current_preferences, OutputPreferences};
use crate::cli::ui::formatting::Formatter;
use crate::cli::ui::test_mode::{self, MenuTestEvent};

/// A vertical menu: optional context block, a title and selectable rows.
#[derive(Clone, Debug)]
pub struct MenuUI {
    pub title: String,
    pub context: Option<String>,
    pub items: Vec<MenuUIItem>,
    pub initial_index: Option<usize>,
}

impl MenuUI {
    pub fn new(title: impl Into<String>, items: Vec<MenuUIItem>) -> Self {
        Self {
            title: title.into(),
            context: None,
            items,
            initial_index: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_initial_index(mut self, index: usize) -> Self {
        self.initial_index = Some(index);
        self
    }

    fn start_index(&self) -> usize {
        self.initial_index
            .unwrap_or(0)
            .min(self.items.len().saturating_sub(1))
    }

    fn label_width(&self) -> usize {
        self.items
            .iter()
            .map(|item| item.label.chars().count())
            .max()
            .unwrap_or(0)
    }
}

#[derive(Clone, Debug)]
pub struct MenuUIItem {
    pub key: String,
    pub label: String,
    pub description: String,
}

impl MenuUIItem {
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug)]
pub enum MenuRenderError {
    /// Ctrl-C or Ctrl-D while the menu was open.
    Interrupted,
    Io(io::Error),
}

impl From<io::Error> for MenuRenderError {
    fn from(err: io::Error) -> Self {
        MenuRenderError::Io(err)
    }
}

pub struct MenuRenderer {
    prefs: OutputPreferences,
}

impl Default for MenuRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuRenderer {
    pub fn new() -> Self {
        Self {
            prefs: current_preferences(),
        }
    }

    /// Shows `menu` and returns the key of the chosen item, or `None` on ESC.
    pub fn show(&self, menu: &MenuUI) -> Result<Option<String>, MenuRenderError> {
        if menu.items.is_empty() {
            return Ok(None);
        }

        if let Some(events) = test_mode::next_menu_events(&menu.title) {
            return Ok(self.show_with_script(menu, &events));
        }

        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        stdout.execute(cursor::Hide)?;

        let len = menu.items.len();
        let mut selected = menu.start_index();

        let result = loop {
            if let Err(err) = self.render(&mut stdout, menu, selected) {
                break Err(err.into());
            }
            let key = match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => key,
                Ok(_) => continue,
                Err(err) => break Err(err.into()),
            };
            if key.modifiers.contains(KeyModifiers::CONTROL)
                && matches!(key.code, KeyCode::Char('c' | 'C' | 'd' | 'D'))
            {
                break Err(MenuRenderError::Interrupted);
            }
            let scripted = match key.code {
                KeyCode::Up => MenuTestEvent::Up,
                KeyCode::Down => MenuTestEvent::Down,
                KeyCode::Home => MenuTestEvent::Home,
                KeyCode::End => MenuTestEvent::End,
                KeyCode::Enter => MenuTestEvent::Enter,
                KeyCode::Esc => MenuTestEvent::Esc,
                _ => continue,
            };
            match step(selected, len, scripted) {
                Step::Move(index) => selected = index,
                Step::Choose => break Ok(Some(menu.items[selected].key.clone())),
                Step::Escape => break Ok(None),
            }
        };

        let clear_status = clear_screen(&mut stdout);
        stdout.execute(cursor::Show).ok();
        terminal::disable_raw_mode().ok();
        clear_status?;

        result
    }

    fn show_with_script(&self, menu: &MenuUI, events: &[MenuTestEvent]) -> Option<String> {
        let len = menu.items.len();
        let mut selected = menu.start_index();
        for event in events {
            match step(selected, len, *event) {
                Step::Move(index) => selected = index,
                Step::Choose => {
                    self.print_snapshot(menu, selected);
                    return Some(menu.items[selected].key.clone());
                }
                Step::Escape => {
                    self.print_snapshot(menu, selected);
                    return None;
                }
            }
        }
        // A script without ENTER or ESC leaves the menu like ESC does.
        self.print_snapshot(menu, selected);
        tracing::warn!(menu = %menu.title, "menu script did not end with ENTER or ESC");
        None
    }

    fn print_snapshot(&self, menu: &MenuUI, selected: usize) {
        for line in self.lines(menu, selected) {
            println!("{line}");
        }
    }

    fn lines(&self, menu: &MenuUI, selected: usize) -> Vec<String> {
        let formatter = Formatter::new();
        let mut lines = Vec::new();
        if let Some(context) = &menu.context {
            lines.extend(context.lines().map(|line| formatter.detail_text(line)));
            lines.push(String::new());
        }
        lines.push(formatter.header_text(&menu.title));
        lines.push(String::new());
        let width = menu.label_width();
        for (index, item) in menu.items.iter().enumerate() {
            let pointer = match (index == selected, self.prefs.plain_mode) {
                (true, true) => ">",
                (true, false) => "▸",
                (false, _) => " ",
            };
            let row = formatter.format_two_column_row(&item.label, &item.description, width);
            lines.push(format!(" {pointer} {}", row.trim_end()));
        }
        lines.push(String::new());
        lines.push(formatter.muted_text(formatter.navigation_hint()));
        lines
    }

    fn render(&self, stdout: &mut Stdout, menu: &MenuUI, selected: usize) -> io::Result<()> {
        clear_screen(stdout)?;
        let item_offset = menu.context.as_ref().map_or(0, |ctx| ctx.lines().count() + 1) + 2;
        for (row, line) in self.lines(menu, selected).into_iter().enumerate() {
            let highlighted = row >= item_offset && row - item_offset == selected;
            if highlighted {
                stdout.execute(SetAttribute(Attribute::Reverse))?;
            }
            // Raw mode does not translate `\n` into a carriage return.
            write!(stdout, "{line}\r\n")?;
            if highlighted {
                stdout.execute(SetAttribute(Attribute::Reset))?;
            }
        }
        stdout.flush()
    }
}

enum Step {
    Move(usize),
    Choose,
    Escape,
}

/// Cursor movement wraps around at both ends of the list.
fn step(selected: usize, len: usize, event: MenuTestEvent) -> Step {
    match event {
        MenuTestEvent::Up => Step::Move(selected.checked_sub(1).unwrap_or(len - 1)),
        MenuTestEvent::Down => Step::Move((selected + 1) % len),
        MenuTestEvent::Home => Step::Move(0),
        MenuTestEvent::End => Step::Move(len - 1),
        MenuTestEvent::Enter => Step::Choose,
        MenuTestEvent::Esc => Step::Escape,
    }
}

fn clear_screen(stdout: &mut Stdout) -> io::Result<()> {
    stdout.execute(terminal::Clear(ClearType::All))?;
    stdout.execute(cursor::MoveTo(0, 0))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> MenuUI {
        MenuUI::new(
            "Detalhes",
            vec![
                MenuUIItem::new("address", "Endereço", ""),
                MenuUIItem::new("area", "Tamanho da área", ""),
                MenuUIItem::new("back", "← Voltar", ""),
            ],
        )
    }

    #[test]
    fn scripted_navigation_wraps() {
        let renderer = MenuRenderer::new();
        let chosen = renderer.show_with_script(&menu(), &[MenuTestEvent::Up, MenuTestEvent::Enter]);
        assert_eq!(chosen.as_deref(), Some("back"));
        let chosen = renderer.show_with_script(
            &menu().with_initial_index(2),
            &[MenuTestEvent::Down, MenuTestEvent::Enter],
        );
        assert_eq!(chosen.as_deref(), Some("address"));
    }

    #[test]
    fn scripted_escape_and_unterminated_scripts_return_none() {
        let renderer = MenuRenderer::new();
        assert_eq!(renderer.show_with_script(&menu(), &[MenuTestEvent::Esc]), None);
        assert_eq!(renderer.show_with_script(&menu(), &[MenuTestEvent::Down]), None);
    }

    #[test]
    fn initial_index_is_clamped() {
        assert_eq!(menu().with_initial_index(10).start_index(), 2);
    }

    #[test]
    fn snapshot_marks_the_selected_row() {
        let renderer = MenuRenderer {
            prefs: OutputPreferences {
                plain_mode: true,
                quiet_mode: false,
            },
        };
        let lines = renderer.lines(&menu().with_context("linha 1\nlinha 2"), 1);
        assert_eq!(lines[0], "linha 1");
        assert_eq!(lines[1], "linha 2");
        assert!(lines.iter().any(|line| line.starts_with(" > ") && line.contains("Tamanho da área")));
    }
}
