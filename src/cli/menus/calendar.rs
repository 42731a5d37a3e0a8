use chrono::{Datelike, NaiveDate};

use super::{MenuAction, ScreenContext};
use crate::cli::output::current_preferences;
use crate::cli::ui::menu_renderer::{MenuUI, MenuUIItem};
use crate::cli::ui::prompts::{self, MenuAnswer};
use crate::domain::{BookedDateSet, Locale, MonthGrid};
use crate::errors::CliError;
use crate::wizard::WizardEvent;

const NEXT_KEY: &str = "next";
const PREVIOUS_KEY: &str = "previous";
const DAY_PREFIX: &str = "day:";

pub fn show(ctx: &ScreenContext<'_>) -> Result<MenuAction, CliError> {
    let grid = ctx.navigator.grid(ctx.today);
    let menu = build_menu(ctx, &grid);
    let answer = prompts::select(&menu)?;
    Ok(resolve(answer, &grid))
}

fn build_menu(ctx: &ScreenContext<'_>, grid: &MonthGrid) -> MenuUI {
    let booked = &ctx.state.booked;
    let mut items: Vec<MenuUIItem> = grid
        .selectable_days(booked)
        .map(|day| {
            let note = if day.is_today { "Hoje" } else { "" };
            MenuUIItem::new(
                format!("{DAY_PREFIX}{}", day.date),
                ctx.locale.short_day(day.date),
                note,
            )
        })
        .collect();
    items.push(MenuUIItem::new(NEXT_KEY, "Próximo mês »", ""));
    if ctx.navigator.can_go_previous(ctx.today) {
        items.push(MenuUIItem::new(PREVIOUS_KEY, "« Mês anterior", ""));
    }

    let plain = current_preferences().plain_mode;
    MenuUI::new("Escolha a data da visita", items)
        .with_context(render_grid(grid, booked, ctx.locale, plain))
        .with_initial_index(0)
}

fn resolve(answer: MenuAnswer, grid: &MonthGrid) -> MenuAction {
    match answer {
        MenuAnswer::Escape => MenuAction::Exit,
        MenuAnswer::Interrupted => MenuAction::Quit,
        MenuAnswer::Key(key) if key == NEXT_KEY => MenuAction::NextMonth,
        MenuAnswer::Key(key) if key == PREVIOUS_KEY => MenuAction::PreviousMonth,
        MenuAnswer::Key(key) => key
            .strip_prefix(DAY_PREFIX)
            .and_then(|raw| NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok())
            .and_then(|date| grid.find(date))
            .map(|day| MenuAction::Event(WizardEvent::SelectDay(*day)))
            .unwrap_or(MenuAction::Redraw),
    }
}

/// Month label, weekday header and one line per week.
///
/// Today is marked with `*` and booked days with `x`; past days are dotted.
pub fn render_grid(grid: &MonthGrid, booked: &BookedDateSet, locale: Locale, plain: bool) -> String {
    let past = if plain { " .." } else { " ··" };
    let mut lines = vec![locale.month_label(grid.month())];
    lines.push(
        locale
            .weekday_initials()
            .iter()
            .map(|initial| format!("{initial:>3} "))
            .collect::<String>()
            .trim_end()
            .to_string(),
    );
    for week in grid.weeks() {
        let row: String = week
            .iter()
            .map(|day| {
                let (cell, mark) = if !day.is_current_month {
                    ("   ".to_string(), ' ')
                } else if booked.contains(day.date) {
                    (format!("{:>3}", day.date.day()), 'x')
                } else if day.is_past {
                    (past.to_string(), ' ')
                } else if day.is_today {
                    (format!("{:>3}", day.date.day()), '*')
                } else {
                    (format!("{:>3}", day.date.day()), ' ')
                };
                format!("{cell}{mark}")
            })
            .collect();
        lines.push(row.trim_end().to_string());
    }
    lines.push("* hoje   x reservado".to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{build_month_grid, MonthNavigator, YearMonth};
    use crate::wizard::WizardState;

    fn june() -> (NaiveDate, MonthGrid) {
        let today = NaiveDate::from_ymd_opt(2024, 6, 10).unwrap();
        (today, build_month_grid(YearMonth::new(2024, 6).unwrap(), today))
    }

    #[test]
    fn grid_marks_today_booked_and_past_days() {
        let (_, grid) = june();
        let mut booked = BookedDateSet::new();
        booked.insert(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        let text = render_grid(&grid, &booked, Locale::PtBr, true);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "junho de 2024");
        assert_eq!(lines[1], "  D   S   T   Q   Q   S   S");
        // June 2024 starts on a Saturday.
        assert_eq!(lines[2], format!("{} ..", " ".repeat(24)));
        assert!(lines[4].starts_with(" .. "));
        assert!(lines[4].contains(" 10*"));
        assert!(lines[4].contains(" 15x"));
        assert_eq!(lines.len(), 9);
    }

    #[test]
    fn menu_lists_free_days_then_navigation() {
        let (today, _) = june();
        let mut state = WizardState::new();
        state.booked.insert(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        let navigator = MonthNavigator::new(today);
        let ctx = ScreenContext {
            state: &state,
            navigator: &navigator,
            locale: Locale::PtBr,
            today,
        };
        let grid = navigator.grid(today);
        let menu = build_menu(&ctx, &grid);
        assert_eq!(menu.items.len(), 21);
        assert_eq!(menu.items[0].label, "seg 10");
        assert_eq!(menu.items[0].description, "Hoje");
        assert_eq!(menu.items[5].label, "dom 16");
        assert_eq!(menu.items.last().map(|item| item.key.as_str()), Some(NEXT_KEY));
    }

    #[test]
    fn day_keys_resolve_to_select_events() {
        let (_, grid) = june();
        let action = resolve(MenuAnswer::Key("day:2024-06-20".into()), &grid);
        let expected = *grid.find(NaiveDate::from_ymd_opt(2024, 6, 20).unwrap()).unwrap();
        assert_eq!(action, MenuAction::Event(WizardEvent::SelectDay(expected)));
        assert_eq!(resolve(MenuAnswer::Key("day:bogus".into()), &grid), MenuAction::Redraw);
        assert_eq!(resolve(MenuAnswer::Escape, &grid), MenuAction::Exit);
    }
}
