use super::{or_empty, MenuAction, ScreenContext, BACK_KEY, BACK_LABEL};
use crate::cli::ui::menu_renderer::{MenuUI, MenuUIItem};
use crate::cli::ui::prompts::{self, MenuAnswer, TextAnswer};
use crate::domain::locale::capitalize;
use crate::domain::{AreaType, BookingRecord, BookingUpdate, Locale};
use crate::errors::CliError;
use crate::wizard::WizardEvent;

const ADDRESS_KEY: &str = "address";
const AREA_KEY: &str = "area";
const CUSTOM_KEY: &str = "custom";
const CONTINUE_KEY: &str = "continue";

pub fn show(ctx: &ScreenContext<'_>) -> Result<MenuAction, CliError> {
    let booking = &ctx.state.booking;
    let menu = build_menu(booking, ctx.locale);
    let key = match prompts::select(&menu)? {
        MenuAnswer::Key(key) => key,
        MenuAnswer::Escape => return Ok(MenuAction::Event(WizardEvent::Back)),
        MenuAnswer::Interrupted => return Ok(MenuAction::Quit),
    };

    let update = match key.as_str() {
        ADDRESS_KEY => match prompts::text_input("Endereço", &booking.address)? {
            TextAnswer::Value(value) => BookingUpdate::new().address(value),
            TextAnswer::Escape => return Ok(MenuAction::Redraw),
        },
        AREA_KEY => match choose_area(booking.area_type, ctx.locale)? {
            Some(area) => BookingUpdate::new().area_type(area),
            None => return Ok(MenuAction::Redraw),
        },
        CUSTOM_KEY => {
            match prompts::text_input("Tamanho personalizado (m²)", &booking.custom_area_size)? {
                TextAnswer::Value(value) => BookingUpdate::new().custom_area_size(value),
                TextAnswer::Escape => return Ok(MenuAction::Redraw),
            }
        }
        CONTINUE_KEY => return Ok(MenuAction::Event(WizardEvent::Continue)),
        BACK_KEY => return Ok(MenuAction::Event(WizardEvent::Back)),
        _ => return Ok(MenuAction::Redraw),
    };
    Ok(MenuAction::Event(WizardEvent::Update(update)))
}

fn build_menu(booking: &BookingRecord, locale: Locale) -> MenuUI {
    let mut items = vec![
        MenuUIItem::new(ADDRESS_KEY, "Endereço", or_empty(&booking.address)),
        MenuUIItem::new(
            AREA_KEY,
            "Tamanho da área",
            booking
                .area_type
                .map(|area| locale.area_option(area).to_string())
                .unwrap_or_else(|| or_empty("")),
        ),
    ];
    if booking.area_type.is_some_and(|area| area.is_custom()) {
        items.push(MenuUIItem::new(
            CUSTOM_KEY,
            "Tamanho personalizado",
            or_empty(&booking.custom_area_size),
        ));
    }
    let hint = if booking.details_complete() {
        ""
    } else {
        "Preencha endereço e área"
    };
    items.push(MenuUIItem::new(CONTINUE_KEY, "Continuar", hint));
    items.push(MenuUIItem::new(BACK_KEY, BACK_LABEL, ""));

    let date = booking
        .date
        .map(|date| capitalize(&locale.long_date(date)))
        .unwrap_or_default();
    MenuUI::new("Detalhes do serviço", items).with_context(format!("Data escolhida: {date}"))
}

fn choose_area(current: Option<AreaType>, locale: Locale) -> Result<Option<AreaType>, CliError> {
    let items = AreaType::ALL
        .iter()
        .map(|area| MenuUIItem::new(area_key(*area), locale.area_option(*area), ""))
        .collect();
    let initial = current
        .and_then(|area| AreaType::ALL.iter().position(|candidate| *candidate == area))
        .unwrap_or(0);
    let menu = MenuUI::new("Tamanho da área", items).with_initial_index(initial);
    Ok(match prompts::select(&menu)? {
        MenuAnswer::Key(key) => AreaType::ALL
            .into_iter()
            .find(|area| area_key(*area) == key),
        MenuAnswer::Escape | MenuAnswer::Interrupted => None,
    })
}

fn area_key(area: AreaType) -> &'static str {
    match area {
        AreaType::SmallMedium => "200",
        AreaType::Large => "400",
        AreaType::Custom => "custom",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn booking() -> BookingRecord {
        BookingRecord {
            date: NaiveDate::from_ymd_opt(2024, 6, 15),
            ..BookingRecord::default()
        }
    }

    fn keys(menu: &MenuUI) -> Vec<&str> {
        menu.items.iter().map(|item| item.key.as_str()).collect()
    }

    #[test]
    fn custom_size_row_only_for_custom_area() {
        let mut record = booking();
        let menu = build_menu(&record, Locale::PtBr);
        assert_eq!(keys(&menu), ["address", "area", "continue", "back"]);
        assert_eq!(menu.context.as_deref(), Some("Data escolhida: Sábado, 15 de junho de 2024"));

        record.area_type = Some(AreaType::Custom);
        let menu = build_menu(&record, Locale::PtBr);
        assert_eq!(keys(&menu), ["address", "area", "custom", "continue", "back"]);
    }

    #[test]
    fn continue_hint_clears_once_details_are_complete() {
        let mut record = booking();
        record.address = "Rua das Flores, 123".into();
        record.area_type = Some(AreaType::Large);
        let menu = build_menu(&record, Locale::PtBr);
        assert_eq!(menu.items[1].description, "Até 400m²");
        assert_eq!(menu.items[2].description, "");
    }

    #[test]
    fn area_keys_match_wire_values() {
        for area in AreaType::ALL {
            let wire = serde_json::to_value(area).unwrap();
            assert_eq!(wire, area_key(area));
        }
    }
}
