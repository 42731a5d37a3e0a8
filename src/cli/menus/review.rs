use super::{or_empty, MenuAction, ScreenContext, BACK_KEY, BACK_LABEL};
use crate::cli::ui::menu_renderer::{MenuUI, MenuUIItem};
use crate::cli::ui::prompts::{self, MenuAnswer, TextAnswer};
use crate::domain::locale::summary_lines;
use crate::domain::{BookingRecord, BookingUpdate, Locale};
use crate::errors::CliError;
use crate::wizard::WizardEvent;

const PHONE_KEY: &str = "phone";
const CONFIRM_KEY: &str = "confirm";

pub fn show(ctx: &ScreenContext<'_>) -> Result<MenuAction, CliError> {
    let booking = &ctx.state.booking;
    let menu = build_menu(booking, ctx.locale);
    let action = match prompts::select(&menu)? {
        MenuAnswer::Key(key) if key == PHONE_KEY => {
            match prompts::text_input("Telefone", &booking.phone)? {
                TextAnswer::Value(phone) => {
                    MenuAction::Event(WizardEvent::Update(BookingUpdate::new().phone(phone)))
                }
                TextAnswer::Escape => MenuAction::Redraw,
            }
        }
        MenuAnswer::Key(key) if key == CONFIRM_KEY => {
            MenuAction::Event(WizardEvent::RequestConfirmation)
        }
        MenuAnswer::Key(_) | MenuAnswer::Escape => MenuAction::Event(WizardEvent::Back),
        MenuAnswer::Interrupted => MenuAction::Quit,
    };
    Ok(action)
}

fn build_menu(booking: &BookingRecord, locale: Locale) -> MenuUI {
    let summary = summary_lines(booking, locale)
        .into_iter()
        .map(|(label, value)| format!("{label}: {}", or_empty(&value)))
        .collect::<Vec<_>>()
        .join("\n");
    let hint = if booking.contact_complete() {
        ""
    } else {
        "Informe o telefone"
    };
    let items = vec![
        MenuUIItem::new(PHONE_KEY, "Telefone", or_empty(&booking.phone)),
        MenuUIItem::new(CONFIRM_KEY, "Confirmar orçamento", hint),
        MenuUIItem::new(BACK_KEY, BACK_LABEL, ""),
    ];
    MenuUI::new("Revise sua solicitação", items).with_context(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AreaType;
    use chrono::NaiveDate;

    #[test]
    fn summary_context_lists_every_field() {
        let record = BookingRecord {
            date: NaiveDate::from_ymd_opt(2024, 6, 15),
            address: "  Rua das Flores, 123 ".into(),
            area_type: Some(AreaType::SmallMedium),
            custom_area_size: String::new(),
            phone: String::new(),
        };
        let menu = build_menu(&record, Locale::PtBr);
        let context = menu.context.unwrap_or_default();
        let lines: Vec<&str> = context.lines().collect();
        assert_eq!(
            lines,
            [
                "Data escolhida: Sábado, 15 de junho de 2024",
                "Tamanho da área: Até 200m²",
                "Endereço: Rua das Flores, 123",
                "Telefone: —",
            ]
        );
        assert_eq!(menu.items[1].description, "Informe o telefone");
    }
}
