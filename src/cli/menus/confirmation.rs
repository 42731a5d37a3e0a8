use super::{MenuAction, ScreenContext};
use crate::cli::ui::menu_renderer::{MenuUI, MenuUIItem};
use crate::cli::ui::prompts::{self, MenuAnswer};
use crate::errors::CliError;
use crate::wizard::WizardEvent;

const CONFIRM_KEY: &str = "yes";
const TITLE: &str = "Enviar Solicitação?";
const EXPLANATION: &str = "Com a confirmação, iremos analisar seus dados e te enviar o valor do \
orçamento diretamente no seu WhatsApp. Deseja confirmar?";

fn build_menu(ctx: &ScreenContext<'_>) -> MenuUI {
    let mut context = EXPLANATION.to_string();
    if let Some(date) = ctx.state.booking.date {
        context = format!("Visita em {}.\n{context}", ctx.locale.long_date(date));
    }
    MenuUI::new(
        TITLE,
        vec![
            MenuUIItem::new(CONFIRM_KEY, "Sim, Confirmar", ""),
            MenuUIItem::new("cancel", "Cancelar", ""),
        ],
    )
    .with_context(context)
}

/// Modal shown over the review screen. ESC cancels.
pub fn show(ctx: &ScreenContext<'_>) -> Result<MenuAction, CliError> {
    Ok(match prompts::select(&build_menu(ctx))? {
        MenuAnswer::Key(key) if key == CONFIRM_KEY => MenuAction::Event(WizardEvent::Finalize),
        MenuAnswer::Key(_) | MenuAnswer::Escape => {
            MenuAction::Event(WizardEvent::CancelConfirmation)
        }
        MenuAnswer::Interrupted => MenuAction::Quit,
    })
}
