//! One module per wizard screen. Each screen renders itself, collects a
//! single answer and reports it as a [`MenuAction`] for the shell to apply.

pub mod calendar;
pub mod confirmation;
pub mod details;
pub mod review;
pub mod splash;

use chrono::NaiveDate;

use crate::domain::{Locale, MonthNavigator};
use crate::wizard::{Rejection, WizardEvent, WizardState};

pub(crate) const BACK_KEY: &str = "back";
pub(crate) const BACK_LABEL: &str = "← Voltar";
pub(crate) const EMPTY_VALUE: &str = "—";

/// What the shell should do after a screen returns.
#[derive(Debug, Clone, PartialEq)]
pub enum MenuAction {
    Event(WizardEvent),
    NextMonth,
    PreviousMonth,
    /// Nothing changed; draw the same screen again.
    Redraw,
    /// Leave after asking for confirmation.
    Exit,
    /// Leave immediately (Ctrl-C).
    Quit,
}

/// Read-only view handed to every screen.
pub struct ScreenContext<'a> {
    pub state: &'a WizardState,
    pub navigator: &'a MonthNavigator,
    pub locale: Locale,
    pub today: NaiveDate,
}

/// User-facing text for an ignored event.
pub fn rejection_message(rejection: &Rejection) -> String {
    match rejection {
        Rejection::DayNotSelectable(_) => "Esta data não está disponível.".into(),
        Rejection::DetailsIncomplete => {
            "Informe o endereço e o tamanho da área para continuar.".into()
        }
        Rejection::PhoneTooShort => "Informe um telefone válido para confirmar.".into(),
        Rejection::DateNotEditable => "Escolha a data pelo calendário.".into(),
        other => format!("Ação indisponível: {other}."),
    }
}

pub(crate) fn or_empty(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        EMPTY_VALUE.to_string()
    } else {
        trimmed.to_string()
    }
}
