use std::{env, time::Instant};

use chrono::NaiveDate;
use tracing::{debug, info};

use crate::cli::menus::{
    self, calendar, confirmation, details, review,
    splash::{self, SplashOutcome},
    MenuAction, ScreenContext,
};
use crate::cli::output::{self, set_preferences, OutputPreferences};
use crate::cli::ui::prompts;
use crate::config::{Config, ConfigManager};
use crate::domain::{BookedDateSet, Locale, MonthNavigator};
use crate::errors::CliError;
use crate::time::{Clock, FixedClock, SystemClock};
use crate::wizard::{BookingSession, LogSink, Outcome, WizardEvent, WizardStep};

const TODAY_VAR: &str = "BOOKING_CORE_TODAY";

pub fn run_cli() -> Result<(), CliError> {
    let manager = ConfigManager::new();
    let config = manager.load()?;
    apply_preferences(&config);

    let locale = config.locale();
    let clock = clock_from_env()?;
    info!(%locale, today = %clock.today(), config = %manager.path().display(), "starting booking wizard");

    let mut session = BookingSession::new(clock, Box::new(LogSink::new(locale)));
    session.start(Instant::now(), config.splash.total());
    if splash::run(&mut session, &config)? == SplashOutcome::Aborted {
        info!("splash aborted");
        return Ok(());
    }

    let mut shell = Shell::new(session, locale);
    let result = shell.run_loop();
    shell.session.teardown();
    print_farewell(&shell.session.state().booked, locale);
    result
}

fn apply_preferences(config: &Config) {
    let plain_mode = config.plain_mode || env::var_os("NO_COLOR").is_some();
    if plain_mode {
        colored::control::set_override(false);
    }
    set_preferences(OutputPreferences {
        plain_mode,
        quiet_mode: false,
    });
}

fn clock_from_env() -> Result<Box<dyn Clock>, CliError> {
    match env::var(TODAY_VAR) {
        Ok(raw) => {
            let today = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|err| {
                CliError::Input(format!("{TODAY_VAR} must be YYYY-MM-DD ({err})"))
            })?;
            Ok(Box::new(FixedClock::new(today)))
        }
        Err(_) => Ok(Box::new(SystemClock)),
    }
}

struct Shell {
    session: BookingSession,
    navigator: MonthNavigator,
    locale: Locale,
    last_step: WizardStep,
}

impl Shell {
    fn new(session: BookingSession, locale: Locale) -> Self {
        let today = session.clock().today();
        let last_step = session.step();
        Self {
            session,
            navigator: MonthNavigator::new(today),
            locale,
            last_step,
        }
    }

    fn run_loop(&mut self) -> Result<(), CliError> {
        loop {
            let today = self.session.clock().today();
            let step = self.session.step();
            if step == WizardStep::Calendar && self.last_step != WizardStep::Calendar {
                self.navigator.reset(today);
            }
            self.last_step = step;

            let action = self.show_current(today)?;
            match action {
                MenuAction::Event(event) => self.apply(event),
                MenuAction::NextMonth => self.navigator.next(),
                MenuAction::PreviousMonth => {
                    if !self.navigator.previous(today) {
                        output::warning("Não é possível voltar para meses anteriores.");
                    }
                }
                MenuAction::Redraw => {}
                MenuAction::Exit => {
                    if prompts::confirm("Deseja sair do agendamento?", false)? {
                        return Ok(());
                    }
                }
                MenuAction::Quit => return Ok(()),
            }
        }
    }

    fn show_current(&self, today: NaiveDate) -> Result<MenuAction, CliError> {
        let state = self.session.state();
        let ctx = ScreenContext {
            state,
            navigator: &self.navigator,
            locale: self.locale,
            today,
        };
        if state.confirmation_open {
            return confirmation::show(&ctx);
        }
        match state.step {
            WizardStep::Calendar => calendar::show(&ctx),
            WizardStep::Details => details::show(&ctx),
            WizardStep::Review => review::show(&ctx),
            // The splash screen is over before the loop starts.
            WizardStep::Splash => Ok(MenuAction::Event(WizardEvent::SplashElapsed)),
        }
    }

    fn apply(&mut self, event: WizardEvent) {
        match self.session.dispatch(event) {
            Outcome::Applied => {}
            Outcome::Submitted(booking) => {
                debug!(?booking.date, "submission handed to sink");
                output::success("Solicitação enviada! Entraremos em contato em breve.");
            }
            Outcome::Rejected(reason) => output::warning(menus::rejection_message(&reason)),
        }
    }
}

fn print_farewell(booked: &BookedDateSet, locale: Locale) {
    if booked.is_empty() {
        output::info("Nenhuma visita agendada.");
        return;
    }
    output::section("Visitas agendadas");
    for date in booked {
        output::info(format!("  {}", locale.long_date(*date)));
    }
}
