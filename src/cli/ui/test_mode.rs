//! Scripted input for driving the wizard without a terminal.
//!
//! `BOOKING_TEST_MENU_EVENTS` holds `|`-separated menu scripts, each a
//! comma-separated key list such as `DOWN,DOWN,ENTER`. `BOOKING_TEST_TEXT_INPUTS`
//! holds `|`-separated answers for text prompts. When a queue runs dry the
//! prompt behaves as if ESC was pressed.

use once_cell::sync::Lazy;
use std::{
    collections::VecDeque,
    env,
    sync::{Mutex, MutexGuard, PoisonError},
};

pub const MENU_EVENTS_VAR: &str = "BOOKING_TEST_MENU_EVENTS";
pub const TEXT_INPUTS_VAR: &str = "BOOKING_TEST_TEXT_INPUTS";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuTestEvent {
    Up,
    Down,
    Home,
    End,
    Enter,
    Esc,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextTestInput {
    Value(String),
    Escape,
}

struct ScriptQueue<T> {
    enabled: bool,
    items: VecDeque<T>,
}

impl<T> ScriptQueue<T> {
    fn from_env(var: &str, parse: fn(&str) -> VecDeque<T>) -> Self {
        match env::var(var) {
            Ok(raw) => Self {
                enabled: true,
                items: parse(&raw),
            },
            Err(_) => Self {
                enabled: false,
                items: VecDeque::new(),
            },
        }
    }
}

static MENU_EVENTS: Lazy<Mutex<MenuQueue>> =
    Lazy::new(|| Mutex::new(ScriptQueue::from_env(MENU_EVENTS_VAR, parse_menu_sequences)));

static TEXT_INPUTS: Lazy<Mutex<TextQueue>> =
    Lazy::new(|| Mutex::new(ScriptQueue::from_env(TEXT_INPUTS_VAR, parse_text_sequences)));

type MenuQueue = ScriptQueue<Vec<MenuTestEvent>>;
type TextQueue = ScriptQueue<TextTestInput>;

fn menu_queue() -> MutexGuard<'static, MenuQueue> {
    MENU_EVENTS.lock().unwrap_or_else(PoisonError::into_inner)
}

fn text_queue() -> MutexGuard<'static, TextQueue> {
    TEXT_INPUTS.lock().unwrap_or_else(PoisonError::into_inner)
}

pub fn is_enabled() -> bool {
    menu_queue().enabled || text_queue().enabled
}

/// Next scripted key list for the menu titled `label`, or `None` when menus
/// are interactive.
pub fn next_menu_events(label: &str) -> Option<Vec<MenuTestEvent>> {
    let mut guard = menu_queue();
    if !guard.enabled {
        return None;
    }
    Some(guard.items.pop_front().unwrap_or_else(|| {
        tracing::warn!(menu = label, "menu script exhausted, sending ESC");
        vec![MenuTestEvent::Esc]
    }))
}

pub fn next_text_input(label: &str) -> Option<TextTestInput> {
    let mut guard = text_queue();
    if !guard.enabled {
        return None;
    }
    Some(guard.items.pop_front().unwrap_or_else(|| {
        tracing::warn!(prompt = label, "text script exhausted, sending ESC");
        TextTestInput::Escape
    }))
}

fn parse_menu_event(token: &str) -> Option<MenuTestEvent> {
    match token.to_ascii_uppercase().as_str() {
        "UP" => Some(MenuTestEvent::Up),
        "DOWN" => Some(MenuTestEvent::Down),
        "HOME" => Some(MenuTestEvent::Home),
        "END" => Some(MenuTestEvent::End),
        "ENTER" | "RETURN" => Some(MenuTestEvent::Enter),
        "ESC" | "ESCAPE" => Some(MenuTestEvent::Esc),
        _ => None,
    }
}

fn parse_text_input(token: &str) -> TextTestInput {
    match token.to_ascii_uppercase().as_str() {
        "<ESC>" | "ESC" => TextTestInput::Escape,
        "<BLANK>" | "<EMPTY>" => TextTestInput::Value(String::new()),
        _ => TextTestInput::Value(token.to_string()),
    }
}

fn parse_menu_sequences(raw: &str) -> VecDeque<Vec<MenuTestEvent>> {
    raw.split('|')
        .filter_map(|segment| {
            let events = segment
                .split(',')
                .filter_map(|token| parse_menu_event(token.trim()))
                .collect::<Vec<_>>();
            (!events.is_empty()).then_some(events)
        })
        .collect()
}

fn parse_text_sequences(raw: &str) -> VecDeque<TextTestInput> {
    raw.split('|')
        .filter_map(|segment| {
            let trimmed = segment.trim();
            (!trimmed.is_empty()).then(|| parse_text_input(trimmed))
        })
        .collect()
}

pub fn install_menu_events(events: Vec<Vec<MenuTestEvent>>) {
    let mut guard = menu_queue();
    guard.enabled = true;
    guard.items = events.into();
}

pub fn reset_menu_events() {
    let mut guard = menu_queue();
    guard.enabled = false;
    guard.items.clear();
}

pub fn install_text_inputs(inputs: Vec<TextTestInput>) {
    let mut guard = text_queue();
    guard.enabled = true;
    guard.items = inputs.into();
}

pub fn reset_text_inputs() {
    let mut guard = text_queue();
    guard.enabled = false;
    guard.items.clear();
}
