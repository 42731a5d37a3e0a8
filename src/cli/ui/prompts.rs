use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use crate::cli::ui::menu_renderer::{MenuRenderError, MenuRenderer, MenuUI};
use crate::cli::ui::test_mode::{self, TextTestInput};
use crate::errors::CliError;

/// Result of a menu prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAnswer {
    Key(String),
    Escape,
    Interrupted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextAnswer {
    Value(String),
    Escape,
}

pub fn select(menu: &MenuUI) -> Result<MenuAnswer, CliError> {
    match MenuRenderer::new().show(menu) {
        Ok(Some(key)) => Ok(MenuAnswer::Key(key)),
        Ok(None) => Ok(MenuAnswer::Escape),
        Err(MenuRenderError::Interrupted) => Ok(MenuAnswer::Interrupted),
        Err(MenuRenderError::Io(err)) => Err(err.into()),
    }
}

/// Free-text prompt pre-filled with `initial`.
pub fn text_input(label: &str, initial: &str) -> Result<TextAnswer, CliError> {
    if let Some(scripted) = test_mode::next_text_input(label) {
        return Ok(match scripted {
            TextTestInput::Value(value) => {
                println!("{label}: {value}");
                TextAnswer::Value(value)
            }
            TextTestInput::Escape => TextAnswer::Escape,
        });
    }

    let value = Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt(label)
        .with_initial_text(initial)
        .allow_empty(true)
        .interact_text()?;
    Ok(TextAnswer::Value(value))
}

/// Yes/no question. Scripted runs answer with a text entry; ESC means yes.
pub fn confirm(prompt: &str, default: bool) -> Result<bool, CliError> {
    if let Some(scripted) = test_mode::next_text_input(prompt) {
        return Ok(match scripted {
            TextTestInput::Value(value) => is_affirmative(&value),
            TextTestInput::Escape => true,
        });
    }

    let answer = Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(default)
        .interact()?;
    Ok(answer)
}

fn is_affirmative(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "sim"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::ui::menu_renderer::MenuUIItem;
    use crate::cli::ui::test_mode::{
        install_menu_events, install_text_inputs, reset_menu_events, reset_text_inputs,
        MenuTestEvent,
    };

    #[test]
    fn affirmative_answers_accept_both_languages() {
        assert!(is_affirmative(" Sim "));
        assert!(is_affirmative("y"));
        assert!(!is_affirmative("não"));
        assert!(!is_affirmative(""));
    }

    #[test]
    fn scripted_prompts_consume_queues_in_order() {
        install_menu_events(vec![vec![MenuTestEvent::Down, MenuTestEvent::Enter]]);
        install_text_inputs(vec![
            TextTestInput::Value("Rua das Flores, 123".into()),
            TextTestInput::Value("não".into()),
        ]);

        let menu = MenuUI::new(
            "Escolha",
            vec![MenuUIItem::new("a", "A", ""), MenuUIItem::new("b", "B", "")],
        );
        assert_eq!(select(&menu).unwrap(), MenuAnswer::Key("b".into()));
        assert_eq!(select(&menu).unwrap(), MenuAnswer::Escape);
        assert_eq!(
            text_input("Endereço", "").unwrap(),
            TextAnswer::Value("Rua das Flores, 123".into())
        );
        assert!(!confirm("Sair?", false).unwrap());
        assert_eq!(text_input("Telefone", "").unwrap(), TextAnswer::Escape);

        reset_menu_events();
        reset_text_inputs();
    }
}
