//! Event handling functions for user input and application state updates.

use color_eyre::eyre::Result;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::{config::Level, movement::Direction, types::Screen, App};

/// Normalized user input.
///
/// Raw key events are decoded into one of these before they reach the application, so the screen
/// logic never deals with terminal specifics.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Input {
    /// Move the player one cell.
    Move(Direction),
    /// A decimal digit, used to pick a level.
    Digit(u8),
    /// Leave the current screen or the game.
    Quit,
    /// Any other key.
    Other,
}

/// Decodes a key event.
///
/// Arrow keys and `h`/`j`/`k`/`l` move, `Esc`, `q` and `Ctrl-C` quit and digits select levels.
/// Returns `None` for key releases and repeats, which carry no new input.
pub(crate) fn decode(key: KeyEvent) -> Option<Input> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    let input = match key.code {
        KeyCode::Up | KeyCode::Char('k') => Input::Move(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') => Input::Move(Direction::Down),
        KeyCode::Left | KeyCode::Char('h') => Input::Move(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') => Input::Move(Direction::Right),
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => Input::Quit,
        KeyCode::Esc | KeyCode::Char('q') => Input::Quit,
        KeyCode::Char(symbol) => symbol
            .to_digit(10)
            .and_then(|digit| u8::try_from(digit).ok())
            .map_or(Input::Other, Input::Digit),
        _ => Input::Other,
    };

    Some(input)
}

/// Waits for the next terminal event and applies it.
///
/// This function blocks until an event arrives. Non-key events only trigger a redraw.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if let Event::Key(key) = event::read()? {
        if let Some(input) = decode(key) {
            handle_input(app, input)?;
        }
    }

    Ok(())
}

/// Applies one decoded input to the application, depending on the current screen.
///
/// # Errors
///
/// - [`InvalidLevel`](crate::InvalidLevel) when a digit outside 1 to 5 is pressed on the
///   level menu.
/// - [`LoadError`](crate::file_loader::LoadError) when the chosen level cannot be loaded.
pub(crate) fn handle_input(app: &mut App, input: Input) -> Result<()> {
    match (app.screen, input) {
        (Screen::Welcome | Screen::LevelMenu, Input::Quit) | (Screen::GameOver(_), _) => {
            app.exit = true;
        }
        (Screen::Welcome, _) => app.leave_welcome()?,
        (Screen::LevelMenu, Input::Digit(number)) => {
            let level = Level::try_from(number)?;
            app.start_level(level)?;
        }
        (Screen::InGame, Input::Move(direction)) => app.move_player(direction),
        (Screen::InGame, Input::Quit) => app.abandon(),
        (Screen::LevelMenu | Screen::InGame, _) => {}
    }

    Ok(())
}
