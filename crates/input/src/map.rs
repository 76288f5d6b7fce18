//! Key mapping from terminal events to host commands.

use crate::types::{GameAction, Gravity};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a key press asks the host loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    /// Forward to the engine.
    Action(GameAction),
    /// Leave the start screen.
    Start,
    /// Switch between the light and dark theme.
    ToggleTheme,
    Quit,
}

/// Map keyboard input to a host command.
///
/// Release events are ignored so terminals that report them do not double
/// every move.
pub fn map_key(key: KeyEvent, gravity: Gravity) -> Option<KeyCommand> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if should_quit(key) {
        return Some(KeyCommand::Quit);
    }
    match key.code {
        KeyCode::Enter => return Some(KeyCommand::Start),
        KeyCode::Char('t') | KeyCode::Char('T') => return Some(KeyCommand::ToggleTheme),
        _ => {}
    }
    handle_key_event(key, gravity).map(KeyCommand::Action)
}

/// Map keyboard input to game actions.
///
/// The arrow pointing at the floor soft-drops and the other one rotates, so
/// Up and Down swap roles while gravity is inverted.
pub fn handle_key_event(key: KeyEvent, gravity: Gravity) -> Option<GameAction> {
    match (key.code, gravity) {
        (KeyCode::Down, Gravity::Down) | (KeyCode::Up, Gravity::Up) => {
            return Some(GameAction::SoftDrop)
        }
        (KeyCode::Up, Gravity::Down) | (KeyCode::Down, Gravity::Up) => {
            return Some(GameAction::RotateCw)
        }
        _ => {}
    }

    match key.code {
        KeyCode::Left => Some(GameAction::MoveLeft),
        KeyCode::Right => Some(GameAction::MoveRight),

        // Rotation
        KeyCode::Char('z') | KeyCode::Char('Z') => Some(GameAction::RotateCcw),

        // Actions
        KeyCode::Char(' ') => Some(GameAction::HardDrop),
        KeyCode::Char('c') | KeyCode::Char('C') | KeyCode::Char('h') | KeyCode::Char('H') => {
            Some(GameAction::Hold)
        }
        KeyCode::Char('p') | KeyCode::Char('P') | KeyCode::Esc => Some(GameAction::Pause),

        // Session
        KeyCode::Char('r') | KeyCode::Char('R') => Some(GameAction::Restart),
        KeyCode::Char('m') | KeyCode::Char('M') => Some(GameAction::Home),

        _ => None,
    }
}

/// Check if key should quit the game.
pub fn should_quit(key: KeyEvent) -> bool {
    matches!(key.code, KeyCode::Char('q') | KeyCode::Char('Q'))
        || (key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL))
}
