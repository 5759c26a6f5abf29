use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};

/// Which screen currently has the keyboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Search box + result cards
    Results,
    /// Single conversation with in-document search
    Viewer,
}

/// User actions from keyboard events
#[derive(Debug, PartialEq)]
pub enum Action {
    Quit,
    /// Esc: clear the active input, or back out when it is already empty
    ClearInput,
    MoveUp,
    MoveDown,
    PageUp,
    PageDown,
    /// Toggle deep search (results mode)
    ToggleDeep,
    /// Open the selected conversation (results mode)
    Open,
    /// Jump to the next in-document match (viewer mode)
    NextMatch,
    /// Jump to the previous in-document match (viewer mode)
    PrevMatch,
    CopyToClipboard,
    UpdateInput(char),
    DeleteChar,
    None,
}

/// Poll for keyboard events and convert to actions
pub fn poll_event(timeout: Duration, mode: Mode) -> anyhow::Result<Action> {
    if event::poll(timeout)?
        && let Event::Key(key) = event::read()?
    {
        return Ok(key_to_action(key, mode));
    }
    Ok(Action::None)
}

fn key_to_action(key: KeyEvent, mode: Mode) -> Action {
    // Bindings shared by both screens
    match (key.code, key.modifiers) {
        (KeyCode::Char('c'), KeyModifiers::CONTROL) => return Action::Quit,
        (KeyCode::Esc, _) => return Action::ClearInput,
        (KeyCode::Char('y'), KeyModifiers::CONTROL) => return Action::CopyToClipboard,
        _ => {}
    }

    match mode {
        Mode::Results => match (key.code, key.modifiers) {
            (KeyCode::Char('p'), KeyModifiers::CONTROL) | (KeyCode::Up, _) => Action::MoveUp,
            (KeyCode::Char('n'), KeyModifiers::CONTROL) | (KeyCode::Down, _) => Action::MoveDown,
            (KeyCode::PageUp, _) => Action::PageUp,
            (KeyCode::PageDown, _) => Action::PageDown,
            (KeyCode::Char('d'), KeyModifiers::CONTROL) => Action::ToggleDeep,
            (KeyCode::Enter, _) => Action::Open,
            (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
                Action::UpdateInput(c)
            }
            (KeyCode::Backspace, _) => Action::DeleteChar,
            _ => Action::None,
        },
        Mode::Viewer => match (key.code, key.modifiers) {
            (KeyCode::Enter, _) | (KeyCode::Char('n'), KeyModifiers::CONTROL) => Action::NextMatch,
            (KeyCode::Char('p'), KeyModifiers::CONTROL) => Action::PrevMatch,
            (KeyCode::Up, _) => Action::MoveUp,
            (KeyCode::Down, _) => Action::MoveDown,
            (KeyCode::PageUp, _) => Action::PageUp,
            (KeyCode::PageDown, _) => Action::PageDown,
            (KeyCode::Char(c), KeyModifiers::NONE) | (KeyCode::Char(c), KeyModifiers::SHIFT) => {
                Action::UpdateInput(c)
            }
            (KeyCode::Backspace, _) => Action::DeleteChar,
            _ => Action::None,
        },
    }
}
