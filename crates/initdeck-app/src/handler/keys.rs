//! Key event handlers for the different UI modes

use initdeck_core::ServiceAction;

use crate::input_key::InputKey;
use crate::message::Message;
use crate::state::{AppState, UiMode};

/// Convert key events to messages based on current UI mode
pub fn handle_key(state: &AppState, key: InputKey) -> Option<Message> {
    // Ctrl+C always quits
    if key == InputKey::CharCtrl('c') {
        return Some(Message::Quit);
    }

    match state.ui_mode {
        UiMode::Normal => handle_key_normal(key),
        UiMode::ActionMenu => handle_key_action_menu(key),
        UiMode::ResultDialog => handle_key_result_dialog(key),
    }
}

fn handle_key_normal(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('q') | InputKey::Esc => Some(Message::Quit),

        // Navigation
        InputKey::Char('j') | InputKey::Down => Some(Message::SelectNext),
        InputKey::Char('k') | InputKey::Up => Some(Message::SelectPrevious),
        InputKey::Char('g') | InputKey::Home | InputKey::PageUp => Some(Message::SelectFirst),
        InputKey::Char('G') | InputKey::End | InputKey::PageDown => Some(Message::SelectLast),

        InputKey::Char('R') | InputKey::F(5) => Some(Message::Refresh),
        InputKey::Enter => Some(Message::OpenActionMenu),

        // Lifecycle shortcuts
        InputKey::Char(c) => action_shortcut(c).map(Message::RunAction),

        _ => None,
    }
}

fn handle_key_action_menu(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Char('j') | InputKey::Down | InputKey::Tab => Some(Message::ActionMenuDown),
        InputKey::Char('k') | InputKey::Up => Some(Message::ActionMenuUp),
        InputKey::Enter => Some(Message::ActionMenuConfirm),
        InputKey::Esc | InputKey::Char('q') => Some(Message::CloseActionMenu),
        InputKey::Char(c) => action_shortcut(c).map(Message::RunAction),
        _ => None,
    }
}

fn handle_key_result_dialog(key: InputKey) -> Option<Message> {
    match key {
        InputKey::Enter | InputKey::Esc | InputKey::Char('q') => Some(Message::DismissResult),
        _ => None,
    }
}

fn action_shortcut(c: char) -> Option<ServiceAction> {
    match c {
        's' => Some(ServiceAction::Start),
        't' => Some(ServiceAction::Stop),
        'r' => Some(ServiceAction::Restart),
        'c' => Some(ServiceAction::Status),
        _ => None,
    }
}
