//! Main update function - handles state transitions (TEA pattern)

use initdeck_core::prelude::*;
use initdeck_core::{CommandResult, KeywordClassifier, ServiceAction};

use crate::message::Message;
use crate::session::CommandOrigin;
use crate::state::{AppPhase, AppState, MenuItem, UiMode, ACTION_MENU};

use super::{handle_key, UpdateAction, UpdateResult};

/// Process a message and update state
/// Returns an optional follow-up message and/or action
pub fn update(state: &mut AppState, message: Message) -> UpdateResult {
    match message {
        Message::Key(key) => match handle_key(state, key) {
            Some(msg) => UpdateResult::message(msg),
            None => UpdateResult::none(),
        },

        Message::Tick => {
            if state.session.is_busy() {
                state.tick = state.tick.wrapping_add(1);
            }
            UpdateResult::none()
        }

        Message::Quit => {
            if let Some(pending) = state.session.in_flight() {
                info!("Quitting with '{}' still running", pending.label());
            }
            state.phase = AppPhase::Quitting;
            UpdateResult::none()
        }

        Message::Refresh => handle_refresh(state),

        Message::Select(index) => {
            let changed = state.session.select(index);
            after_selection(state, changed)
        }
        Message::SelectNext => {
            let changed = state.session.select_next();
            after_selection(state, changed)
        }
        Message::SelectPrevious => {
            let changed = state.session.select_previous();
            after_selection(state, changed)
        }
        Message::SelectFirst => {
            let changed = state.session.select_first();
            after_selection(state, changed)
        }
        Message::SelectLast => {
            let changed = state.session.select_last();
            after_selection(state, changed)
        }

        Message::RunAction(action) => handle_run_action(state, action),

        Message::CommandCompleted { result, origin } => {
            handle_command_completed(state, *result, origin)
        }

        Message::OpenActionMenu => {
            if state.session.selected_record().is_none() {
                state.session.set_error(Error::NoServiceSelected.to_string());
                return UpdateResult::none();
            }
            state.menu_index = 0;
            state.ui_mode = UiMode::ActionMenu;
            UpdateResult::none()
        }
        Message::CloseActionMenu => {
            state.ui_mode = UiMode::Normal;
            UpdateResult::none()
        }
        Message::ActionMenuUp => {
            state.menu_index = match state.menu_index {
                0 => ACTION_MENU.len() - 1,
                i => i - 1,
            };
            UpdateResult::none()
        }
        Message::ActionMenuDown => {
            state.menu_index = (state.menu_index + 1) % ACTION_MENU.len();
            UpdateResult::none()
        }
        Message::ActionMenuConfirm => match state.menu_item() {
            MenuItem::Action(action) => UpdateResult::message(Message::RunAction(action)),
            MenuItem::Cancel => {
                state.ui_mode = UiMode::Normal;
                UpdateResult::none()
            }
        },

        Message::DismissResult => {
            state.ui_mode = UiMode::Normal;
            UpdateResult::none()
        }
    }
}

fn handle_refresh(state: &mut AppState) -> UpdateResult {
    let directory = state.settings.services.directory.clone();
    match state.session.refresh(&directory) {
        Ok(()) => {
            state.session.clear_error();
            query_selected_if_unknown(state)
        }
        Err(e) => {
            warn!("Refresh failed: {}", e);
            state.session.set_error(e.to_string());
            UpdateResult::none()
        }
    }
}

fn after_selection(state: &mut AppState, changed: bool) -> UpdateResult {
    if !changed {
        return UpdateResult::none();
    }
    query_selected_if_unknown(state)
}

/// Dispatch an implicit status query when the selected service has never
/// been queried and nothing else is running
fn query_selected_if_unknown(state: &mut AppState) -> UpdateResult {
    if !state.settings.services.status_on_select || state.session.is_busy() {
        return UpdateResult::none();
    }
    let unknown = state
        .session
        .selected_record()
        .is_some_and(|r| !r.status.is_known());
    if !unknown {
        return UpdateResult::none();
    }

    match state.session.begin_status_query() {
        Ok(pending) => UpdateResult::action(UpdateAction::ExecuteCommand(pending)),
        Err(e) => {
            debug!("Skipping status query: {}", e);
            UpdateResult::none()
        }
    }
}

fn handle_run_action(state: &mut AppState, action: ServiceAction) -> UpdateResult {
    if state.ui_mode == UiMode::ActionMenu {
        state.ui_mode = UiMode::Normal;
    }

    match state.session.begin_command(action) {
        Ok(pending) => {
            state.session.clear_error();
            info!("Dispatching {}", pending.label());
            UpdateResult::action(UpdateAction::ExecuteCommand(pending))
        }
        Err(e) => {
            warn!("Cannot {}: {}", action, e);
            state.session.set_error(e.to_string());
            UpdateResult::none()
        }
    }
}

fn handle_command_completed(
    state: &mut AppState,
    result: CommandResult,
    origin: CommandOrigin,
) -> UpdateResult {
    if result.succeeded {
        info!("{}", result.summary());
    } else {
        warn!(
            "{}: {}",
            result.summary(),
            result.error_detail.as_deref().unwrap_or_default()
        );
    }

    let follow_up = state.session.complete_command(
        result,
        &KeywordClassifier,
        state.settings.control.requery_after_action,
    );

    if origin == CommandOrigin::Operator {
        state.ui_mode = UiMode::ResultDialog;
    }

    match follow_up {
        Some(pending) => UpdateResult::action(UpdateAction::ExecuteCommand(pending)),
        None => UpdateResult::none(),
    }
}
