//! Full-frame rendering tests

use super::view;
use crate::test_utils::{create_test_state, TestTerminal};
use initdeck_app::UiMode;
use initdeck_core::{CommandResult, KeywordClassifier, ServiceAction};

#[test]
fn test_normal_view() {
    let state = create_test_state(&["apache2", "cron"]);
    let mut term = TestTerminal::new();

    term.draw_with(|frame| view(frame, &state));

    assert!(term.line_contains(1, "initdeck"));
    assert!(term.line_contains(1, "2 services"));
    assert!(term.buffer_contains("apache2"));
    assert!(term.buffer_contains("cron"));
    assert!(term.buffer_contains("Details"));
    assert!(term.line_contains(23, "Ready"));
}

#[test]
fn test_narrow_view_hides_details() {
    let state = create_test_state(&["apache2"]);
    let mut term = TestTerminal::with_size(40, 12);

    term.draw_with(|frame| view(frame, &state));

    assert!(term.buffer_contains("apache2"));
    assert!(!term.buffer_contains("Details"));
}

#[test]
fn test_action_menu_overlay() {
    let mut state = create_test_state(&["apache2"]);
    state.ui_mode = UiMode::ActionMenu;
    state.menu_index = 1;
    let mut term = TestTerminal::new();

    term.draw_with(|frame| view(frame, &state));

    assert!(term.buffer_contains("> Stop"));
    assert!(term.buffer_contains("Cancel"));
}

#[test]
fn test_result_dialog_overlay() {
    let mut state = create_test_state(&["apache2"]);
    state.session.begin_command(ServiceAction::Status).unwrap();
    state.session.complete_command(
        CommandResult::success("apache2", ServiceAction::Status, "apache2 is running"),
        &KeywordClassifier,
        true,
    );
    state.ui_mode = UiMode::ResultDialog;
    let mut term = TestTerminal::new();

    term.draw_with(|frame| view(frame, &state));

    assert!(term.buffer_contains("Command succeeded"));
    assert!(term.buffer_contains("apache2 is running"));
}

#[test]
fn test_result_dialog_without_result_renders_normal_view() {
    let mut state = create_test_state(&["apache2"]);
    state.ui_mode = UiMode::ResultDialog;
    let mut term = TestTerminal::new();

    term.draw_with(|frame| view(frame, &state));

    assert!(!term.buffer_contains("Command succeeded"));
    assert!(term.buffer_contains("apache2"));
}
