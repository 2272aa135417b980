//! Application state (Model in TEA pattern)

use initdeck_core::ServiceAction;

use crate::config::Settings;
use crate::session::ServiceSession;

/// Current UI mode/screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    /// Service list with detail panel
    #[default]
    Normal,

    /// Action menu for the selected service
    ActionMenu,

    /// Output of the last operator command
    ResultDialog,
}

/// Application lifecycle phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppPhase {
    #[default]
    Running,
    Quitting,
}

/// Entry of the action menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Action(ServiceAction),
    Cancel,
}

impl MenuItem {
    pub fn label(&self) -> &'static str {
        match self {
            MenuItem::Action(action) => action.label(),
            MenuItem::Cancel => "Cancel",
        }
    }
}

/// Action menu entries, top to bottom
pub const ACTION_MENU: [MenuItem; 5] = [
    MenuItem::Action(ServiceAction::Start),
    MenuItem::Action(ServiceAction::Stop),
    MenuItem::Action(ServiceAction::Restart),
    MenuItem::Action(ServiceAction::Status),
    MenuItem::Cancel,
];

/// Complete application state
#[derive(Debug)]
pub struct AppState {
    pub session: ServiceSession,
    pub settings: Settings,
    pub ui_mode: UiMode,
    pub phase: AppPhase,

    /// Highlighted action menu entry
    pub menu_index: usize,

    /// Whether the process runs as root (shown as a header badge)
    pub elevated: bool,

    /// Tick counter for the busy spinner
    pub tick: usize,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_settings(Settings::default())
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            session: ServiceSession::new(),
            settings,
            ui_mode: UiMode::Normal,
            phase: AppPhase::Running,
            menu_index: 0,
            elevated: initdeck_control::is_elevated(),
            tick: 0,
        }
    }

    pub fn should_quit(&self) -> bool {
        self.phase == AppPhase::Quitting
    }

    pub fn menu_item(&self) -> MenuItem {
        ACTION_MENU[self.menu_index.min(ACTION_MENU.len() - 1)]
    }
}
