//! Message types for the application (TEA pattern)

use initdeck_core::{CommandResult, ServiceAction};

use crate::input_key::InputKey;
use crate::session::CommandOrigin;

/// All possible messages/intents in the application
#[derive(Debug, Clone)]
pub enum Message {
    /// Keyboard event from the terminal
    Key(InputKey),

    /// Periodic tick (drives the busy spinner)
    Tick,

    /// Quit immediately (q, Ctrl+C, signal handler)
    Quit,

    // ─────────────────────────────────────────────────────────
    // Catalog & selection
    // ─────────────────────────────────────────────────────────
    /// Rescan the service directory
    Refresh,
    /// Select the service at this catalog index
    Select(usize),
    SelectNext,
    SelectPrevious,
    SelectFirst,
    SelectLast,

    // ─────────────────────────────────────────────────────────
    // Commands
    // ─────────────────────────────────────────────────────────
    /// Run a lifecycle action against the selected service
    RunAction(ServiceAction),
    /// A background command finished
    CommandCompleted {
        result: Box<CommandResult>,
        origin: CommandOrigin,
    },

    // ─────────────────────────────────────────────────────────
    // Modals
    // ─────────────────────────────────────────────────────────
    OpenActionMenu,
    CloseActionMenu,
    ActionMenuUp,
    ActionMenuDown,
    ActionMenuConfirm,
    /// Close the command result dialog
    DismissResult,
}
