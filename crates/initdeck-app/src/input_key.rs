//! Terminal-independent key events
//!
//! The TUI converts crossterm key events into [`InputKey`] so this crate
//! never depends on a terminal library.

/// A key press as the key handlers see it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKey {
    /// Printable character (a-z, 0-9, symbols)
    Char(char),
    /// Character with Ctrl held (Ctrl+c, ...)
    CharCtrl(char),

    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,

    Enter,
    Esc,
    Tab,

    /// Function key (F1-F12)
    F(u8),
}
