//! Test utilities for TUI rendering verification
//!
//! Widgets and full frames are rendered into ratatui's `TestBackend` and
//! asserted on as text.

use std::path::Path;

use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::{Frame, Terminal};

use initdeck_app::{AppState, ServiceSession};
use initdeck_core::ServiceRecord;

/// Standard test terminal size
pub const TEST_WIDTH: u16 = 80;
pub const TEST_HEIGHT: u16 = 24;

/// Wrapper around a `TestBackend` terminal
pub struct TestTerminal {
    pub terminal: Terminal<TestBackend>,
}

impl TestTerminal {
    pub fn new() -> Self {
        Self::with_size(TEST_WIDTH, TEST_HEIGHT)
    }

    pub fn with_size(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("Failed to create test terminal");
        Self { terminal }
    }

    pub fn area(&self) -> Rect {
        let size = self.terminal.size().expect("Failed to get terminal size");
        Rect::new(0, 0, size.width, size.height)
    }

    pub fn render_widget<W: Widget>(&mut self, widget: W, area: Rect) {
        self.terminal
            .draw(|frame| frame.render_widget(widget, area))
            .expect("Failed to render widget");
    }

    /// Draw a full frame, e.g. with `render::view`
    pub fn draw_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal.draw(f).expect("Failed to draw frame");
    }

    pub fn buffer(&self) -> &Buffer {
        self.terminal.backend().buffer()
    }

    pub fn buffer_contains(&self, text: &str) -> bool {
        self.content().contains(text)
    }

    pub fn line_contains(&self, line: u16, text: &str) -> bool {
        let buffer = self.buffer();
        if line >= buffer.area.height {
            return false;
        }
        let content: String = (0..buffer.area.width)
            .map(|x| buffer[(x, line)].symbol())
            .collect();
        content.contains(text)
    }

    /// All content, one terminal row per line
    pub fn content(&self) -> String {
        let buffer = self.buffer();
        let mut result = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                result.push_str(buffer[(x, y)].symbol());
            }
            result.push('\n');
        }
        result
    }
}

impl Default for TestTerminal {
    fn default() -> Self {
        Self::new()
    }
}

/// AppState whose catalog holds `names` under `/etc/init.d`
pub fn create_test_state(names: &[&str]) -> AppState {
    let dir = Path::new("/etc/init.d");
    let mut state = AppState::new();
    state.elevated = false;
    state.session = ServiceSession::with_catalog(
        names
            .iter()
            .map(|name| {
                let mut record = ServiceRecord::new(*name, dir);
                record.file_size = Some(1024);
                record.permissions = Some("-rwxr-xr-x".to_string());
                record
            })
            .collect(),
    );
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::widgets::Paragraph;

    #[test]
    fn test_terminal_renders_text() {
        let mut term = TestTerminal::new();
        let area = term.area();
        term.render_widget(Paragraph::new("hello initdeck"), area);

        assert!(term.buffer_contains("hello initdeck"));
        assert!(term.line_contains(0, "hello"));
        assert!(!term.line_contains(1, "hello"));
        assert!(!term.line_contains(100, "hello"));
    }

    #[test]
    fn test_create_test_state() {
        let state = create_test_state(&["apache2", "cron"]);
        assert_eq!(state.session.len(), 2);
        assert_eq!(state.session.selected(), Some(0));
    }
}
