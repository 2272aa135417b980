//! Status bar: busy indicator, last error, selection position

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Widget,
};

use initdeck_app::AppState;

use crate::theme::{palette, styles};

const SPINNER: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub struct StatusBar<'a> {
    state: &'a AppState,
}

impl<'a> StatusBar<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }

    fn activity(&self) -> Vec<Span<'static>> {
        match self.state.session.in_flight() {
            Some(pending) => vec![
                Span::styled(
                    format!(" {} ", SPINNER[self.state.tick % SPINNER.len()]),
                    styles::status_yellow(),
                ),
                Span::styled(
                    format!("Running `{}`…", pending.label()),
                    styles::status_yellow(),
                ),
            ],
            None => vec![Span::styled(" Ready", styles::status_green())],
        }
    }

    fn position(&self) -> String {
        let session = &self.state.session;
        match session.selected() {
            Some(i) => format!("{}/{} ", i + 1, session.len()),
            None => format!("0/{} ", session.len()),
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height == 0 || area.width == 0 {
            return;
        }
        buf.set_style(area, Style::default().bg(palette::CARD_BG));

        let mut spans = self.activity();
        if let Some(error) = self.state.session.last_error() {
            spans.push(Span::styled("  ✗ ", styles::status_red()));
            spans.push(Span::styled(error.to_string(), styles::status_red()));
        }
        Line::from(spans).render(area, buf);

        let position = self.position();
        let width = position.chars().count() as u16;
        if area.width > width {
            let right = Rect {
                x: area.right() - width,
                y: area.y,
                width,
                height: 1,
            };
            Line::styled(position, styles::text_muted()).render(right, buf);
        }
    }
}
