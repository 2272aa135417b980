//! Command result dialog

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use initdeck_core::CommandResult;

use super::modal_overlay;
use crate::theme::styles;

pub struct ResultDialog<'a> {
    result: &'a CommandResult,
}

impl<'a> ResultDialog<'a> {
    pub fn new(result: &'a CommandResult) -> Self {
        Self { result }
    }
}

impl Widget for ResultDialog<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let width = (area.width * 7 / 10).max(40);
        let height = (area.height * 6 / 10).max(8);
        let modal = modal_overlay::centered_rect(width, height, area);
        modal_overlay::prepare_modal(buf, area, modal);

        let title = if self.result.succeeded {
            "Command succeeded"
        } else {
            "Command failed"
        };
        let block = styles::modal_block(title);
        let inner = block.inner(modal);
        block.render(modal, buf);

        let [body, footer] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        let text_style = if self.result.succeeded {
            styles::text_primary()
        } else {
            styles::status_red()
        };
        let lines: Vec<Line> = self
            .result
            .display_text()
            .lines()
            .map(|line| Line::styled(format!(" {}", line), text_style))
            .collect();
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(body, buf);

        Line::from(vec![
            Span::styled(" Enter/Esc", styles::keybinding()),
            Span::styled(" close", styles::text_muted()),
        ])
        .render(footer, buf);
    }
}
