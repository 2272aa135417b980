//! Service list: status glyph and name per catalog entry

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use initdeck_app::ServiceSession;

use crate::theme::styles;

pub struct ServiceList<'a> {
    session: &'a ServiceSession,
}

impl<'a> ServiceList<'a> {
    pub fn new(session: &'a ServiceSession) -> Self {
        Self { session }
    }
}

/// First visible row so that `selected` stays on screen
fn scroll_offset(selected: Option<usize>, visible_rows: usize) -> usize {
    match selected {
        Some(i) if visible_rows > 0 && i >= visible_rows => i + 1 - visible_rows,
        _ => 0,
    }
}

impl Widget for ServiceList<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(true).title(" Services ");
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        if self.session.is_empty() {
            Paragraph::new(Line::styled(" No services found", styles::text_muted()))
                .render(inner, buf);
            return;
        }

        let visible = inner.height as usize;
        let offset = scroll_offset(self.session.selected(), visible);
        let selected = self.session.selected();

        for (row, (index, record)) in self
            .session
            .catalog()
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .enumerate()
        {
            let (glyph, _, glyph_style) = styles::status_indicator(record.status);
            let is_selected = selected == Some(index);

            let line = if is_selected {
                let style = styles::focused_selected();
                Line::from(vec![
                    Span::styled(format!(" {} ", glyph), style),
                    Span::styled(record.name.as_str(), style),
                ])
                .style(style)
            } else {
                Line::from(vec![
                    Span::styled(format!(" {} ", glyph), glyph_style),
                    Span::styled(record.name.as_str(), styles::text_primary()),
                ])
            };

            let row_area = Rect {
                x: inner.x,
                y: inner.y + row as u16,
                width: inner.width,
                height: 1,
            };
            line.render(row_area, buf);
        }
    }
}
