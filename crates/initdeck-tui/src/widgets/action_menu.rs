//! Action menu modal for the selected service

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use initdeck_app::state::ACTION_MENU;

use super::modal_overlay;
use crate::theme::styles;

const MENU_WIDTH: u16 = 30;

pub struct ActionMenu<'a> {
    service_name: &'a str,
    highlighted: usize,
}

impl<'a> ActionMenu<'a> {
    pub fn new(service_name: &'a str, highlighted: usize) -> Self {
        Self {
            service_name,
            highlighted,
        }
    }
}

impl Widget for ActionMenu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // items + borders + blank line + hint
        let height = ACTION_MENU.len() as u16 + 4;
        let modal = modal_overlay::centered_rect(MENU_WIDTH, height, area);
        modal_overlay::prepare_modal(buf, area, modal);

        let block = styles::modal_block(self.service_name);
        let inner = block.inner(modal);
        block.render(modal, buf);

        let mut lines: Vec<Line> = ACTION_MENU
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if i == self.highlighted {
                    Line::styled(format!(" > {}", item.label()), styles::focused_selected())
                } else {
                    Line::styled(format!("   {}", item.label()), styles::text_primary())
                }
            })
            .collect();
        lines.push(Line::from(""));
        lines.push(Line::from(vec![
            Span::styled(" Enter", styles::keybinding()),
            Span::styled(" run  ", styles::text_muted()),
            Span::styled("Esc", styles::keybinding()),
            Span::styled(" close", styles::text_muted()),
        ]));

        Paragraph::new(lines).render(inner, buf);
    }
}
