//! Header bar: title, service directory, privilege badge

use std::path::Path;

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Widget,
};

use crate::theme::{palette, styles};

pub struct MainHeader<'a> {
    directory: &'a Path,
    service_count: usize,
    elevated: bool,
}

impl<'a> MainHeader<'a> {
    pub fn new(directory: &'a Path) -> Self {
        Self {
            directory,
            service_count: 0,
            elevated: false,
        }
    }

    pub fn service_count(mut self, count: usize) -> Self {
        self.service_count = count;
        self
    }

    pub fn elevated(mut self, elevated: bool) -> Self {
        self.elevated = elevated;
        self
    }

    fn badge(&self) -> Span<'static> {
        if self.elevated {
            Span::styled(
                " root ",
                Style::default()
                    .fg(palette::CONTRAST_FG)
                    .bg(palette::STATUS_GREEN)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(
                " not root ",
                Style::default()
                    .fg(palette::CONTRAST_FG)
                    .bg(palette::STATUS_YELLOW)
                    .add_modifier(Modifier::BOLD),
            )
        }
    }
}

impl Widget for MainHeader<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false);
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let services = match self.service_count {
            1 => "1 service".to_string(),
            n => format!("{} services", n),
        };
        let left = Line::from(vec![
            Span::raw(" "),
            Span::styled("initdeck", styles::accent_bold()),
            Span::raw(" "),
            Span::styled("/", styles::text_muted()),
            Span::raw(" "),
            Span::styled(self.directory.display().to_string(), styles::text_secondary()),
            Span::raw("  "),
            Span::styled(services, styles::text_muted()),
        ]);

        let badge = Line::from(vec![self.badge(), Span::raw(" ")]);
        let badge_width = badge.width() as u16;
        let left_width = left.width() as u16;

        left.render(inner, buf);

        // Badge only when it does not overlap the title
        if inner.width > badge_width + left_width {
            let badge_area = Rect {
                x: inner.right() - badge_width,
                y: inner.y,
                width: badge_width,
                height: 1,
            };
            badge.render(badge_area, buf);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestTerminal;

    #[test]
    fn test_header_shows_directory_and_count() {
        let mut term = TestTerminal::new();
        let header = MainHeader::new(Path::new("/etc/init.d")).service_count(12);

        term.render_widget(header, Rect::new(0, 0, 80, 3));

        assert!(term.line_contains(1, "initdeck"));
        assert!(term.line_contains(1, "/etc/init.d"));
        assert!(term.line_contains(1, "12 services"));
    }

    #[test]
    fn test_privilege_badge() {
        let mut term = TestTerminal::new();
        term.render_widget(
            MainHeader::new(Path::new("/etc/init.d")).elevated(false),
            Rect::new(0, 0, 80, 3),
        );
        assert!(term.line_contains(1, "not root"));

        let mut term = TestTerminal::new();
        term.render_widget(
            MainHeader::new(Path::new("/etc/init.d"))
                .service_count(1)
                .elevated(true),
            Rect::new(0, 0, 80, 3),
        );
        assert!(term.line_contains(1, " root "));
        assert!(!term.buffer_contains("not root"));
        assert!(term.line_contains(1, "1 service"));
    }
}
