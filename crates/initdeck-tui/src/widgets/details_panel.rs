//! Detail panel for the selected service

use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};

use initdeck_app::ServiceSession;
use initdeck_core::{CommandResult, ServiceRecord};

use crate::theme::styles;

const KEY_HELP: [(&str, &str); 7] = [
    ("s", "start"),
    ("t", "stop"),
    ("r", "restart"),
    ("c", "status"),
    ("Enter", "menu"),
    ("R", "refresh"),
    ("q", "quit"),
];

pub struct DetailsPanel<'a> {
    session: &'a ServiceSession,
}

impl<'a> DetailsPanel<'a> {
    pub fn new(session: &'a ServiceSession) -> Self {
        Self { session }
    }
}

fn field<'a>(label: &'a str, value: Span<'a>) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!(" {:<12}", label), styles::text_muted()),
        value,
    ])
}

fn record_lines(record: &ServiceRecord) -> Vec<Line<'_>> {
    let (glyph, label, style) = styles::status_indicator(record.status);
    vec![
        field("Name", Span::styled(record.name.as_str(), styles::accent_bold())),
        field("Status", Span::styled(format!("{} {}", glyph, label), style)),
        field(
            "Path",
            Span::styled(record.path.display().to_string(), styles::text_primary()),
        ),
        field("Size", Span::styled(record.size_display(), styles::text_primary())),
        field(
            "Permissions",
            Span::styled(record.permissions_display(), styles::text_primary()),
        ),
    ]
}

fn result_lines(result: &CommandResult) -> Vec<Line<'_>> {
    let outcome = if result.succeeded {
        Span::styled("ok", styles::status_green())
    } else {
        Span::styled("failed", styles::status_red())
    };
    let mut lines = vec![
        Line::from(""),
        Line::styled(" Last command", styles::text_secondary()),
        field(
            "Command",
            Span::styled(
                format!("{} {}", result.action, result.service_name),
                styles::text_primary(),
            ),
        ),
        field("Outcome", outcome),
        field(
            "Finished",
            Span::styled(
                format!(
                    "{} ({}ms)",
                    result.finished_at.format("%H:%M:%S"),
                    result.duration.as_millis()
                ),
                styles::text_primary(),
            ),
        ),
    ];
    if let Some(detail) = &result.error_detail {
        lines.push(field("Error", Span::styled(detail.as_str(), styles::status_red())));
    }
    lines
}

fn key_help() -> Line<'static> {
    let mut spans = vec![Span::raw(" ")];
    for (key, action) in KEY_HELP {
        spans.push(Span::styled(key, styles::keybinding()));
        spans.push(Span::styled(format!(" {}  ", action), styles::text_muted()));
    }
    Line::from(spans)
}

impl Widget for DetailsPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = styles::glass_block(false).title(" Details ");
        let inner = block.inner(area);
        block.render(area, buf);

        if inner.height == 0 || inner.width == 0 {
            return;
        }

        let [body, help] =
            Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).areas(inner);

        let mut lines = match self.session.selected_record() {
            Some(record) => record_lines(record),
            None => vec![Line::styled(" No service selected", styles::text_muted())],
        };
        if let Some(result) = self.session.last_result() {
            lines.extend(result_lines(result));
        }

        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .render(body, buf);
        key_help().render(help, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_state, TestTerminal};
    use initdeck_core::{KeywordClassifier, ServiceAction};

    #[test]
    fn test_shows_selected_record() {
        let state = create_test_state(&["apache2"]);
        let mut term = TestTerminal::new();

        term.render_widget(DetailsPanel::new(&state.session), Rect::new(0, 0, 60, 14));

        assert!(term.buffer_contains("apache2"));
        assert!(term.buffer_contains("Unknown"));
        assert!(term.buffer_contains("/etc/init.d/apache2"));
        assert!(term.buffer_contains("1024 bytes"));
        assert!(term.buffer_contains("-rwxr-xr-x"));
        assert!(term.line_contains(12, "restart"));
    }

    #[test]
    fn test_shows_last_result() {
        let mut state = create_test_state(&["apache2"]);
        state.session.begin_command(ServiceAction::Restart).unwrap();
        state.session.complete_command(
            CommandResult::failure("apache2", ServiceAction::Restart, "", "permission denied"),
            &KeywordClassifier,
            true,
        );
        let mut term = TestTerminal::new();

        term.render_widget(DetailsPanel::new(&state.session), Rect::new(0, 0, 60, 16));

        assert!(term.buffer_contains("Last command"));
        assert!(term.buffer_contains("restart apache2"));
        assert!(term.buffer_contains("failed"));
        assert!(term.buffer_contains("permission denied"));
    }

    #[test]
    fn test_no_selection() {
        let state = create_test_state(&[]);
        let mut term = TestTerminal::new();

        term.render_widget(DetailsPanel::new(&state.session), Rect::new(0, 0, 60, 10));

        assert!(term.buffer_contains("No service selected"));
    }
}
