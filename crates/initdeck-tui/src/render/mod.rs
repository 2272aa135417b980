//! Main render/view function (View in TEA pattern)

#[cfg(test)]
mod tests;

use ratatui::style::Style;
use ratatui::widgets::Block;
use ratatui::Frame;

use initdeck_app::{AppState, UiMode};

use crate::theme::palette;
use crate::{layout, widgets};

/// Render the complete UI from a read-only snapshot of the state
pub fn view(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    frame.render_widget(
        Block::default().style(Style::default().bg(palette::DEEPEST_BG)),
        area,
    );

    let areas = layout::create(area);
    let session = &state.session;

    frame.render_widget(
        widgets::MainHeader::new(&state.settings.services.directory)
            .service_count(session.len())
            .elevated(state.elevated),
        areas.header,
    );
    frame.render_widget(widgets::ServiceList::new(session), areas.list);
    if let Some(details) = areas.details {
        frame.render_widget(widgets::DetailsPanel::new(session), details);
    }
    frame.render_widget(widgets::StatusBar::new(state), areas.status);

    match state.ui_mode {
        UiMode::Normal => {}
        UiMode::ActionMenu => {
            if let Some(record) = session.selected_record() {
                frame.render_widget(widgets::ActionMenu::new(&record.name, state.menu_index), area);
            }
        }
        UiMode::ResultDialog => {
            if let Some(result) = session.last_result() {
                frame.render_widget(widgets::ResultDialog::new(result), area);
            }
        }
    }
}
