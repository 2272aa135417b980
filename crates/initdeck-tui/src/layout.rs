//! Screen layout

use ratatui::layout::{Constraint, Layout, Rect};

/// Header height: top border + title row + bottom border
pub const HEADER_HEIGHT: u16 = 3;

/// Status bar height
pub const STATUS_HEIGHT: u16 = 1;

/// Below this width the detail panel is dropped
pub const MIN_SPLIT_WIDTH: u16 = 60;

/// Screen areas for the main layout
#[derive(Debug, Clone, Copy)]
pub struct ScreenAreas {
    pub header: Rect,
    /// Service list (left column)
    pub list: Rect,
    /// Detail panel (right column), `None` on narrow terminals
    pub details: Option<Rect>,
    pub status: Rect,
}

/// Split the screen into header, list/detail columns and status bar
pub fn create(area: Rect) -> ScreenAreas {
    let [header, body, status] = Layout::vertical([
        Constraint::Length(HEADER_HEIGHT),
        Constraint::Min(3),
        Constraint::Length(STATUS_HEIGHT),
    ])
    .areas(area);

    if area.width < MIN_SPLIT_WIDTH {
        return ScreenAreas {
            header,
            list: body,
            details: None,
            status,
        };
    }

    let [list, details] =
        Layout::horizontal([Constraint::Percentage(35), Constraint::Percentage(65)]).areas(body);

    ScreenAreas {
        header,
        list,
        details: Some(details),
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_layout() {
        let layout = create(Rect::new(0, 0, 80, 24));

        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.status.height, 1);
        assert_eq!(layout.status.y, 23);
        assert_eq!(layout.list.y, 3);
        assert_eq!(layout.list.height, 20);

        let details = layout.details.unwrap();
        assert_eq!(layout.list.width + details.width, 80);
        assert!(details.width > layout.list.width);
    }

    #[test]
    fn test_narrow_layout_drops_details() {
        let layout = create(Rect::new(0, 0, 40, 12));

        assert!(layout.details.is_none());
        assert_eq!(layout.list.width, 40);
        assert_eq!(layout.list.height, 8);
    }
}
