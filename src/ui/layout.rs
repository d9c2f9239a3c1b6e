use ratatui::layout::{Constraint, Flex, Layout, Rect};

/// Header line, body, footer line.
pub fn chunks(area: Rect) -> (Rect, Rect, Rect) {
    let parts = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .split(area);
    (parts[0], parts[1], parts[2])
}

/// Platter on the left, control column on the right.
pub fn deck_chunks(area: Rect) -> (Rect, Rect) {
    let parts =
        Layout::horizontal([Constraint::Percentage(58), Constraint::Percentage(42)]).split(area);
    (parts[0], parts[1])
}

/// Mode selector row, timer readout, track info, knob row.
pub fn panel_chunks(area: Rect) -> (Rect, Rect, Rect, Rect) {
    let parts = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(4),
        Constraint::Min(6),
        Constraint::Length(9),
    ])
    .split(area);
    (parts[0], parts[1], parts[2], parts[3])
}

pub fn knob_chunks(area: Rect) -> (Rect, Rect) {
    let parts =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area);
    (parts[0], parts[1])
}

/// Centered rect for modal overlays.
pub fn centered(width: u16, height: u16, area: Rect) -> Rect {
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    area
}
