use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::player::state::ConnectionState;
use crate::util::colors;

/// Footer line: link indicator on the left, status code in the middle,
/// key hints on the right.
pub struct StatusBar<'a> {
    status: &'a str,
    connection: &'a ConnectionState,
}

impl<'a> StatusBar<'a> {
    pub fn new(status: &'a str, connection: &'a ConnectionState) -> Self {
        Self { status, connection }
    }

    fn link_span(&self) -> Span<'static> {
        match self.connection {
            ConnectionState::Disconnected => Span::from("LINK:OFF").fg(colors::NEUTRAL),
            ConnectionState::Connecting => Span::from("LINK:SCAN").fg(colors::COPPER),
            ConnectionState::Ready => Span::from("LINK:RDY").fg(colors::ACCENT),
            ConnectionState::Playing => Span::from("LINK:PLAY").fg(colors::ACCENT),
            ConnectionState::Paused => Span::from("LINK:HOLD").fg(colors::ACCENT),
            ConnectionState::Error(_) => Span::from("LINK:ERR").fg(colors::SIGNAL),
        }
    }
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let line = Line::from(vec![
            self.link_span(),
            Span::from("  "),
            Span::from(self.status.to_string()).fg(colors::TEXT),
            Span::from("  "),
            Span::from("SPC:PLAY ENT:PRGM TAB:MODE H:LOG L:LIB Q:OFF").fg(colors::NEUTRAL),
        ]);
        Paragraph::new(line)
            .style(Style::new().bg(colors::CHASSIS))
            .render(area, buf);
    }
}
