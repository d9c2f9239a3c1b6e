use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Gauge, Widget},
};

use crate::session::timer::FocusTimer;
use crate::util::{colors, format};

/// Countdown readout for the active focus program.
pub struct TimerWidget<'a> {
    timer: &'a FocusTimer,
}

impl<'a> TimerWidget<'a> {
    pub fn new(timer: &'a FocusTimer) -> Self {
        Self { timer }
    }
}

impl Widget for TimerWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let fill = if self.timer.is_active() {
            colors::ACCENT
        } else {
            colors::NEUTRAL
        };

        Gauge::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::new().fg(colors::DIM))
                    .title(format!(" {} ", self.timer.mode().label()))
                    .title_style(Style::new().fg(colors::TEXT)),
            )
            .gauge_style(Style::new().fg(fill).bg(colors::CHASSIS))
            .ratio(self.timer.fraction_remaining().clamp(0.0, 1.0))
            .label(format::clock(self.timer.remaining()))
            .render(area, buf);
    }
}
