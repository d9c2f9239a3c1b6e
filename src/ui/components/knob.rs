use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{
        Block, Borders, Widget,
        canvas::{Canvas, Circle, Line},
    },
};

use crate::deck::knob::rotation_for;
use crate::util::colors;

/// A rotary knob with a 270-degree sweep. The indicator sits at seven
/// o'clock at zero and five o'clock at full.
pub struct KnobWidget<'a> {
    label: &'a str,
    value: f64,
}

impl<'a> KnobWidget<'a> {
    pub fn new(label: &'a str, value: f64) -> Self {
        Self { label, value }
    }
}

impl Widget for KnobWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let rotation = rotation_for(self.value);
        let theta = (90.0 - rotation).to_radians();

        Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::new().fg(colors::DIM))
                    .title(format!(" {} {:03.0} ", self.label, self.value * 100.0))
                    .title_style(Style::new().fg(colors::TEXT)),
            )
            .background_color(colors::BACKGROUND)
            .x_bounds([-1.2, 1.2])
            .y_bounds([-1.2, 1.2])
            .paint(|ctx| {
                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: 1.0,
                    color: colors::NEUTRAL,
                });
                ctx.draw(&Line {
                    x1: 0.0,
                    y1: 0.0,
                    x2: 0.9 * theta.cos(),
                    y2: 0.9 * theta.sin(),
                    color: colors::ACCENT,
                });
            })
            .render(area, buf);
    }
}
