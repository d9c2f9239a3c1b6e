use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    widgets::{
        Block, Borders, Widget,
        canvas::{Canvas, Circle, Line},
    },
};

use crate::util::colors;

/// The vinyl platter: grooves, a copper tonearm-side marker and a center
/// label, spun by the physics model's rotation angle.
pub struct PlatterWidget<'a> {
    rotation: f64,
    title: &'a str,
    dragging: bool,
}

impl<'a> PlatterWidget<'a> {
    pub fn new(rotation: f64, title: &'a str, dragging: bool) -> Self {
        Self {
            rotation,
            title,
            dragging,
        }
    }
}

impl Widget for PlatterWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let marker_color = if self.dragging {
            colors::ACCENT
        } else {
            colors::COPPER
        };

        // Screen rotation grows clockwise from twelve o'clock; canvas
        // angles grow counterclockwise from three o'clock.
        let theta = (90.0 - self.rotation).to_radians();

        Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::new().fg(colors::DIM))
                    .title(format!(" {} ", self.title))
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
                for groove in [0.85, 0.7, 0.55] {
                    ctx.draw(&Circle {
                        x: 0.0,
                        y: 0.0,
                        radius: groove,
                        color: colors::DIM,
                    });
                }
                ctx.draw(&Circle {
                    x: 0.0,
                    y: 0.0,
                    radius: 0.3,
                    color: colors::ACCENT,
                });
                ctx.draw(&Line {
                    x1: 0.3 * theta.cos(),
                    y1: 0.3 * theta.sin(),
                    x2: theta.cos(),
                    y2: theta.sin(),
                    color: marker_color,
                });
            })
            .render(area, buf);
    }
}
