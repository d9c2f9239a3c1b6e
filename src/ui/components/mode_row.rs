use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Paragraph, Widget},
};

use crate::session::mode::FocusMode;
use crate::util::colors;

/// Program selector row. The three programs share the row in equal cells;
/// the active one glows.
pub struct ModeRow {
    active: FocusMode,
}

impl ModeRow {
    pub fn new(active: FocusMode) -> Self {
        Self { active }
    }
}

/// Which program a click at `column` lands on.
pub fn mode_at(area: Rect, column: u16) -> Option<FocusMode> {
    if area.width == 0 || column < area.x || column >= area.x + area.width {
        return None;
    }
    let cell = area.width / 3;
    if cell == 0 {
        return None;
    }
    let index = ((column - area.x) / cell).min(2) as usize;
    Some(FocusMode::ALL[index])
}

impl Widget for ModeRow {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let cell = area.width as usize / 3;
        let spans: Vec<Span> = FocusMode::ALL
            .iter()
            .map(|mode| {
                let text = format!("{:^cell$}", mode.label());
                if *mode == self.active {
                    Span::from(text).fg(colors::ACCENT).bold()
                } else {
                    Span::from(text).fg(colors::NEUTRAL)
                }
            })
            .collect();
        Paragraph::new(Line::from(spans))
            .style(Style::new().bg(colors::CHASSIS))
            .render(area, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clicks_map_to_the_three_cells() {
        let area = Rect::new(10, 0, 30, 1);
        assert_eq!(mode_at(area, 10), Some(FocusMode::Deep));
        assert_eq!(mode_at(area, 25), Some(FocusMode::Light));
        assert_eq!(mode_at(area, 39), Some(FocusMode::Break));
        assert_eq!(mode_at(area, 9), None);
        assert_eq!(mode_at(area, 40), None);
    }
}
