use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    symbols,
    text::Line,
    widgets::{Block, Borders, LineGauge, Paragraph, Widget},
};

use crate::player::track::Track;
use crate::util::{colors, format};

/// Pixel-display readout for the current signal.
pub struct TrackInfoWidget<'a> {
    track: Option<&'a Track>,
    progress: f64,
    playing: bool,
    shuffle: bool,
}

impl<'a> TrackInfoWidget<'a> {
    pub fn new(track: Option<&'a Track>, progress: f64, playing: bool, shuffle: bool) -> Self {
        Self {
            track,
            progress,
            playing,
            shuffle,
        }
    }
}

impl Widget for TrackInfoWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::new().fg(colors::DIM))
            .title(" SIGNAL ")
            .title_style(Style::new().fg(colors::TEXT));
        let inner = block.inner(area);
        block.render(area, buf);

        let Some(track) = self.track else {
            Paragraph::new("NO_SIGNAL")
                .style(Style::new().fg(colors::NEUTRAL))
                .render(inner, buf);
            return;
        };

        let parts = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(inner);

        let transport = if self.playing { "PLAY" } else { "HOLD" };
        let shuffle = if self.shuffle { " SHFL" } else { "" };
        let width = inner.width as usize;

        Paragraph::new(
            Line::from(format::truncate(&track.title, width))
                .fg(colors::ACCENT)
                .bold(),
        )
        .render(parts[0], buf);
        Paragraph::new(Line::from(format::truncate(&track.artist, width)).fg(colors::TEXT))
            .render(parts[1], buf);
        Paragraph::new(
            Line::from(format::truncate(
                &format!("{} / TRK {:02}", track.album_title, track.track_number),
                width,
            ))
            .fg(colors::NEUTRAL),
        )
        .render(parts[2], buf);
        Paragraph::new(
            Line::from(format!(
                "{transport}{shuffle}  {} / {}",
                format::clock_ms((self.progress * track.duration_ms as f64) as u64),
                format::clock_ms(track.duration_ms),
            ))
            .fg(colors::TEXT),
        )
        .render(parts[3], buf);

        LineGauge::default()
            .filled_style(Style::new().fg(colors::COPPER))
            .unfilled_style(Style::new().fg(colors::DIM))
            .line_set(symbols::line::THICK)
            .ratio(self.progress.clamp(0.0, 1.0))
            .render(parts[4], buf);
    }
}
