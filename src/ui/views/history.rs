use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
};

use crate::session::history::epoch_millis;
use crate::ui::context::AppContext;
use crate::ui::layout;
use crate::ui::state::AppState;
use crate::ui::traits::{Action, View};
use crate::util::{colors, format};

/// DATA_LOG overlay: completed focus sessions, newest first.
pub struct HistoryView {
    list: ListState,
}

impl HistoryView {
    pub fn new() -> Self {
        Self {
            list: ListState::default(),
        }
    }
}

impl Default for HistoryView {
    fn default() -> Self {
        Self::new()
    }
}

fn age_label(now_ms: u64, then_ms: u64) -> String {
    let secs = now_ms.saturating_sub(then_ms) / 1000;
    if secs < 60 {
        "NOW".to_string()
    } else if secs < 3600 {
        format!("{}M AGO", secs / 60)
    } else if secs < 86_400 {
        format!("{}H AGO", secs / 3600)
    } else {
        format!("{}D AGO", secs / 86_400)
    }
}

#[async_trait(?Send)]
impl View for HistoryView {
    fn render(&mut self, f: &mut Frame, area: Rect, _state: &AppState, ctx: &AppContext) {
        let area = layout::centered(60, 20, area);
        f.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::new().fg(colors::ACCENT))
            .title(" DATA_LOG ")
            .title_style(Style::new().fg(colors::ACCENT))
            .style(Style::new().bg(colors::CHASSIS));

        if ctx.history.is_empty() {
            f.render_widget(
                Paragraph::new("NO SESSIONS LOGGED")
                    .style(Style::new().fg(colors::NEUTRAL))
                    .block(block),
                area,
            );
            return;
        }

        let now = epoch_millis();
        let items: Vec<ListItem> = ctx
            .history
            .records()
            .iter()
            .map(|r| {
                ListItem::new(Line::from(format!(
                    "{:<12} {:>6} {:>8}  {} TRK",
                    r.mode.name(),
                    format::clock(r.duration_seconds),
                    age_label(now, r.start_time),
                    r.tracks.len(),
                )))
                .fg(colors::TEXT)
            })
            .collect();

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::new().fg(colors::ACCENT).bold());
        f.render_stateful_widget(list, area, &mut self.list);
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &AppState,
        _ctx: &AppContext,
    ) -> Option<Action> {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                self.list.select_previous();
                None
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.list.select_next();
                None
            }
            KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('q') => Some(Action::CloseOverlay),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn age_label_buckets() {
        let now = 100 * 86_400_000;
        assert_eq!(age_label(now, now - 30_000), "NOW");
        assert_eq!(age_label(now, now - 5 * 60_000), "5M AGO");
        assert_eq!(age_label(now, now - 3 * 3_600_000), "3H AGO");
        assert_eq!(age_label(now, now - 2 * 86_400_000), "2D AGO");
    }

    #[test]
    fn age_label_tolerates_clock_skew() {
        assert_eq!(age_label(1_000, 2_000), "NOW");
    }
}
