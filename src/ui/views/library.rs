use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::ui::context::AppContext;
use crate::ui::layout;
use crate::ui::state::AppState;
use crate::ui::traits::{Action, View};
use crate::util::colors;

/// Overlay for loading a playlist by pasted share URL. Only useful while
/// the provider link is up; says so otherwise.
pub struct LibraryView {
    input: String,
}

impl LibraryView {
    pub fn new() -> Self {
        Self {
            input: String::new(),
        }
    }
}

impl Default for LibraryView {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl View for LibraryView {
    fn render(&mut self, f: &mut Frame, area: Rect, _state: &AppState, ctx: &AppContext) {
        let area = layout::centered(56, 8, area);
        f.render_widget(Clear, area);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::new().fg(colors::ACCENT))
            .title(" LIBRARY ")
            .title_style(Style::new().fg(colors::ACCENT))
            .style(Style::new().bg(colors::CHASSIS));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let parts = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(3),
            Constraint::Length(1),
        ])
        .split(inner);

        let hint = if ctx.is_connected() {
            "PASTE A PLAYLIST URL AND PRESS ENTER."
        } else {
            "LINK REQUIRED. CONNECT BEFORE LOADING A PLAYLIST."
        };
        f.render_widget(
            Paragraph::new(hint).style(Style::new().fg(colors::TEXT)),
            parts[0],
        );

        f.render_widget(
            Paragraph::new(Line::from(format!("> {}", self.input)).fg(colors::ACCENT)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::new().fg(colors::NEUTRAL)),
            ),
            parts[1],
        );

        f.render_widget(
            Paragraph::new("ENTER:LOAD  ESC:CLOSE").style(Style::new().fg(colors::NEUTRAL)),
            parts[2],
        );
    }

    async fn handle_input(
        &mut self,
        key: KeyEvent,
        _state: &AppState,
        _ctx: &AppContext,
    ) -> Option<Action> {
        match key.code {
            KeyCode::Char(c) => {
                self.input.push(c);
                None
            }
            KeyCode::Backspace => {
                self.input.pop();
                None
            }
            KeyCode::Enter if !self.input.trim().is_empty() => {
                Some(Action::PlayPlaylist(self.input.trim().to_string()))
            }
            KeyCode::Esc => Some(Action::CloseOverlay),
            _ => None,
        }
    }

    fn wants_text_input(&self) -> bool {
        true
    }
}
