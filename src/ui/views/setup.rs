use async_trait::async_trait;
use ratatui::crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::Line,
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::event::events::Event;
use crate::ui::context::AppContext;
use crate::ui::state::AppState;
use crate::ui::traits::{Action, View};
use crate::util::colors;

/// Provider link screen. Shows the authorization URL to open in a browser
/// and collects the pasted redirect URL (or bare code) in return.
pub struct SetupView {
    auth_url: Option<String>,
    input: String,
}

impl SetupView {
    pub fn new() -> Self {
        Self {
            auth_url: None,
            input: String::new(),
        }
    }
}

impl Default for SetupView {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl View for SetupView {
    fn render(&mut self, f: &mut Frame, area: Rect, state: &AppState, ctx: &AppContext) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::new().fg(colors::DIM))
            .title(" LINK MODE ")
            .title_style(Style::new().fg(colors::ACCENT));
        let inner = block.inner(area);
        f.render_widget(block, area);

        let parts = Layout::vertical([
            Constraint::Length(2),
            Constraint::Min(4),
            Constraint::Length(3),
            Constraint::Length(2),
        ])
        .split(inner);

        let intro = if ctx.config.client_id.is_empty() {
            "NO CLIENT ID SET (SPINPOD_CLIENT_ID). ESC FOR STANDALONE MODE."
        } else {
            "OPEN THE URL BELOW, AUTHORIZE, THEN PASTE THE REDIRECT URL."
        };
        f.render_widget(
            Paragraph::new(intro).style(Style::new().fg(colors::TEXT)),
            parts[0],
        );

        let url = self.auth_url.as_deref().unwrap_or("GENERATING URL...");
        f.render_widget(
            Paragraph::new(url)
                .style(Style::new().fg(colors::COPPER))
                .wrap(Wrap { trim: true }),
            parts[1],
        );

        f.render_widget(
            Paragraph::new(Line::from(format!("> {}", self.input)).fg(colors::ACCENT)).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::new().fg(colors::NEUTRAL))
                    .title(" REDIRECT URL "),
            ),
            parts[2],
        );

        f.render_widget(
            Paragraph::new(format!(
                "ENTER:LINK  ESC:STANDALONE  {}",
                state.status
            ))
            .style(Style::new().fg(colors::NEUTRAL)),
            parts[3],
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
                Some(Action::SubmitAuthInput(self.input.clone()))
            }
            KeyCode::Esc => Some(Action::GoOffline),
            _ => None,
        }
    }

    async fn on_event(&mut self, event: &Event, _ctx: &AppContext) {
        if let Event::AuthUrl(url) = event {
            self.auth_url = Some(url.clone());
        }
    }

    fn wants_text_input(&self) -> bool {
        true
    }
}
