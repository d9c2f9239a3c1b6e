use std::sync::Arc;
use std::time::Duration;

use flume::{Receiver, Sender};
use ratatui::Frame;
use tracing::warn;

use crate::{
    event::events::Event,
    player::{monitor, remote::RemotePlayer},
    ui::{
        components::status::StatusBar,
        context::AppContext,
        handler::EventHandler,
        layout,
        router::Router,
        state::AppState,
        traits::View,
        tui::Tui,
        views::{DeckView, SetupView},
    },
    util::{colors, task::TaskManager},
};
use ratatui::style::{Style, Stylize};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

pub struct App {
    pub event_rx: Receiver<Event>,
    pub event_tx: Sender<Event>,
    pub ctx: AppContext,
    pub state: AppState,
    pub router: Router,
    pub task_manager: TaskManager,
    pub has_focus: bool,
    pub should_quit: bool,
}

impl App {
    pub async fn new() -> color_eyre::Result<Self> {
        let (event_tx, event_rx) = flume::unbounded();
        let ctx = AppContext::new(event_tx.clone())?;

        let initial: Box<dyn View> = if ctx.auth.is_authenticated() {
            Box::new(DeckView::new())
        } else {
            Box::new(SetupView::new())
        };

        let mut app = Self {
            event_rx,
            event_tx,
            ctx,
            state: AppState::default(),
            router: Router::new(initial),
            task_manager: TaskManager::new(),
            has_focus: true,
            should_quit: false,
        };

        if let Some(token) = app.ctx.auth.access_token().map(str::to_string) {
            app.attach_remote(token);
        } else {
            match app.ctx.auth.authorize_url() {
                Ok(url) => {
                    let _ = app.event_tx.send(Event::AuthUrl(url));
                }
                Err(e) => warn!("failed to build authorize URL: {e}"),
            }
        }

        app.spawn_second_hand();

        Ok(app)
    }

    /// Wires up the provider control surface and its state poller. Spawning
    /// under the fixed key replaces any previous poller.
    pub fn attach_remote(&mut self, token: String) {
        let remote = Arc::new(RemotePlayer::new(self.ctx.config.api_base.clone(), token));
        self.ctx.remote = Some(remote.clone());
        self.task_manager
            .spawn("monitor", monitor::spawn(remote, self.ctx.event_tx.clone()));
    }

    /// The single one-second pulse driving the focus timer and the virtual
    /// program.
    fn spawn_second_hand(&mut self) {
        let tx = self.event_tx.clone();
        self.task_manager.spawn(
            "second_hand",
            tokio::spawn(async move {
                let mut interval = tokio::time::interval(Duration::from_secs(1));
                // The first tick fires immediately; skip it.
                interval.tick().await;
                loop {
                    interval.tick().await;
                    if tx.send_async(Event::TimerTick).await.is_err() {
                        break;
                    }
                }
            }),
        );
    }

    pub async fn run(&mut self) -> color_eyre::Result<()> {
        let mut tui = Tui::new()?;
        tui.enter()?;

        while !self.should_quit {
            if self.has_focus {
                let Self {
                    router, state, ctx, ..
                } = self;
                tui.draw(|f| Self::ui(router, state, ctx, f))?;
            }

            EventHandler::handle_events(self, &tui).await?;
        }

        self.task_manager.abort_all();
        tui.exit()
    }

    fn ui(router: &mut Router, state: &AppState, ctx: &AppContext, frame: &mut Frame) {
        let (header, body, footer) = layout::chunks(frame.area());

        let mode = ctx.timer.mode().label();
        frame.render_widget(
            Paragraph::new(Line::from(vec![
                Span::from(" SPINPOD ").fg(colors::ACCENT).bold(),
                Span::from(format!(" {mode}")).fg(colors::NEUTRAL),
            ]))
            .style(Style::new().bg(colors::CHASSIS)),
            header,
        );

        router.render(frame, body, state, ctx);

        frame.render_widget(StatusBar::new(&state.status, ctx.connection.state()), footer);
    }
}
