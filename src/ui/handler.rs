use std::future::Future;

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent};
use tracing::warn;

use crate::{
    auth::{AuthError, AuthService},
    event::events::Event,
    player::{
        error::PlayerError,
        state::{PlayerEvent, StateEffect},
    },
    session::{
        history::{SessionRecord, epoch_millis},
        mode::FocusMode,
        timer::TimerEvent,
    },
    ui::{
        app::App,
        input,
        traits::Action,
        tui::{TerminalEvent, Tui},
        views::{DeckView, HistoryView, LibraryView, SetupView},
    },
};

pub struct EventHandler;

impl EventHandler {
    /// One iteration of the main loop: wait for the next terminal event,
    /// then drain whatever the background tasks have queued up.
    pub async fn handle_events(app: &mut App, tui: &Tui) -> color_eyre::Result<()> {
        if let Some(evt) = tui.next().await {
            Self::handle_terminal_event(app, evt).await;
        }

        while let Ok(evt) = app.event_rx.try_recv() {
            Self::handle_app_event(app, evt).await;
        }

        Ok(())
    }

    async fn handle_terminal_event(app: &mut App, evt: TerminalEvent) {
        match evt {
            TerminalEvent::FocusGained => app.has_focus = true,
            TerminalEvent::FocusLost => app.has_focus = false,
            TerminalEvent::Key(key) => Self::handle_key(app, key).await,
            TerminalEvent::Mouse(mouse) => Self::handle_mouse(app, mouse).await,
            TerminalEvent::Tick => {
                // Frame tick. The platter physics run at this rate; the
                // one-second timer work rides the TimerTick app event.
                let playing = app.ctx.is_playing();
                let speed = app.ctx.timer.mode().rotation_speed();
                app.ctx.platter.step(playing, speed);
            }
            TerminalEvent::Resize(_, _) => {}
        }
    }

    async fn handle_key(app: &mut App, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            app.should_quit = true;
            return;
        }

        let wants_text = app
            .router
            .active_view()
            .is_some_and(|v| v.wants_text_input());

        let action = app.router.handle_input(key, &app.state, &app.ctx).await;
        let action = match action {
            Some(action) => Some(action),
            None if !wants_text => input::global_action(key),
            None => None,
        };

        if let Some(action) = action {
            Self::dispatch(app, action).await;
        }
    }

    async fn handle_mouse(app: &mut App, mouse: MouseEvent) {
        let action = app
            .router
            .active_view()
            .and_then(|v| v.handle_mouse(mouse, &app.ctx));
        if let Some(action) = action {
            Self::dispatch(app, action).await;
        }
    }

    pub async fn dispatch(app: &mut App, action: Action) {
        match action {
            Action::Quit => app.should_quit = true,

            Action::TogglePlayPause => Self::toggle_play_pause(app),

            Action::NextTrack => {
                if app.ctx.is_connected() {
                    if let Some(remote) = app.ctx.remote.clone() {
                        Self::spawn_command(app, "cmd", async move { remote.next().await });
                    }
                } else {
                    app.ctx.program.next();
                }
            }

            Action::ToggleSession => {
                // Session and playback move together, like the hardware
                // transport.
                if app.ctx.timer.is_active() {
                    app.ctx.timer.stop();
                    app.ctx.session_start = None;
                    Self::set_playback(app, false);
                    app.state.status = "PRGM HOLD".to_string();
                } else {
                    app.ctx.timer.start();
                    app.ctx.session_start = Some(epoch_millis());
                    Self::set_playback(app, true);
                    app.state.status = "PRGM RUN".to_string();
                }
            }

            Action::SetMode(mode) => Self::change_mode(app, mode),
            Action::CycleMode => {
                let mode = app.ctx.timer.mode().next();
                Self::change_mode(app, mode);
            }

            Action::SetVolume(v) => Self::apply_volume(app, v),
            Action::NudgeVolume(d) => Self::apply_volume(app, app.ctx.volume + d),
            Action::SetSpace(v) => Self::apply_space(app, v),
            Action::NudgeSpace(d) => Self::apply_space(app, app.ctx.space + d),

            Action::ToggleShuffle => {
                app.ctx.shuffle = !app.ctx.shuffle;
                let enabled = app.ctx.shuffle;
                if let Some(remote) = app.ctx.remote.clone() {
                    Self::spawn_command(app, "shuffle", async move {
                        remote.set_shuffle(enabled).await
                    });
                }
            }

            Action::OpenHistory => app.router.set_overlay(Box::new(HistoryView::new())),
            Action::OpenLibrary => app.router.set_overlay(Box::new(LibraryView::new())),
            Action::CloseOverlay => app.router.clear_overlay(),

            Action::SubmitAuthInput(text) => Self::submit_auth_input(app, &text).await,

            Action::GoOffline => {
                app.router.replace(Box::new(DeckView::new()));
                app.state.status = "STANDALONE".to_string();
            }

            Action::PlayPlaylist(url) => {
                if let Some(remote) = app.ctx.remote.clone() {
                    Self::spawn_command(app, "cmd", async move {
                        remote.play_playlist(&url).await
                    });
                    app.router.clear_overlay();
                    app.state.status = "PRGM LOAD".to_string();
                } else {
                    app.state.status = PlayerError::Device.status_code();
                }
            }

            Action::PlatterPress(angle) => app.ctx.platter.begin_drag(angle),

            Action::PlatterDrag(angle) => {
                let progress = app.ctx.progress();
                if let Some(scrubbed) = app.ctx.platter.drag_to(angle, progress) {
                    if app.ctx.is_connected() {
                        if let Some(snapshot) = &mut app.ctx.snapshot {
                            snapshot.progress = scrubbed;
                        }
                        app.ctx.pending_seek = Some(scrubbed);
                    } else {
                        app.ctx.program.set_progress(scrubbed);
                    }
                }
            }

            Action::PlatterRelease => {
                app.ctx.platter.end_drag();
                if let Some(progress) = app.ctx.pending_seek.take()
                    && app.ctx.is_connected()
                    && let Some(remote) = app.ctx.remote.clone()
                {
                    let duration_ms = app
                        .ctx
                        .current_track()
                        .map(|t| t.duration_ms)
                        .unwrap_or_default();
                    let position = (progress * duration_ms as f64) as u64;
                    Self::spawn_command(app, "seek", async move {
                        remote.seek_ms(position).await
                    });
                }
            }
        }
    }

    fn toggle_play_pause(app: &mut App) {
        if app.ctx.is_connected() {
            let paused = app.ctx.snapshot.as_ref().is_none_or(|s| s.paused);
            Self::set_playback(app, paused);
        } else {
            app.ctx.program.toggle();
        }
    }

    fn set_playback(app: &mut App, playing: bool) {
        if app.ctx.is_connected() {
            if let Some(remote) = app.ctx.remote.clone() {
                Self::spawn_command(app, "cmd", async move {
                    if playing {
                        remote.resume().await
                    } else {
                        remote.pause().await
                    }
                });
            }
            // Optimistic flip; the next poll confirms or corrects it.
            if let Some(snapshot) = &mut app.ctx.snapshot {
                snapshot.paused = !playing;
            }
        } else {
            app.ctx.program.set_playing(playing);
        }
    }

    /// Switching programs cancels any running session without logging it,
    /// matching `FocusTimer::set_mode`.
    fn change_mode(app: &mut App, mode: FocusMode) {
        if app.ctx.timer.is_active() {
            app.ctx.session_start = None;
            Self::set_playback(app, false);
        }
        app.ctx.timer.set_mode(mode);
        app.state.status = mode.label().to_string();
    }

    fn apply_volume(app: &mut App, value: f64) {
        let value = value.clamp(0.0, 1.0);
        app.ctx.volume = value;
        if let Some(remote) = app.ctx.remote.clone() {
            let percent = (value * 100.0).round() as u8;
            Self::spawn_command(app, "volume", async move {
                remote.set_volume(percent).await
            });
        }
    }

    fn apply_space(app: &mut App, value: f64) {
        let value = value.clamp(0.0, 1.0);
        app.ctx.space = value;
        if let Some(ambience) = &app.ctx.ambience {
            ambience.set_amount(value as f32);
            // Fully closed knob silences the room tone outright.
            if value == 0.0 {
                ambience.pause();
            } else {
                ambience.resume();
            }
        }
    }

    async fn submit_auth_input(app: &mut App, text: &str) {
        let Some(code) = AuthService::extract_code(text) else {
            app.state.status = "BAD_SIGNAL".to_string();
            return;
        };

        match app.ctx.auth.exchange_code(&code).await {
            Ok(token) => {
                app.attach_remote(token);
                app.router.replace(Box::new(DeckView::new()));
                app.state.status = "LINK UP".to_string();
            }
            Err(e) => {
                warn!("token exchange failed: {e}");
                app.state.status = match e {
                    AuthError::Network(_) => "LINK_DOWN".to_string(),
                    _ => "AUTH_ERROR".to_string(),
                };
            }
        }
    }

    pub async fn handle_app_event(app: &mut App, evt: Event) {
        app.router.on_event(&evt, &app.ctx).await;

        match evt {
            Event::TimerTick => Self::on_second(app),
            Event::AuthUrl(_) => {}
            Event::Status(code) => app.state.status = code,
            Event::Player(player_event) => Self::on_player_event(app, player_event),
        }
    }

    /// One-second housekeeping: virtual playback and the focus countdown.
    fn on_second(app: &mut App) {
        if !app.ctx.is_connected() {
            app.ctx.program.tick();
        }

        if let Some(TimerEvent::Completed) = app.ctx.timer.tick() {
            let start = app.ctx.session_start.take().unwrap_or_else(epoch_millis);
            // The record carries the title active at the moment of
            // completion.
            let tracks = app.ctx.current_title().into_iter().collect();
            let record = SessionRecord::new(app.ctx.timer.mode(), start, tracks);
            app.ctx.history.record(record);
            app.state.status = "PRGM COMPLETE".to_string();
            Self::set_playback(app, false);
        }
    }

    fn on_player_event(app: &mut App, event: PlayerEvent) {
        let effect = app.ctx.connection.apply(&event);

        match &event {
            PlayerEvent::Connecting => app.state.status = "SCANNING".to_string(),
            PlayerEvent::Ready { .. } => app.state.status = "LINK UP".to_string(),
            PlayerEvent::NotReady => app.state.status = PlayerError::Device.status_code(),
            PlayerEvent::StateChanged(snapshot) => {
                let mut snapshot = snapshot.clone();
                // Keep the scrub position while a drag is in flight.
                if let Some(pending) = app.ctx.pending_seek {
                    snapshot.progress = pending;
                }
                app.ctx.snapshot = Some(snapshot);
            }
            PlayerEvent::AuthError(message) => {
                warn!("provider auth error: {message}");
                app.state.status = PlayerError::Auth.status_code();
            }
            PlayerEvent::AccountError(message) => {
                warn!("provider account error: {message}");
                app.state.status = PlayerError::Premium.status_code();
            }
            PlayerEvent::InitError(message) => {
                warn!("provider init error: {message}");
                app.state.status = "BAD_SIGNAL".to_string();
            }
            PlayerEvent::Disconnected => app.state.status = "LINK_DOWN".to_string(),
        }

        if effect == Some(StateEffect::ClearToken) {
            app.ctx.auth.clear_token();
            app.ctx.remote = None;
            app.ctx.snapshot = None;
            app.task_manager.abort("monitor");
            app.router.replace(Box::new(SetupView::new()));
            match app.ctx.auth.authorize_url() {
                Ok(url) => {
                    let _ = app.ctx.event_tx.send(Event::AuthUrl(url));
                }
                Err(e) => warn!("failed to build authorize URL: {e}"),
            }
        }
    }

    fn spawn_command<F>(app: &mut App, key: &str, command: F)
    where
        F: Future<Output = Result<(), PlayerError>> + Send + 'static,
    {
        let tx = app.ctx.event_tx.clone();
        app.task_manager.spawn(
            key,
            tokio::spawn(async move {
                if let Err(e) = command.await {
                    let _ = tx.send(Event::Status(e.status_code()));
                }
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        auth::{Credentials, TokenStore},
        config::ProviderConfig,
        deck::platter::Platter,
        player::{program::LocalProgram, state::Connection},
        session::{
            history::{HistoryStore, SessionHistory, SessionRecord},
            timer::FocusTimer,
        },
        ui::{
            context::AppContext,
            router::Router,
            state::AppState,
            views::DeckView,
        },
        util::task::TaskManager,
    };

    struct NullTokenStore;

    impl TokenStore for NullTokenStore {
        fn load(&self) -> std::io::Result<Credentials> {
            Ok(Credentials::default())
        }

        fn save(&mut self, _creds: &Credentials) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct NullHistoryStore;

    impl HistoryStore for NullHistoryStore {
        fn load(&self) -> std::io::Result<Option<Vec<SessionRecord>>> {
            Ok(None)
        }

        fn save(&mut self, _records: &[SessionRecord]) -> std::io::Result<()> {
            Ok(())
        }
    }

    /// Offline app with in-memory stores and no audio output.
    fn offline_app() -> App {
        let (event_tx, event_rx) = flume::unbounded();
        let config = ProviderConfig::from_env();
        let ctx = AppContext {
            auth: AuthService::new(config.clone(), Box::new(NullTokenStore)),
            config,
            remote: None,
            connection: Connection::new(),
            snapshot: None,
            program: LocalProgram::new(),
            timer: FocusTimer::new(Default::default()),
            session_start: None,
            history: SessionHistory::load(Box::new(NullHistoryStore)),
            platter: Platter::new(),
            pending_seek: None,
            volume: 0.75,
            space: 0.3,
            shuffle: false,
            ambience: None,
            event_tx: event_tx.clone(),
        };

        App {
            event_rx,
            event_tx,
            ctx,
            state: AppState::default(),
            router: Router::new(Box::new(DeckView::new())),
            task_manager: TaskManager::new(),
            has_focus: true,
            should_quit: false,
        }
    }

    #[tokio::test]
    async fn session_toggle_drives_playback() {
        let mut app = offline_app();

        EventHandler::dispatch(&mut app, Action::ToggleSession).await;
        assert!(app.ctx.timer.is_active());
        assert!(app.ctx.program.is_playing());

        EventHandler::dispatch(&mut app, Action::ToggleSession).await;
        assert!(!app.ctx.timer.is_active());
        assert!(!app.ctx.program.is_playing());
    }

    #[tokio::test]
    async fn mode_change_cancels_the_running_session() {
        let mut app = offline_app();

        EventHandler::dispatch(&mut app, Action::ToggleSession).await;
        EventHandler::dispatch(&mut app, Action::SetMode(FocusMode::Deep)).await;

        assert!(!app.ctx.timer.is_active());
        assert_eq!(app.ctx.session_start, None);
        assert!(!app.ctx.program.is_playing());
        assert_eq!(app.ctx.timer.remaining(), 3000);
        assert!(app.ctx.history.is_empty());
    }

    #[tokio::test]
    async fn completed_session_records_the_active_title() {
        let mut app = offline_app();

        EventHandler::dispatch(&mut app, Action::ToggleSession).await;
        for _ in 0..app.ctx.timer.total() {
            EventHandler::handle_app_event(&mut app, Event::TimerTick).await;
        }

        assert_eq!(app.ctx.history.len(), 1);
        let record = &app.ctx.history.records()[0];
        assert_eq!(record.duration_seconds, 900);
        // 900 s into the looped program (215 + 180 + 240 + 215 = 850) the
        // second pass of VOID_ECHO is active.
        assert_eq!(record.tracks, vec!["VOID_ECHO"]);
        assert!(!app.ctx.program.is_playing());
    }
}
