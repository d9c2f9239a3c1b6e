use std::sync::Arc;

use flume::Sender;
use tracing::warn;

use crate::{
    ambience::AmbienceEngine,
    auth::{AuthService, JsonTokenStore},
    config::ProviderConfig,
    deck::platter::Platter,
    event::events::Event,
    player::{
        program::LocalProgram,
        remote::RemotePlayer,
        state::{Connection, PlaybackSnapshot},
        track::Track,
    },
    session::{
        history::{JsonFileStore, SessionHistory},
        timer::FocusTimer,
    },
};

const DEFAULT_VOLUME: f64 = 0.75;
const DEFAULT_SPACE: f64 = 0.3;

/// Shared domain state behind the views. Views read it during render and
/// input handling; only the event handler mutates it.
pub struct AppContext {
    pub config: ProviderConfig,
    pub auth: AuthService,
    pub remote: Option<Arc<RemotePlayer>>,
    pub connection: Connection,
    pub snapshot: Option<PlaybackSnapshot>,
    pub program: LocalProgram,
    pub timer: FocusTimer,
    pub session_start: Option<u64>,
    pub history: SessionHistory,
    pub platter: Platter,
    /// Scrub position accumulated while dragging; flushed to the provider
    /// on release so a drag issues one seek, not dozens.
    pub pending_seek: Option<f64>,
    pub volume: f64,
    pub space: f64,
    pub shuffle: bool,
    pub ambience: Option<AmbienceEngine>,
    pub event_tx: Sender<Event>,
}

impl AppContext {
    pub fn new(event_tx: Sender<Event>) -> color_eyre::Result<Self> {
        let config = ProviderConfig::from_env();
        let auth = AuthService::new(config.clone(), Box::new(JsonTokenStore::open_default()?));
        let history = SessionHistory::load(Box::new(JsonFileStore::open_default()?));

        let ambience = match AmbienceEngine::start(DEFAULT_SPACE as f32) {
            Ok(engine) => Some(engine),
            Err(e) => {
                warn!("ambience disabled, no output stream: {e}");
                None
            }
        };

        Ok(Self {
            config,
            auth,
            remote: None,
            connection: Connection::new(),
            snapshot: None,
            program: LocalProgram::new(),
            timer: FocusTimer::new(Default::default()),
            session_start: None,
            history,
            platter: Platter::new(),
            pending_seek: None,
            volume: DEFAULT_VOLUME,
            space: DEFAULT_SPACE,
            shuffle: false,
            ambience,
            event_tx,
        })
    }

    pub fn is_connected(&self) -> bool {
        self.remote.is_some() && self.connection.is_connected()
    }

    /// The signal on the display: provider snapshot when linked, otherwise
    /// the built-in placeholder program.
    pub fn current_track(&self) -> Option<&Track> {
        if self.is_connected() {
            self.snapshot.as_ref().and_then(|s| s.track.as_ref())
        } else {
            Some(self.program.current())
        }
    }

    pub fn current_title(&self) -> Option<String> {
        self.current_track().map(|t| t.title.clone())
    }

    pub fn progress(&self) -> f64 {
        if self.is_connected() {
            self.snapshot.as_ref().map_or(0.0, |s| s.progress)
        } else {
            self.program.progress()
        }
    }

    pub fn is_playing(&self) -> bool {
        if self.is_connected() {
            self.snapshot.as_ref().is_some_and(|s| !s.paused)
        } else {
            self.program.is_playing()
        }
    }
}
