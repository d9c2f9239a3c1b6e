use super::track::Track;

/// Latest playback report from the provider.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackSnapshot {
    pub track: Option<Track>,
    pub paused: bool,
    /// Position within the track, normalized to [0, 1].
    pub progress: f64,
}

/// Everything the provider binding can report, as typed events. The UI and
/// the connection machine are driven exclusively through these, so tests
/// run without a live provider.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerEvent {
    Connecting,
    Ready { device_id: String },
    NotReady,
    StateChanged(PlaybackSnapshot),
    AuthError(String),
    AccountError(String),
    InitError(String),
    Disconnected,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Ready,
    Playing,
    Paused,
    Error(String),
}

/// Side effects a transition asks the owner to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateEffect {
    /// The stored access token is invalid; drop it so the next attempt
    /// starts clean.
    ClearToken,
}

/// Connection lifecycle of the provider binding.
#[derive(Debug, Clone)]
pub struct Connection {
    state: ConnectionState,
    device_id: Option<String>,
}

impl Default for Connection {
    fn default() -> Self {
        Self::new()
    }
}

impl Connection {
    pub fn new() -> Self {
        Self {
            state: ConnectionState::Disconnected,
            device_id: None,
        }
    }

    pub fn state(&self) -> &ConnectionState {
        &self.state
    }

    pub fn device_id(&self) -> Option<&str> {
        self.device_id.as_deref()
    }

    pub fn is_connected(&self) -> bool {
        matches!(
            self.state,
            ConnectionState::Ready | ConnectionState::Playing | ConnectionState::Paused
        )
    }

    pub fn apply(&mut self, event: &PlayerEvent) -> Option<StateEffect> {
        match event {
            PlayerEvent::Connecting => {
                self.state = ConnectionState::Connecting;
                None
            }
            PlayerEvent::Ready { device_id } => {
                self.device_id = Some(device_id.clone());
                self.state = ConnectionState::Ready;
                None
            }
            PlayerEvent::NotReady => {
                self.device_id = None;
                self.state = ConnectionState::Connecting;
                None
            }
            PlayerEvent::StateChanged(snapshot) => {
                self.state = if snapshot.paused {
                    ConnectionState::Paused
                } else {
                    ConnectionState::Playing
                };
                None
            }
            PlayerEvent::AuthError(_) => {
                self.device_id = None;
                self.state = ConnectionState::Disconnected;
                Some(StateEffect::ClearToken)
            }
            PlayerEvent::AccountError(message) | PlayerEvent::InitError(message) => {
                self.state = ConnectionState::Error(message.clone());
                None
            }
            PlayerEvent::Disconnected => {
                self.device_id = None;
                self.state = ConnectionState::Disconnected;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(paused: bool) -> PlayerEvent {
        PlayerEvent::StateChanged(PlaybackSnapshot {
            track: None,
            paused,
            progress: 0.0,
        })
    }

    #[test]
    fn happy_path_reaches_playing() {
        let mut conn = Connection::new();
        assert_eq!(conn.state(), &ConnectionState::Disconnected);

        conn.apply(&PlayerEvent::Connecting);
        assert_eq!(conn.state(), &ConnectionState::Connecting);

        conn.apply(&PlayerEvent::Ready {
            device_id: "dev-1".into(),
        });
        assert_eq!(conn.state(), &ConnectionState::Ready);
        assert_eq!(conn.device_id(), Some("dev-1"));

        conn.apply(&snapshot(false));
        assert_eq!(conn.state(), &ConnectionState::Playing);

        conn.apply(&snapshot(true));
        assert_eq!(conn.state(), &ConnectionState::Paused);
    }

    #[test]
    fn auth_error_disconnects_and_clears_the_token() {
        let mut conn = Connection::new();
        conn.apply(&PlayerEvent::Ready {
            device_id: "dev-1".into(),
        });

        let effect = conn.apply(&PlayerEvent::AuthError("expired".into()));
        assert_eq!(effect, Some(StateEffect::ClearToken));
        assert_eq!(conn.state(), &ConnectionState::Disconnected);
        assert_eq!(conn.device_id(), None);
    }

    #[test]
    fn account_error_parks_in_error_state() {
        let mut conn = Connection::new();
        conn.apply(&PlayerEvent::Connecting);
        let effect = conn.apply(&PlayerEvent::AccountError("premium".into()));
        assert_eq!(effect, None);
        assert_eq!(conn.state(), &ConnectionState::Error("premium".into()));
        assert!(!conn.is_connected());
    }

    #[test]
    fn device_offline_falls_back_to_connecting() {
        let mut conn = Connection::new();
        conn.apply(&PlayerEvent::Ready {
            device_id: "dev-1".into(),
        });
        conn.apply(&snapshot(false));

        conn.apply(&PlayerEvent::NotReady);
        assert_eq!(conn.state(), &ConnectionState::Connecting);
        assert_eq!(conn.device_id(), None);
    }

    #[test]
    fn reconnect_after_error_is_possible() {
        let mut conn = Connection::new();
        conn.apply(&PlayerEvent::InitError("bad sdk".into()));
        conn.apply(&PlayerEvent::Connecting);
        conn.apply(&PlayerEvent::Ready {
            device_id: "dev-2".into(),
        });
        assert!(conn.is_connected());
    }
}
