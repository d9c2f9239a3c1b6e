use serde::{Deserialize, Serialize};

/// One playable signal, as the device displays it. Produced by the provider
/// state poller or by the built-in placeholder program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    pub album_art: String,
    pub duration_ms: u64,
    pub album_title: String,
    pub track_number: u32,
}

impl Track {
    /// The pixel display speaks in uppercase with underscores for spaces.
    pub fn display_name(raw: &str) -> String {
        raw.to_uppercase().replace(' ', "_")
    }
}

/// Placeholder program used while no provider is connected.
pub fn placeholder_tracks() -> Vec<Track> {
    vec![
        Track {
            id: "1".into(),
            title: "NIGHT_DRIVE".into(),
            artist: "SYNTH_WAVE".into(),
            album_art: String::new(),
            duration_ms: 215_000,
            album_title: "NEON_HORIZON".into(),
            track_number: 1,
        },
        Track {
            id: "2".into(),
            title: "VOID_ECHO".into(),
            artist: "AMBIENT_UNIT".into(),
            album_art: String::new(),
            duration_ms: 180_000,
            album_title: "STATIC_SPACE".into(),
            track_number: 2,
        },
        Track {
            id: "3".into(),
            title: "PULSE_WIDTH".into(),
            artist: "LOGIC_GATE".into(),
            album_art: String::new(),
            duration_ms: 240_000,
            album_title: "MODULAR_SOUL".into(),
            track_number: 3,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_name_is_uppercased_and_underscored() {
        assert_eq!(Track::display_name("Night Drive"), "NIGHT_DRIVE");
        assert_eq!(Track::display_name("void echo "), "VOID_ECHO_");
    }

    #[test]
    fn placeholder_program_has_three_signals() {
        let tracks = placeholder_tracks();
        assert_eq!(tracks.len(), 3);
        assert!(tracks.iter().all(|t| t.duration_ms > 0));
    }
}
