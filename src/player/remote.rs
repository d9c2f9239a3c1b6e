use reqwest::StatusCode;
use serde::Deserialize;
use tracing::debug;

use super::error::PlayerError;
use super::state::PlaybackSnapshot;
use super::track::Track;

/// Control surface over the provider's Web API. Commands are fire-and-check:
/// a non-2xx response becomes a typed error, never a panic.
pub struct RemotePlayer {
    client: reqwest::Client,
    api_base: String,
    token: String,
}

#[derive(Debug, Deserialize)]
struct PlayerStateBody {
    device: Option<DeviceBody>,
    #[serde(default)]
    is_playing: bool,
    progress_ms: Option<u64>,
    item: Option<ItemBody>,
}

#[derive(Debug, Deserialize)]
struct DeviceBody {
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ItemBody {
    id: Option<String>,
    name: String,
    duration_ms: u64,
    #[serde(default)]
    track_number: u32,
    #[serde(default)]
    artists: Vec<ArtistBody>,
    album: Option<AlbumBody>,
}

#[derive(Debug, Deserialize)]
struct ArtistBody {
    name: String,
}

#[derive(Debug, Deserialize)]
struct AlbumBody {
    name: String,
    #[serde(default)]
    images: Vec<ImageBody>,
}

#[derive(Debug, Deserialize)]
struct ImageBody {
    url: String,
}

/// The poller's view of the provider: the reporting device plus a snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteState {
    pub device_id: Option<String>,
    pub snapshot: PlaybackSnapshot,
}

impl RemotePlayer {
    pub fn new(api_base: String, token: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_base,
            token,
        }
    }

    /// Current player state, or `None` when no device is active (204).
    pub async fn player_state(&self) -> Result<Option<RemoteState>, PlayerError> {
        let response = self
            .client
            .get(format!("{}/me/player", self.api_base))
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        check_status(status)?;

        let body: PlayerStateBody = response
            .json()
            .await
            .map_err(|e| PlayerError::BadResponse(e.to_string()))?;

        Ok(Some(body.into()))
    }

    pub async fn pause(&self) -> Result<(), PlayerError> {
        self.command(reqwest::Method::PUT, "me/player/pause", &[])
            .await
    }

    pub async fn resume(&self) -> Result<(), PlayerError> {
        self.command(reqwest::Method::PUT, "me/player/play", &[])
            .await
    }

    pub async fn next(&self) -> Result<(), PlayerError> {
        self.command(reqwest::Method::POST, "me/player/next", &[])
            .await
    }

    pub async fn seek_ms(&self, position_ms: u64) -> Result<(), PlayerError> {
        self.command(
            reqwest::Method::PUT,
            "me/player/seek",
            &[("position_ms", position_ms.to_string())],
        )
        .await
    }

    pub async fn set_volume(&self, percent: u8) -> Result<(), PlayerError> {
        self.command(
            reqwest::Method::PUT,
            "me/player/volume",
            &[("volume_percent", percent.min(100).to_string())],
        )
        .await
    }

    pub async fn set_shuffle(&self, enabled: bool) -> Result<(), PlayerError> {
        self.command(
            reqwest::Method::PUT,
            "me/player/shuffle",
            &[("state", enabled.to_string())],
        )
        .await
    }

    /// Starts playback of a playlist from a pasted share URL.
    pub async fn play_playlist(&self, url: &str) -> Result<(), PlayerError> {
        let context_uri = playlist_uri(url)
            .ok_or_else(|| PlayerError::BadResponse("unrecognized playlist URL".into()))?;

        let response = self
            .client
            .put(format!("{}/me/player/play", self.api_base))
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "context_uri": context_uri }))
            .send()
            .await?;
        check_status(response.status())
    }

    async fn command(
        &self,
        method: reqwest::Method,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<(), PlayerError> {
        debug!("player command {path}");
        let response = self
            .client
            .request(method, format!("{}/{}", self.api_base, path))
            .bearer_auth(&self.token)
            .query(query)
            .send()
            .await?;
        check_status(response.status())
    }
}

fn check_status(status: StatusCode) -> Result<(), PlayerError> {
    match status {
        StatusCode::UNAUTHORIZED => Err(PlayerError::Auth),
        StatusCode::FORBIDDEN => Err(PlayerError::Premium),
        StatusCode::NOT_FOUND => Err(PlayerError::Device),
        s if s.is_success() => Ok(()),
        s => Err(PlayerError::Command(s.as_u16())),
    }
}

/// `https://open.../playlist/<id>?...` → `spotify:playlist:<id>`; an already
/// well-formed URI passes through.
pub fn playlist_uri(input: &str) -> Option<String> {
    let input = input.trim();
    if input.starts_with("spotify:playlist:") {
        return Some(input.to_string());
    }
    let marker = "/playlist/";
    let start = input.find(marker)? + marker.len();
    let id: String = input[start..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    if id.is_empty() {
        None
    } else {
        Some(format!("spotify:playlist:{id}"))
    }
}

impl From<PlayerStateBody> for RemoteState {
    fn from(body: PlayerStateBody) -> Self {
        let track = body.item.map(|item| {
            let artist = item
                .artists
                .first()
                .map(|a| Track::display_name(&a.name))
                .unwrap_or_default();
            let (album_title, album_art) = item
                .album
                .map(|album| {
                    let art = album.images.first().map(|i| i.url.clone()).unwrap_or_default();
                    (album.name, art)
                })
                .unwrap_or_default();

            Track {
                id: item.id.unwrap_or_default(),
                title: Track::display_name(&item.name),
                artist,
                album_art,
                duration_ms: item.duration_ms,
                album_title,
                track_number: item.track_number.max(1),
            }
        });

        let duration = track.as_ref().map(|t| t.duration_ms).unwrap_or(0);
        let progress = match (body.progress_ms, duration) {
            (Some(ms), total) if total > 0 => (ms as f64 / total as f64).clamp(0.0, 1.0),
            _ => 0.0,
        };

        RemoteState {
            device_id: body.device.and_then(|d| d.id),
            snapshot: PlaybackSnapshot {
                track,
                paused: !body.is_playing,
                progress,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn playlist_uri_parses_share_links() {
        assert_eq!(
            playlist_uri("https://open.spotify.com/playlist/37i9dQZF1DXcBWIGoYBM5M?si=x").as_deref(),
            Some("spotify:playlist:37i9dQZF1DXcBWIGoYBM5M")
        );
        assert_eq!(
            playlist_uri("spotify:playlist:abc123").as_deref(),
            Some("spotify:playlist:abc123")
        );
        assert_eq!(playlist_uri("https://example.com/nothing"), None);
        assert_eq!(playlist_uri("https://open.spotify.com/playlist/"), None);
    }

    #[test]
    fn state_body_maps_to_normalized_snapshot() {
        let body: PlayerStateBody = serde_json::from_str(
            r#"{
                "device": { "id": "dev-9" },
                "is_playing": true,
                "progress_ms": 90000,
                "item": {
                    "id": "t1",
                    "name": "Night Drive",
                    "duration_ms": 180000,
                    "track_number": 4,
                    "artists": [{ "name": "Synth Wave" }],
                    "album": { "name": "NEON_HORIZON", "images": [{ "url": "http://art" }] }
                }
            }"#,
        )
        .unwrap();

        let state = RemoteState::from(body);
        assert_eq!(state.device_id.as_deref(), Some("dev-9"));
        assert!(!state.snapshot.paused);
        assert!((state.snapshot.progress - 0.5).abs() < 1e-9);

        let track = state.snapshot.track.unwrap();
        assert_eq!(track.title, "NIGHT_DRIVE");
        assert_eq!(track.artist, "SYNTH_WAVE");
        assert_eq!(track.album_art, "http://art");
        assert_eq!(track.track_number, 4);
    }

    #[test]
    fn missing_fields_degrade_instead_of_failing() {
        let body: PlayerStateBody =
            serde_json::from_str(r#"{ "is_playing": false }"#).unwrap();
        let state = RemoteState::from(body);
        assert_eq!(state.device_id, None);
        assert_eq!(state.snapshot.track, None);
        assert_eq!(state.snapshot.progress, 0.0);
        assert!(state.snapshot.paused);
    }

    #[test]
    fn status_mapping_follows_the_error_taxonomy() {
        assert!(matches!(
            check_status(StatusCode::UNAUTHORIZED),
            Err(PlayerError::Auth)
        ));
        assert!(matches!(
            check_status(StatusCode::FORBIDDEN),
            Err(PlayerError::Premium)
        ));
        assert!(matches!(
            check_status(StatusCode::NOT_FOUND),
            Err(PlayerError::Device)
        ));
        assert!(matches!(
            check_status(StatusCode::BAD_GATEWAY),
            Err(PlayerError::Command(502))
        ));
        assert!(check_status(StatusCode::OK).is_ok());
    }
}
