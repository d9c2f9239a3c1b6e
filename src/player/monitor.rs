use std::sync::Arc;
use std::time::Duration;

use flume::Sender;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::event::events::Event;

use super::error::PlayerError;
use super::remote::RemotePlayer;
use super::state::PlayerEvent;

/// Polls the provider player state once per second and translates the
/// responses into `PlayerEvent`s. The owner keeps the handle under a fixed
/// task key, so swapping the access token replaces the poller instead of
/// stacking a second one.
pub fn spawn(remote: Arc<RemotePlayer>, event_tx: Sender<Event>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let _ = event_tx.send(Event::Player(PlayerEvent::Connecting));
        let mut known_device: Option<String> = None;
        let mut interval = tokio::time::interval(Duration::from_secs(1));

        loop {
            interval.tick().await;

            match remote.player_state().await {
                Ok(Some(state)) => {
                    if let Some(device_id) = &state.device_id
                        && known_device.as_deref() != Some(device_id)
                    {
                        known_device = Some(device_id.clone());
                        let _ = event_tx.send(Event::Player(PlayerEvent::Ready {
                            device_id: device_id.clone(),
                        }));
                    }
                    let _ = event_tx
                        .send(Event::Player(PlayerEvent::StateChanged(state.snapshot)));
                }
                Ok(None) => {
                    if known_device.take().is_some() {
                        let _ = event_tx.send(Event::Player(PlayerEvent::NotReady));
                    }
                }
                Err(PlayerError::Auth) => {
                    let _ = event_tx.send(Event::Player(PlayerEvent::AuthError(
                        "token rejected".into(),
                    )));
                    // The owner clears the token and tears this poller down.
                    break;
                }
                Err(PlayerError::Premium) => {
                    let _ = event_tx.send(Event::Player(PlayerEvent::AccountError(
                        "premium tier required".into(),
                    )));
                    break;
                }
                Err(e) => {
                    debug!("player state poll failed: {e}");
                    let _ = event_tx.send(Event::Status(e.status_code()));
                }
            }
        }
    })
}
