use thiserror::Error;

/// Failures from the provider control surface. Every variant maps to a
/// short status string for the footer; none of them abort the app.
#[derive(Error, Debug)]
pub enum PlayerError {
    #[error("authentication rejected")]
    Auth,

    #[error("premium tier required")]
    Premium,

    #[error("no active playback device")]
    Device,

    #[error("playback command failed with status {0}")]
    Command(u16),

    #[error("malformed provider response: {0}")]
    BadResponse(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl PlayerError {
    pub fn status_code(&self) -> String {
        match self {
            PlayerError::Auth => "AUTH_ERROR".to_string(),
            PlayerError::Premium => "PREMIUM_REQUIRED".to_string(),
            PlayerError::Device => "DEVICE_OFFLINE".to_string(),
            PlayerError::Command(status) => format!("CMD_FAIL_{status}"),
            PlayerError::BadResponse(_) => "BAD_SIGNAL".to_string(),
            PlayerError::Network(_) => "LINK_DOWN".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_are_short_and_fixed() {
        assert_eq!(PlayerError::Auth.status_code(), "AUTH_ERROR");
        assert_eq!(PlayerError::Premium.status_code(), "PREMIUM_REQUIRED");
        assert_eq!(PlayerError::Command(502).status_code(), "CMD_FAIL_502");
    }
}
