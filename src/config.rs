/// Streaming-provider endpoints and client identity, overridable through the
/// environment so the app can be pointed at a test double.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    pub client_id: String,
    pub accounts_base: String,
    pub api_base: String,
    pub redirect_uri: String,
    pub scopes: String,
}

const DEFAULT_ACCOUNTS_BASE: &str = "https://accounts.spotify.com";
const DEFAULT_API_BASE: &str = "https://api.spotify.com/v1";
const DEFAULT_REDIRECT_URI: &str = "http://127.0.0.1:8888/callback";
const DEFAULT_SCOPES: &str = "user-read-playback-state user-modify-playback-state \
streaming playlist-read-private user-read-currently-playing user-read-private \
user-read-email";

impl ProviderConfig {
    pub fn from_env() -> Self {
        Self {
            client_id: std::env::var("SPINPOD_CLIENT_ID").unwrap_or_default(),
            accounts_base: std::env::var("SPINPOD_ACCOUNTS_BASE")
                .unwrap_or_else(|_| DEFAULT_ACCOUNTS_BASE.to_string()),
            api_base: std::env::var("SPINPOD_API_BASE")
                .unwrap_or_else(|_| DEFAULT_API_BASE.to_string()),
            redirect_uri: std::env::var("SPINPOD_REDIRECT_URI")
                .unwrap_or_else(|_| DEFAULT_REDIRECT_URI.to_string()),
            scopes: DEFAULT_SCOPES.to_string(),
        }
    }

    pub fn authorize_endpoint(&self) -> String {
        format!("{}/authorize", self.accounts_base)
    }

    pub fn token_endpoint(&self) -> String {
        format!("{}/api/token", self.accounts_base)
    }
}
