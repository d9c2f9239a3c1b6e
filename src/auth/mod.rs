pub mod pkce;

use std::path::PathBuf;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::config::ProviderConfig;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("no pending authorization (verifier missing)")]
    MissingVerifier,

    #[error("token endpoint rejected the exchange: {0}")]
    Rejected(u16),

    #[error("malformed token response: {0}")]
    BadResponse(String),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("credential storage error: {0}")]
    Storage(#[from] std::io::Error),
}

/// Persisted credential state: the access token once obtained, and the
/// PKCE verifier while an authorization round-trip is in flight.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Credentials {
    pub access_token: Option<String>,
    pub verifier: Option<String>,
}

pub trait TokenStore: Send {
    fn load(&self) -> std::io::Result<Credentials>;
    fn save(&mut self, creds: &Credentials) -> std::io::Result<()>;
}

pub struct JsonTokenStore {
    path: PathBuf,
}

impl JsonTokenStore {
    pub fn open_default() -> color_eyre::Result<Self> {
        Ok(Self {
            path: crate::util::paths::data_dir()?.join("auth.json"),
        })
    }

    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

impl TokenStore for JsonTokenStore {
    fn load(&self) -> std::io::Result<Credentials> {
        if !self.path.exists() {
            return Ok(Credentials::default());
        }
        let data = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&data).unwrap_or_default())
    }

    fn save(&mut self, creds: &Credentials) -> std::io::Result<()> {
        let data = serde_json::to_string(creds)?;
        std::fs::write(&self.path, data)
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

/// PKCE handshake against the provider's identity endpoints. Every failure
/// leaves the service in the unauthenticated state; callers surface the
/// error as a status string.
pub struct AuthService {
    client: reqwest::Client,
    config: ProviderConfig,
    store: Box<dyn TokenStore>,
    creds: Credentials,
}

impl AuthService {
    pub fn new(config: ProviderConfig, store: Box<dyn TokenStore>) -> Self {
        let creds = store.load().unwrap_or_else(|e| {
            warn!("failed to read stored credentials: {e}");
            Credentials::default()
        });

        Self {
            client: reqwest::Client::new(),
            config,
            store,
            creds,
        }
    }

    pub fn access_token(&self) -> Option<&str> {
        self.creds.access_token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.creds.access_token.is_some()
    }

    /// Starts a PKCE round-trip: generates and persists a fresh verifier
    /// and returns the authorization URL the user has to open.
    pub fn authorize_url(&mut self) -> Result<String, AuthError> {
        let verifier = pkce::generate_verifier();
        let challenge = pkce::code_challenge(&verifier);

        self.creds.verifier = Some(verifier);
        self.store.save(&self.creds)?;

        let url = Url::parse_with_params(
            &self.config.authorize_endpoint(),
            &[
                ("response_type", "code"),
                ("client_id", self.config.client_id.as_str()),
                ("scope", self.config.scopes.as_str()),
                ("code_challenge_method", "S256"),
                ("code_challenge", challenge.as_str()),
                ("redirect_uri", self.config.redirect_uri.as_str()),
            ],
        )
        .map_err(|e| AuthError::BadResponse(e.to_string()))?;

        Ok(url.to_string())
    }

    /// Pulls the `code` query parameter out of a pasted redirect URL, or
    /// accepts a bare code.
    pub fn extract_code(input: &str) -> Option<String> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        if let Ok(url) = Url::parse(input) {
            return url
                .query_pairs()
                .find(|(k, _)| k == "code")
                .map(|(_, v)| v.into_owned());
        }
        if input.contains(char::is_whitespace) {
            return None;
        }
        Some(input.to_string())
    }

    /// Exchanges the authorization code for an access token using the
    /// stored verifier, and persists the result.
    pub async fn exchange_code(&mut self, code: &str) -> Result<String, AuthError> {
        let verifier = self
            .creds
            .verifier
            .clone()
            .ok_or(AuthError::MissingVerifier)?;

        let response = self
            .client
            .post(self.config.token_endpoint())
            .form(&[
                ("client_id", self.config.client_id.as_str()),
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("code_verifier", verifier.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::Rejected(status.as_u16()));
        }

        let body: TokenResponse = response
            .json()
            .await
            .map_err(|e| AuthError::BadResponse(e.to_string()))?;
        let token = body
            .access_token
            .ok_or_else(|| AuthError::BadResponse("access_token missing".into()))?;

        self.creds.access_token = Some(token.clone());
        self.creds.verifier = None;
        self.store.save(&self.creds)?;
        info!("access token obtained");

        Ok(token)
    }

    /// Auth errors from the player invalidate the stored token so the next
    /// attempt starts clean.
    pub fn clear_token(&mut self) {
        self.creds.access_token = None;
        if let Err(e) = self.store.save(&self.creds) {
            warn!("failed to clear stored token: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Default, Clone)]
    struct MemoryTokenStore {
        creds: Arc<Mutex<Credentials>>,
    }

    impl TokenStore for MemoryTokenStore {
        fn load(&self) -> std::io::Result<Credentials> {
            Ok(self.creds.lock().unwrap().clone())
        }

        fn save(&mut self, creds: &Credentials) -> std::io::Result<()> {
            *self.creds.lock().unwrap() = creds.clone();
            Ok(())
        }
    }

    fn service(store: MemoryTokenStore) -> AuthService {
        let mut config = ProviderConfig::from_env();
        config.client_id = "0070c4647977442595714935909b3d19".to_string();
        AuthService::new(config, Box::new(store))
    }

    #[test]
    fn authorize_url_carries_challenge_and_persists_verifier() {
        let store = MemoryTokenStore::default();
        let mut auth = service(store.clone());
        let url = auth.authorize_url().unwrap();

        let parsed = Url::parse(&url).unwrap();
        let params: std::collections::HashMap<_, _> = parsed.query_pairs().collect();
        assert_eq!(params["response_type"], "code");
        assert_eq!(params["code_challenge_method"], "S256");

        let stored = store.load().unwrap();
        let verifier = stored.verifier.expect("verifier persisted");
        assert_eq!(
            params["code_challenge"],
            pkce::code_challenge(&verifier)
        );
    }

    #[test]
    fn extract_code_reads_the_query_parameter() {
        let code = AuthService::extract_code(
            "http://127.0.0.1:8888/callback?code=AQDtn3Vw&state=x",
        );
        assert_eq!(code.as_deref(), Some("AQDtn3Vw"));
    }

    #[test]
    fn extract_code_accepts_a_bare_code() {
        assert_eq!(
            AuthService::extract_code("  AQDtn3Vw ").as_deref(),
            Some("AQDtn3Vw")
        );
        assert_eq!(AuthService::extract_code(""), None);
        assert_eq!(AuthService::extract_code("not a code"), None);
    }

    #[test]
    fn extract_code_without_query_is_none() {
        assert_eq!(
            AuthService::extract_code("http://127.0.0.1:8888/callback"),
            None
        );
    }

    #[tokio::test]
    async fn exchange_without_verifier_fails_cleanly() {
        let mut auth = service(MemoryTokenStore::default());
        let err = auth.exchange_code("AQDtn3Vw").await.unwrap_err();
        assert!(matches!(err, AuthError::MissingVerifier));
        assert!(!auth.is_authenticated());
    }

    #[test]
    fn clear_token_resets_to_unauthenticated() {
        let store = MemoryTokenStore::default();
        store.creds.lock().unwrap().access_token = Some("tok".into());
        let mut auth = service(store.clone());
        assert!(auth.is_authenticated());

        auth.clear_token();
        assert!(!auth.is_authenticated());
        assert!(store.load().unwrap().access_token.is_none());
    }
}
