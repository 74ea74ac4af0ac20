//! Main HolyBeats API client.

use crate::auth::AuthClient;
use crate::error::{ClientError, Result};
use crate::favorites::FavoritesClient;
use crate::playlists::PlaylistClient;
use crate::token_store::{MemoryTokenStore, TokenStore};
use crate::tracks::TrackClient;
use crate::types::ClientConfig;
use holybeats_core::{Credentials, Registration};
use reqwest::{Client, RequestBuilder};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Attach the bearer token when one is held.
///
/// Requests without a token are still sent; gated endpoints reject them.
pub(crate) fn authorize(request: RequestBuilder, access_token: Option<&str>) -> RequestBuilder {
    match access_token {
        Some(token) => request.bearer_auth(token),
        None => request,
    }
}

/// Main client for the HolyBeats API.
///
/// The client owns the bearer credential: it is read from the token store on
/// construction, written on login/registration and removed on logout.
///
/// # Example
///
/// ```ignore
/// use holybeats_client::{ClientConfig, HolyBeatsClient};
/// use holybeats_core::Credentials;
///
/// let client = HolyBeatsClient::with_memory_store(ClientConfig::new("https://localhost:7075"))?;
/// client.login(&Credentials::new("me@example.com", "secret")).await?;
/// let playlists = client.playlists().await.client().list().await?;
/// ```
pub struct HolyBeatsClient {
    http: Client,
    config: Arc<RwLock<ClientConfig>>,
    store: Arc<dyn TokenStore>,
}

impl HolyBeatsClient {
    /// Create a new client with the given configuration and token store.
    pub fn new(config: ClientConfig, store: Arc<dyn TokenStore>) -> Result<Self> {
        // Validate URL
        if config.url.is_empty() {
            return Err(ClientError::InvalidUrl("URL cannot be empty".into()));
        }

        // Parse and normalize URL
        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        url::Url::parse(&url).map_err(|e| ClientError::InvalidUrl(e.to_string()))?;

        let access_token = match config.access_token {
            Some(token) => Some(token),
            None => store.load()?,
        };

        // Create HTTP client with reasonable defaults
        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("HolyBeats/{}", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(ClientError::Request)?;

        Ok(Self {
            http,
            config: Arc::new(RwLock::new(ClientConfig { url, access_token })),
            store,
        })
    }

    /// Create a client whose credential lives only in memory.
    pub fn with_memory_store(config: ClientConfig) -> Result<Self> {
        Self::new(config, Arc::new(MemoryTokenStore::new()))
    }

    /// Get the API base URL.
    pub async fn url(&self) -> String {
        self.config.read().await.url.clone()
    }

    /// Check if the client holds a bearer token.
    pub async fn is_authenticated(&self) -> bool {
        self.config.read().await.access_token.is_some()
    }

    /// Current bearer token, if any.
    pub async fn access_token(&self) -> Option<String> {
        self.config.read().await.access_token.clone()
    }

    /// Login with email and password.
    ///
    /// On success the token is kept for subsequent requests and persisted.
    pub async fn login(&self, credentials: &Credentials) -> Result<()> {
        let url = self.url().await;

        let auth_client = AuthClient::new(&self.http, &url);
        let response = auth_client.login(credentials).await?;

        self.store.save(&response.access_token)?;
        self.config.write().await.access_token = Some(response.access_token);

        Ok(())
    }

    /// Register a new account, then sign in with it.
    pub async fn register(&self, registration: &Registration) -> Result<()> {
        let url = self.url().await;

        AuthClient::new(&self.http, &url)
            .register(registration)
            .await?;

        self.login(&registration.credentials()).await
    }

    /// Clear the token from memory and durable storage (logout).
    pub async fn logout(&self) -> Result<()> {
        self.config.write().await.access_token = None;
        if let Err(e) = self.store.clear() {
            warn!(error = %e, "Failed to clear stored credential");
            return Err(e);
        }
        info!("Logged out");
        Ok(())
    }

    /// Get a handle for track listing.
    pub async fn tracks(&self) -> TrackClientHandle {
        let (url, access_token) = self.snapshot().await;
        TrackClientHandle {
            http: self.http.clone(),
            url,
            access_token,
        }
    }

    /// Get a handle for favorites operations.
    pub async fn favorites(&self) -> FavoritesClientHandle {
        let (url, access_token) = self.snapshot().await;
        FavoritesClientHandle {
            http: self.http.clone(),
            url,
            access_token,
        }
    }

    /// Get a handle for playlist operations.
    pub async fn playlists(&self) -> PlaylistClientHandle {
        let (url, access_token) = self.snapshot().await;
        PlaylistClientHandle {
            http: self.http.clone(),
            url,
            access_token,
        }
    }

    async fn snapshot(&self) -> (String, Option<String>) {
        let config = self.config.read().await;
        (config.url.clone(), config.access_token.clone())
    }
}

/// Handle for track listing.
///
/// Captures the URL and token at creation so the config lock is not held
/// across requests.
pub struct TrackClientHandle {
    http: Client,
    url: String,
    access_token: Option<String>,
}

impl TrackClientHandle {
    /// Get the track client.
    pub fn client(&self) -> TrackClient<'_> {
        TrackClient::new(&self.http, &self.url, self.access_token.as_deref())
    }
}

/// Handle for favorites operations.
pub struct FavoritesClientHandle {
    http: Client,
    url: String,
    access_token: Option<String>,
}

impl FavoritesClientHandle {
    /// Get the favorites client.
    pub fn client(&self) -> FavoritesClient<'_> {
        FavoritesClient::new(&self.http, &self.url, self.access_token.as_deref())
    }
}

/// Handle for playlist operations.
pub struct PlaylistClientHandle {
    http: Client,
    url: String,
    access_token: Option<String>,
}

impl PlaylistClientHandle {
    /// Get the playlist client.
    pub fn client(&self) -> PlaylistClient<'_> {
        PlaylistClient::new(&self.http, &self.url, self.access_token.as_deref())
    }
}
