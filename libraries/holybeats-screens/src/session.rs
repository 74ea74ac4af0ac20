//! Process-wide authentication context
//!
//! Built once over the [`MusicService`] and handed to every screen. Login and
//! logout publish the new [`AuthState`] on a watch channel so observers do not
//! have to re-derive it from storage.

use holybeats_core::{Credentials, MusicService, Registration, Result};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

/// Whether a credential is held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthState {
    SignedOut,
    SignedIn,
}

impl AuthState {
    pub fn is_signed_in(self) -> bool {
        self == Self::SignedIn
    }
}

/// Shared session handle (cheap to clone)
#[derive(Clone)]
pub struct Session {
    inner: Arc<SessionInner>,
}

struct SessionInner {
    service: Arc<dyn MusicService>,
    state: watch::Sender<AuthState>,
}

impl Session {
    /// Create a session, starting signed in when the service holds a credential
    pub async fn new(service: Arc<dyn MusicService>) -> Self {
        let initial = if service.is_authenticated().await {
            AuthState::SignedIn
        } else {
            AuthState::SignedOut
        };
        tracing::debug!(?initial, "Session created");

        let (state, _) = watch::channel(initial);
        Self {
            inner: Arc::new(SessionInner { service, state }),
        }
    }

    pub fn service(&self) -> &dyn MusicService {
        self.inner.service.as_ref()
    }

    pub fn auth_state(&self) -> AuthState {
        *self.inner.state.borrow()
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth_state().is_signed_in()
    }

    /// Observe login/logout
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.inner.state.subscribe()
    }

    pub async fn login(&self, credentials: &Credentials) -> Result<()> {
        credentials.validate()?;
        self.inner.service.login(credentials).await?;
        tracing::info!(email = %credentials.email, "Signed in");
        self.inner.state.send_replace(AuthState::SignedIn);
        Ok(())
    }

    /// Register, then sign in with the same credentials
    pub async fn register(&self, registration: &Registration) -> Result<()> {
        registration.validate()?;
        self.inner.service.register(registration).await?;
        tracing::info!(email = %registration.email, "Registered and signed in");
        self.inner.state.send_replace(AuthState::SignedIn);
        Ok(())
    }

    pub async fn logout(&self) -> Result<()> {
        let result = self.inner.service.logout().await;
        tracing::info!("Signed out");
        self.inner.state.send_replace(AuthState::SignedOut);
        result
    }

    /// The server rejected the held credential
    pub(crate) fn credential_rejected(&self) {
        if self.is_authenticated() {
            tracing::warn!("Credential rejected by server, signing out");
            self.inner.state.send_replace(AuthState::SignedOut);
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.auth_state())
            .finish_non_exhaustive()
    }
}
