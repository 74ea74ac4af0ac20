//! Authentication methods for the HolyBeats API.

use crate::error::{ClientError, Result};
use crate::types::{LoginRequest, LoginResponse};
use holybeats_core::{Credentials, Registration};
use reqwest::Client;
use tracing::{debug, info, warn};

/// Authentication client for the HolyBeats API.
pub struct AuthClient<'a> {
    http: &'a Client,
    base_url: &'a str,
}

impl<'a> AuthClient<'a> {
    pub(crate) fn new(http: &'a Client, base_url: &'a str) -> Self {
        Self { http, base_url }
    }

    /// Login with email and password.
    ///
    /// Returns the bearer token on success.
    pub async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let url = format!("{}/api/auth/login", self.base_url);
        debug!(url = %url, email = %credentials.email, "Attempting login");

        let request = LoginRequest {
            email: credentials.email.clone(),
            password: credentials.password.clone(),
        };

        let response = self
            .http
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        let status = response.status();

        if status.is_success() {
            let login_response: LoginResponse = response.json().await.map_err(|e| {
                ClientError::ParseError(format!("Failed to parse login response: {}", e))
            })?;

            info!(email = %credentials.email, "Login successful");
            Ok(login_response)
        } else if status.as_u16() == 400 || status.as_u16() == 401 {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %error_text, "Login failed: invalid credentials");
            Err(ClientError::AuthFailed(
                "Invalid email or password".to_string(),
            ))
        } else {
            Err(ClientError::from_response(response).await)
        }
    }

    /// Create an account. Does not sign in.
    pub async fn register(&self, registration: &Registration) -> Result<()> {
        let url = format!("{}/api/auth/register", self.base_url);
        debug!(url = %url, email = %registration.email, "Registering account");

        let response = self
            .http
            .post(&url)
            .json(registration)
            .send()
            .await
            .map_err(ClientError::from_send)?;

        if response.status().is_success() {
            info!(email = %registration.email, "Registration successful");
            Ok(())
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.unwrap_or_default();
            warn!(status, error = %message, "Registration failed");
            Err(ClientError::ServerError { status, message })
        }
    }
}
