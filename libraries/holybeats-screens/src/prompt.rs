//! Login / registration prompt

use crate::session::Session;
use holybeats_core::{Credentials, HolyBeatsError, Registration};

const LOGIN_FAILED: &str = "Invalid email or password";
const REGISTRATION_FAILED: &str = "Registration failed";
const REGISTRATION_ERROR: &str = "Registration error";
const PASSWORD_MISMATCH: &str = "Passwords do not match";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PromptMode {
    #[default]
    Login,
    Register,
}

/// Form state of the login prompt
#[derive(Debug, Clone, Default)]
pub struct LoginPrompt {
    mode: PromptMode,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    error: Option<String>,
}

impl LoginPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn mode(&self) -> PromptMode {
        self.mode
    }

    /// Switch between login and registration; clears the inline error
    pub fn set_mode(&mut self, mode: PromptMode) {
        self.mode = mode;
        self.error = None;
    }

    /// Inline error from the last submission
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submit the form; `true` once the session is signed in
    pub async fn submit(&mut self, session: &Session) -> bool {
        self.error = None;
        let result = match self.mode {
            PromptMode::Login => self.submit_login(session).await,
            PromptMode::Register => self.submit_registration(session).await,
        };

        match result {
            Ok(()) => true,
            Err(message) => {
                tracing::debug!(mode = ?self.mode, error = %message, "Sign-in failed");
                self.error = Some(message);
                false
            }
        }
    }

    async fn submit_login(&self, session: &Session) -> Result<(), String> {
        let credentials = Credentials::new(self.email.trim(), self.password.clone());
        session.login(&credentials).await.map_err(|e| match e {
            HolyBeatsError::Validation(message) => message,
            _ => LOGIN_FAILED.to_string(),
        })
    }

    async fn submit_registration(&self, session: &Session) -> Result<(), String> {
        if self.password != self.confirm_password {
            return Err(PASSWORD_MISMATCH.to_string());
        }

        let registration = Registration::new(
            self.email.trim(),
            self.password.clone(),
            self.confirm_password.clone(),
        );
        session.register(&registration).await.map_err(|e| match e {
            HolyBeatsError::Validation(message) => message,
            HolyBeatsError::AuthFailed(_) => LOGIN_FAILED.to_string(),
            HolyBeatsError::Network(_) => REGISTRATION_ERROR.to_string(),
            _ => REGISTRATION_FAILED.to_string(),
        })
    }
}
