/// Login and registration forms
use crate::error::{HolyBeatsError, Result};
use serde::{Deserialize, Serialize};

/// Email/password pair used to sign in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    /// Reject obviously incomplete input before hitting the network
    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() {
            return Err(HolyBeatsError::validation("Email is required"));
        }
        if self.password.is_empty() {
            return Err(HolyBeatsError::validation("Password is required"));
        }
        Ok(())
    }
}

/// Account registration form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl Registration {
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.credentials().validate()?;
        if self.password != self.confirm_password {
            return Err(HolyBeatsError::validation("Passwords do not match"));
        }
        Ok(())
    }

    /// Credentials for the automatic login after registering
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.clone(), self.password.clone())
    }
}
