/// CLI configuration
use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG_FILE: &str = "holybeats.toml";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default = "default_api")]
    pub api: ApiSettings,

    #[serde(default = "default_storage")]
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiSettings {
    #[serde(default = "default_url")]
    pub url: String,

    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StorageSettings {
    /// File holding the bearer credential
    #[serde(default = "default_token_path")]
    pub token_path: PathBuf,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// `path` overrides the default `holybeats.toml` in the working
    /// directory and must exist when given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        // Override with environment variables, e.g. HOLYBEATS_API__PAGE_SIZE
        settings = settings.add_source(
            config::Environment::with_prefix("HOLYBEATS")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        let config = settings.build().context("Failed to read configuration")?;
        config
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.api.url.trim().is_empty() {
            bail!("API URL is required (set HOLYBEATS_API__URL)");
        }
        if self.api.page_size == 0 {
            bail!("Page size must be at least 1");
        }
        Ok(())
    }
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            api: default_api(),
            storage: default_storage(),
        }
    }
}

// Default values
fn default_api() -> ApiSettings {
    ApiSettings {
        url: default_url(),
        page_size: default_page_size(),
    }
}

fn default_url() -> String {
    "https://localhost:7075".to_string()
}

fn default_page_size() -> u32 {
    holybeats_core::DEFAULT_PAGE_SIZE
}

fn default_storage() -> StorageSettings {
    StorageSettings {
        token_path: default_token_path(),
    }
}

fn default_token_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("holybeats")
        .join("credentials.json")
}
