//! HolyBeats API Client
//!
//! HTTP client library for the HolyBeats music API.
//!
//! # Features
//!
//! - **Authentication**: Login/registration with email and password, bearer token
//! - **Tracks**: Paginated, filterable track listing
//! - **Favorites**: List, add and remove favorite tracks
//! - **Playlists**: Playlist CRUD and membership edits
//! - **Token persistence**: The credential survives restarts until logout
//!
//! # Example
//!
//! ```ignore
//! use holybeats_client::{ClientConfig, FileTokenStore, HolyBeatsClient};
//! use holybeats_core::{Credentials, TrackQuery};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let store = Arc::new(FileTokenStore::new("/home/me/.config/holybeats/credentials.json"));
//!     let client = HolyBeatsClient::new(ClientConfig::new("https://localhost:7075"), store)?;
//!
//!     let page = client.tracks().await.client().list(&TrackQuery::default()).await?;
//!     println!("{} tracks, more: {}", page.items.len(), page.has_more);
//!
//!     client.login(&Credentials::new("me@example.com", "secret")).await?;
//!     let favorites = client.favorites().await.client().list().await?;
//!     println!("{} favorites", favorites.len());
//!
//!     Ok(())
//! }
//! ```

mod auth;
mod client;
mod error;
mod favorites;
mod playlists;
mod service;
mod token_store;
mod tracks;
mod types;

// Re-export main types
pub use client::{FavoritesClientHandle, HolyBeatsClient, PlaylistClientHandle, TrackClientHandle};
pub use error::{ClientError, Result};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore, TOKEN_KEY};
pub use types::{ClientConfig, LoginRequest, LoginResponse};

// Re-export sub-clients for direct use if needed
pub use auth::AuthClient;
pub use favorites::FavoritesClient;
pub use playlists::PlaylistClient;
pub use tracks::TrackClient;
