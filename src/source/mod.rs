//! Player data sources.
//!
//! The leaderboard is computed from a snapshot fetched on demand:
//! - Remote: the hosted data API (default when configured)
//! - Local: the JSONL snapshot written by `sync` or `seed`
//! - Mock: the built-in demo roster

mod remote;

pub use remote::*;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::models::{mock_players, Player};
use crate::storage::{dedup_by_key, read_players, write_players, StorageConfig, StorageError};

/// Errors that can occur while loading players.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Rate limited by {host}, retry after {retry_after_secs}s")]
    RateLimited { host: String, retry_after_secs: u64 },

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Something that can produce the current player snapshot.
#[async_trait]
pub trait PlayerSource: Send + Sync {
    /// Source name for logging.
    fn name(&self) -> &'static str;

    /// Fetch every ranked player.
    async fn fetch_players(&self) -> Result<Vec<Player>, SourceError>;
}

/// Players from the local JSONL snapshot.
pub struct LocalSource {
    storage: StorageConfig,
}

impl LocalSource {
    pub fn new(storage: StorageConfig) -> Self {
        Self { storage }
    }
}

#[async_trait]
impl PlayerSource for LocalSource {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn fetch_players(&self) -> Result<Vec<Player>, SourceError> {
        Ok(read_players(&self.storage)?)
    }
}

/// The built-in demo roster.
#[derive(Default)]
pub struct MockSource;

#[async_trait]
impl PlayerSource for MockSource {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn fetch_players(&self) -> Result<Vec<Player>, SourceError> {
        Ok(mock_players())
    }
}

/// Pick the source for this configuration: the data API when a base URL is
/// set, then the local snapshot if one exists, then the mock roster.
pub fn select_source(
    config: &AppConfig,
    storage: &StorageConfig,
) -> Result<Arc<dyn PlayerSource>, SourceError> {
    if let Some(base_url) = config.data_api.base_url() {
        info!("Using data API at {}", base_url);
        let remote = RemoteSource::new(RemoteSourceConfig::from_app_config(config)?)?;
        return Ok(Arc::new(remote));
    }

    if storage.players_path().exists() {
        info!("Using local snapshot {:?}", storage.players_path());
        return Ok(Arc::new(LocalSource::new(storage.clone())));
    }

    warn!("No data source configured, serving the mock roster");
    Ok(Arc::new(MockSource))
}

/// Pull the snapshot from `source` and store it locally.
/// Returns the number of players written.
pub async fn sync_players(
    source: &dyn PlayerSource,
    storage: &StorageConfig,
) -> Result<usize, SourceError> {
    info!("Syncing players from {} source", source.name());
    let players = source.fetch_players().await?;
    let players: Vec<Player> = players.into_iter().map(Player::normalized).collect();
    let players = dedup_by_key(players, |p| p.player_id().to_string());

    let written = write_players(storage, &players)?;
    info!("Synced {} players", written);
    Ok(written)
}
