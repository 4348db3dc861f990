//! Client for the hosted player data API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, USER_AGENT};
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

use super::{PlayerSource, SourceError};
use crate::config::AppConfig;
use crate::models::Player;
use crate::storage::dedup_by_key;

/// Configuration for the data API client.
#[derive(Debug, Clone)]
pub struct RemoteSourceConfig {
    /// API root, e.g. `https://api.example.com/v1/`
    pub base_url: Url,

    /// Bearer token, if the API needs one
    pub api_key: Option<String>,

    /// Request timeout
    pub timeout: Duration,

    /// User agent string
    pub user_agent: String,
}

impl RemoteSourceConfig {
    pub fn new(base_url: &str) -> Result<Self, SourceError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            api_key: None,
            timeout: Duration::from_secs(15),
            user_agent: format!("tierlist/{}", env!("CARGO_PKG_VERSION")),
        })
    }

    pub fn from_app_config(config: &AppConfig) -> Result<Self, SourceError> {
        let base_url = config
            .data_api
            .base_url()
            .ok_or_else(|| SourceError::InvalidUrl("no data API URL configured".to_string()))?;

        let mut remote = Self::new(base_url)?;
        remote.api_key = config.data_api.api_key();
        remote.timeout = Duration::from_secs(config.data_api.timeout_seconds);
        Ok(remote)
    }
}

/// Parse the API root, making sure relative joins stay under its path.
fn parse_base_url(raw: &str) -> Result<Url, SourceError> {
    let mut url = Url::parse(raw.trim()).map_err(|e| SourceError::InvalidUrl(e.to_string()))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

/// The API answers either with a bare array or with the array wrapped
/// in an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum PlayersPayload {
    List(Vec<Player>),
    Players { players: Vec<Player> },
    Data { data: Vec<Player> },
}

impl PlayersPayload {
    fn into_players(self) -> Vec<Player> {
        match self {
            PlayersPayload::List(players)
            | PlayersPayload::Players { players }
            | PlayersPayload::Data { data: players } => players,
        }
    }
}

/// Players from the data API.
pub struct RemoteSource {
    client: Client,
    config: RemoteSourceConfig,
}

impl RemoteSource {
    pub fn new(config: RemoteSourceConfig) -> Result<Self, SourceError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent)
                .unwrap_or_else(|_| HeaderValue::from_static("tierlist")),
        );
        if let Some(ref key) = config.api_key {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", key))
                .map_err(|_| SourceError::InvalidUrl("API key is not a valid header".to_string()))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .default_headers(headers)
            .build()?;

        Ok(Self { client, config })
    }

    /// Endpoint listing all players.
    pub fn players_url(&self) -> Result<Url, SourceError> {
        self.config
            .base_url
            .join("players")
            .map_err(|e| SourceError::InvalidUrl(e.to_string()))
    }
}

#[async_trait]
impl PlayerSource for RemoteSource {
    fn name(&self) -> &'static str {
        "remote"
    }

    async fn fetch_players(&self) -> Result<Vec<Player>, SourceError> {
        let url = self.players_url()?;
        debug!("Fetching {}", url);

        let response = self.client.get(url.as_str()).send().await?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);

            return Err(SourceError::RateLimited {
                host: url.host_str().unwrap_or("unknown").to_string(),
                retry_after_secs: retry_after,
            });
        }

        if !status.is_success() {
            return Err(SourceError::HttpStatus {
                status: status.as_u16(),
                message: status.canonical_reason().unwrap_or("Unknown").to_string(),
            });
        }

        let payload: PlayersPayload = response.json().await?;
        let players: Vec<Player> = payload
            .into_players()
            .into_iter()
            .map(Player::normalized)
            .collect();
        let players = dedup_by_key(players, |p| p.player_id().to_string());

        info!("Fetched {} players from {}", players.len(), url);
        Ok(players)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::Router;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}/api", addr)
    }

    fn remote(base_url: &str) -> RemoteSource {
        RemoteSource::new(RemoteSourceConfig::new(base_url).unwrap()).unwrap()
    }

    #[test]
    fn test_players_url_keeps_base_path() {
        let source = remote("https://api.example.com/v1");
        assert_eq!(
            source.players_url().unwrap().as_str(),
            "https://api.example.com/v1/players"
        );

        let source = remote("https://api.example.com/v1/");
        assert_eq!(
            source.players_url().unwrap().as_str(),
            "https://api.example.com/v1/players"
        );
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(
            RemoteSourceConfig::new("::nope::"),
            Err(SourceError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_payload_shapes() {
        let bare: PlayersPayload =
            serde_json::from_str(r#"[{"username":"a","points":1}]"#).unwrap();
        let wrapped: PlayersPayload =
            serde_json::from_str(r#"{"players":[{"username":"b","points":2}]}"#).unwrap();
        let data: PlayersPayload =
            serde_json::from_str(r#"{"data":[{"username":"c","points":3}]}"#).unwrap();

        assert_eq!(bare.into_players()[0].username, "a");
        assert_eq!(wrapped.into_players()[0].username, "b");
        assert_eq!(data.into_players()[0].username, "c");
    }

    #[tokio::test]
    async fn test_fetch_players_from_api() {
        let app = Router::new().route(
            "/api/players",
            get(|| async {
                axum::Json(serde_json::json!([
                    {"username": "Swight", "points": 355, "region": "EU",
                     "tiers": [{"gamemode": "axe", "tier": "HT1"}]},
                    {"id": "fixed", "username": "Kylaz", "points": 262, "region": "NA"}
                ]))
            }),
        );
        let base = serve(app).await;

        let players = remote(&base).fetch_players().await.unwrap();

        assert_eq!(players.len(), 2);
        assert!(players[0].id.is_some());
        assert_eq!(players[1].player_id().as_str(), "fixed");
    }

    #[tokio::test]
    async fn test_fetch_players_http_error() {
        let app = Router::new().route(
            "/api/players",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
        );
        let base = serve(app).await;

        let err = remote(&base).fetch_players().await.unwrap_err();
        assert!(matches!(err, SourceError::HttpStatus { status: 500, .. }));
    }

    #[tokio::test]
    async fn test_fetch_players_rate_limited() {
        let app = Router::new().route(
            "/api/players",
            get(|| async { (StatusCode::TOO_MANY_REQUESTS, [("retry-after", "7")]) }),
        );
        let base = serve(app).await;

        let err = remote(&base).fetch_players().await.unwrap_err();
        assert!(matches!(
            err,
            SourceError::RateLimited {
                retry_after_secs: 7,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_fetch_players_drops_repeated_players() {
        let app = Router::new().route(
            "/api/players",
            get(|| async {
                axum::Json(serde_json::json!({"players": [
                    {"username": "Swight", "points": 300, "region": "EU"},
                    {"username": "Kylaz", "points": 262, "region": "NA"},
                    {"username": "swight", "points": 355, "region": "EU"}
                ]}))
            }),
        );
        let base = serve(app).await;

        let players = remote(&base).fetch_players().await.unwrap();

        assert_eq!(players.len(), 2);
        assert_eq!(players[0].username, "swight");
        assert_eq!(players[0].points, 355);
        assert_eq!(players[1].username, "Kylaz");
    }
}
