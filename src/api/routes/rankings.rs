use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;
use crate::api::{load_players, ApiError, ApiQuery, Pagination, PaginationMeta};
use crate::models::{ModeFilter, Player, TierCode, GAMEMODES};
use crate::ranking::{best_tier_for, BucketOrder, LeaderboardQuery, LeaderboardView};

#[derive(Debug, Deserialize)]
pub struct RankingsParams {
    pub mode: Option<String>,
    pub search: Option<String>,
    pub region: Option<String>,
    pub sort: Option<String>,
    pub page: Option<u32>,
    pub page_size: Option<u32>,
}

impl RankingsParams {
    fn to_query(&self) -> Result<LeaderboardQuery, ApiError> {
        let bucket_order = self
            .sort
            .as_deref()
            .unwrap_or("")
            .parse::<BucketOrder>()
            .map_err(ApiError::BadRequest)?;

        Ok(LeaderboardQuery {
            mode: ModeFilter::parse(self.mode.as_deref().unwrap_or("")),
            search: self.search.clone(),
            region: self.region.clone(),
            bucket_order,
        })
    }
}

/// A tier badge shown next to a player.
#[derive(Debug, Serialize)]
pub struct TierBadge {
    pub gamemode: &'static str,
    pub tier: String,
    pub level: u8,
}

/// A player as shown in a leaderboard row.
#[derive(Debug, Serialize)]
pub struct PlayerRow {
    pub id: String,
    pub username: String,
    pub points: u32,
    pub region: String,
    pub tiers: Vec<TierBadge>,
}

impl PlayerRow {
    /// Row with the player's best tier in each catalog gamemode, in
    /// catalog order.
    pub fn from_player(player: &Player) -> Self {
        let tiers = GAMEMODES
            .iter()
            .filter_map(|g| {
                best_tier_for(player, g.code).map(|tier| TierBadge {
                    gamemode: g.code,
                    tier: tier.to_string(),
                    level: tier.ordinal(),
                })
            })
            .collect();

        Self {
            id: player.player_id().to_string(),
            username: player.username.clone(),
            points: player.points,
            region: player.region.clone(),
            tiers,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct RankedRow {
    pub rank: u32,
    #[serde(flatten)]
    pub player: PlayerRow,
}

#[derive(Debug, Serialize)]
pub struct TierBucket {
    pub level: u8,
    pub tier: String,
    pub players: Vec<PlayerRow>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum RankingsResponse {
    Overall {
        players: Vec<RankedRow>,
        pagination: PaginationMeta,
    },
    Tiers {
        gamemode: String,
        total_players: u32,
        buckets: Vec<TierBucket>,
    },
}

pub async fn rankings(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<RankingsParams>,
) -> Result<Json<RankingsResponse>, ApiError> {
    let query = params.to_query()?;
    let players = load_players(&state).await?;

    let response = match query.apply(&players) {
        LeaderboardView::Overall(ranked) => {
            let pagination = Pagination::new(params.page, params.page_size);
            let meta = PaginationMeta::new(&pagination, ranked.len() as u32);
            let rows = pagination
                .slice(&ranked)
                .iter()
                .map(|r| RankedRow {
                    rank: r.rank,
                    player: PlayerRow::from_player(r.player),
                })
                .collect();

            RankingsResponse::Overall {
                players: rows,
                pagination: meta,
            }
        }
        LeaderboardView::Tiers { gamemode, buckets } => {
            let total_players = buckets.total() as u32;
            let buckets = buckets
                .iter()
                .map(|(level, players)| TierBucket {
                    level,
                    tier: TierCode::from_ordinal(level)
                        .map(|t| t.to_string())
                        .unwrap_or_default(),
                    players: players.iter().map(|p| PlayerRow::from_player(p)).collect(),
                })
                .collect();

            RankingsResponse::Tiers {
                gamemode,
                total_players,
                buckets,
            }
        }
    };

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use crate::api::build_router;
    use crate::api::test_support::{get_json, mock_state, state_with};
    use crate::models::{Player, TierCode};
    use axum::http::StatusCode;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    fn usernames(rows: &Value) -> Vec<String> {
        rows.as_array()
            .unwrap()
            .iter()
            .map(|r| r["username"].as_str().unwrap().to_string())
            .collect()
    }

    fn roster() -> Vec<Player> {
        vec![
            Player::new("Alpha", 100, "NA").with_tier("sword", TierCode::Ht1),
            Player::new("Bravo", 250, "EU")
                .with_tier("sword", TierCode::Ht2)
                .with_tier("axe", TierCode::Lt3),
            Player::new("Charlie", 250, "NA").with_tier("axe", TierCode::Ht1),
        ]
    }

    #[tokio::test]
    async fn test_overall_rankings() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(state_with(tmp.path(), roster()));

        let (status, json) = get_json(app, "/api/rankings").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["view"], "overall");
        assert_eq!(
            usernames(&json["players"]),
            vec!["Bravo", "Charlie", "Alpha"]
        );
        assert_eq!(json["players"][0]["rank"], 1);
        assert_eq!(json["players"][2]["rank"], 3);
        assert_eq!(json["pagination"]["total_items"], 3);
    }

    #[tokio::test]
    async fn test_overall_row_badges_follow_catalog_order() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(state_with(tmp.path(), roster()));

        let (_, json) = get_json(app, "/api/rankings?search=bravo").await;

        let badges = &json["players"][0]["tiers"];
        assert_eq!(badges[0]["gamemode"], "sword");
        assert_eq!(badges[0]["tier"], "HT2");
        assert_eq!(badges[1]["gamemode"], "axe");
        assert_eq!(badges[1]["level"], 8);
    }

    #[tokio::test]
    async fn test_gamemode_rankings_has_ten_buckets() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(state_with(tmp.path(), roster()));

        let (status, json) = get_json(app, "/api/rankings?mode=sword").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["view"], "tiers");
        assert_eq!(json["gamemode"], "sword");
        assert_eq!(json["total_players"], 2);

        let buckets = json["buckets"].as_array().unwrap();
        assert_eq!(buckets.len(), 10);
        assert_eq!(buckets[0]["tier"], "HT1");
        assert_eq!(usernames(&buckets[0]["players"]), vec!["Alpha"]);
        assert_eq!(usernames(&buckets[1]["players"]), vec!["Bravo"]);
        assert!(buckets[2..]
            .iter()
            .all(|b| b["players"].as_array().unwrap().is_empty()));
        assert_eq!(buckets[9]["tier"], "LT5");
    }

    #[tokio::test]
    async fn test_unknown_gamemode_gives_empty_buckets() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(state_with(tmp.path(), roster()));

        let (status, json) = get_json(app, "/api/rankings?mode=bedwars").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["total_players"], 0);
        assert_eq!(json["buckets"].as_array().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_region_filter_reranks() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(state_with(tmp.path(), roster()));

        let (_, json) = get_json(app, "/api/rankings?region=na").await;

        assert_eq!(usernames(&json["players"]), vec!["Charlie", "Alpha"]);
        assert_eq!(json["players"][1]["rank"], 2);
    }

    #[tokio::test]
    async fn test_sort_points_within_bucket() {
        let tmp = tempfile::tempdir().unwrap();
        let players = vec![
            Player::new("Low", 10, "NA").with_tier("pot", TierCode::Ht3),
            Player::new("High", 90, "NA").with_tier("pot", TierCode::Ht3),
        ];

        let app = build_router(state_with(tmp.path(), players.clone()));
        let (_, json) = get_json(app, "/api/rankings?mode=pot").await;
        assert_eq!(usernames(&json["buckets"][2]["players"]), vec!["Low", "High"]);

        let app = build_router(state_with(tmp.path(), players));
        let (_, json) = get_json(app, "/api/rankings?mode=pot&sort=points").await;
        assert_eq!(usernames(&json["buckets"][2]["players"]), vec!["High", "Low"]);
    }

    #[tokio::test]
    async fn test_invalid_sort_is_bad_request() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(mock_state(tmp.path()));

        let (status, json) = get_json(app, "/api/rankings?mode=pot&sort=random").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_overall_pagination() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(mock_state(tmp.path()));

        let (_, json) = get_json(app, "/api/rankings?page=2&page_size=5").await;

        let players = json["players"].as_array().unwrap();
        assert_eq!(players.len(), 5);
        assert_eq!(players[0]["rank"], 6);
        assert_eq!(json["pagination"]["has_prev"], true);
    }

    #[tokio::test]
    async fn test_huge_page_is_empty_not_a_panic() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(mock_state(tmp.path()));

        let (status, json) =
            get_json(app, "/api/rankings?page=4294967295&page_size=100").await;

        assert_eq!(status, StatusCode::OK);
        assert!(json["players"].as_array().unwrap().is_empty());
        assert_eq!(json["pagination"]["has_next"], false);
    }

    #[tokio::test]
    async fn test_malformed_query_has_json_error_body() {
        let tmp = tempfile::tempdir().unwrap();
        let app = build_router(mock_state(tmp.path()));

        let (status, json) = get_json(app, "/api/rankings?page=abc").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"]["code"], "BAD_REQUEST");
        assert!(json["error"]["message"].as_str().unwrap().contains("query string"));
    }
}
