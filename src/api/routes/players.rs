use axum::extract::{Path, State};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::state::AppState;
use crate::api::{load_players, ApiError};
use crate::models::GAMEMODES;
use crate::ranking::{best_assignment_for, rank_overall};

use super::rankings::PlayerRow;

#[derive(Debug, Serialize)]
pub struct ProfileTier {
    pub gamemode: &'static str,
    pub gamemode_name: &'static str,
    pub tier: String,
    pub level: u8,
    pub high: bool,
    pub achieved_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct PlayerProfile {
    /// Position in the unfiltered overall ranking
    pub rank: u32,
    pub total_players: u32,
    pub player: PlayerRow,
    pub tiers: Vec<ProfileTier>,
}

/// Look up a player by ID or (case-insensitive) username.
pub async fn player_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PlayerProfile>, ApiError> {
    let players = load_players(&state).await?;
    let ranked = rank_overall(&players);

    let entry = ranked
        .iter()
        .find(|r| r.player.player_id().as_str() == id)
        .or_else(|| {
            ranked
                .iter()
                .find(|r| r.player.username.eq_ignore_ascii_case(id.trim()))
        })
        .ok_or_else(|| ApiError::NotFound(format!("player {}", id)))?;

    let player = entry.player;
    let tiers = GAMEMODES
        .iter()
        .filter_map(|g| {
            best_assignment_for(player, g.code).map(|a| ProfileTier {
                gamemode: g.code,
                gamemode_name: g.name,
                tier: a.tier.to_string(),
                level: a.tier.ordinal(),
                high: a.tier.is_high(),
                achieved_at: a.achieved_at,
            })
        })
        .collect();

    Ok(Json(PlayerProfile {
        rank: entry.rank,
        total_players: ranked.len() as u32,
        player: PlayerRow::from_player(player),
        tiers,
    }))
}
