//! Player and tier assignment models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, PlayerId, TierCode};

/// One player's tier in one gamemode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerTierAssignment {
    /// Gamemode code, e.g. "sword"
    pub gamemode: String,

    /// Tier held in that gamemode
    pub tier: TierCode,

    /// When the tier was awarded
    #[serde(default)]
    pub achieved_at: Option<DateTime<Utc>>,
}

impl PlayerTierAssignment {
    pub fn new(gamemode: impl Into<String>, tier: TierCode) -> Self {
        Self {
            gamemode: gamemode.into(),
            tier,
            achieved_at: None,
        }
    }

    pub fn with_achieved_at(mut self, at: DateTime<Utc>) -> Self {
        self.achieved_at = Some(at);
        self
    }

    /// Whether this assignment is for the given gamemode code.
    pub fn is_for(&self, gamemode: &str) -> bool {
        self.gamemode.trim().eq_ignore_ascii_case(gamemode.trim())
    }
}

/// A ranked player as delivered by the data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    /// Unique identifier. Derived from the username when the source omits it.
    #[serde(default)]
    pub id: Option<PlayerId>,

    /// Minecraft username
    pub username: String,

    /// Cumulative points across all gamemodes
    pub points: u32,

    /// Region code, e.g. "NA", "EU"
    #[serde(default)]
    pub region: String,

    /// Tier per gamemode
    #[serde(default)]
    pub tiers: Vec<PlayerTierAssignment>,
}

impl Player {
    /// Create a player with an ID derived from the username.
    pub fn new(username: impl Into<String>, points: u32, region: impl Into<String>) -> Self {
        let username = username.into();
        Self {
            id: Some(EntityId::for_username(&username)),
            username,
            points,
            region: region.into(),
            tiers: Vec::new(),
        }
    }

    /// Builder method to add a tier assignment.
    pub fn with_tier(mut self, gamemode: &str, tier: TierCode) -> Self {
        self.tiers.push(PlayerTierAssignment::new(gamemode, tier));
        self
    }

    /// The player's ID, falling back to the username-derived one.
    pub fn player_id(&self) -> PlayerId {
        self.id
            .clone()
            .unwrap_or_else(|| EntityId::for_username(&self.username))
    }

    /// Fill in a missing ID.
    pub fn normalized(mut self) -> Self {
        if self.id.is_none() {
            self.id = Some(EntityId::for_username(&self.username));
        }
        self
    }
}
