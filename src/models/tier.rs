//! Tier codes.
//!
//! A gamemode ranking places a player in one of ten tiers, High Tier 1
//! (best) down to Low Tier 5 (worst). The ordinal of a tier is its
//! position in that ordering, starting at 1.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of tier levels, and therefore of tier buckets.
pub const TIER_LEVELS: usize = 10;

/// A competitive tier within a gamemode.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TierCode {
    Ht1,
    Ht2,
    Ht3,
    Ht4,
    Ht5,
    Lt1,
    Lt2,
    Lt3,
    Lt4,
    Lt5,
    /// A code the data source sent that is not in the table.
    /// Ranks as the worst tier.
    Unrecognized(String),
}

impl TierCode {
    /// All known tiers, best first.
    pub const ALL: [TierCode; TIER_LEVELS] = [
        TierCode::Ht1,
        TierCode::Ht2,
        TierCode::Ht3,
        TierCode::Ht4,
        TierCode::Ht5,
        TierCode::Lt1,
        TierCode::Lt2,
        TierCode::Lt3,
        TierCode::Lt4,
        TierCode::Lt5,
    ];

    /// Tier level, 1 (HT1) through 10 (LT5). Unrecognized codes are 10.
    pub fn ordinal(&self) -> u8 {
        match self {
            TierCode::Ht1 => 1,
            TierCode::Ht2 => 2,
            TierCode::Ht3 => 3,
            TierCode::Ht4 => 4,
            TierCode::Ht5 => 5,
            TierCode::Lt1 => 6,
            TierCode::Lt2 => 7,
            TierCode::Lt3 => 8,
            TierCode::Lt4 => 9,
            TierCode::Lt5 | TierCode::Unrecognized(_) => 10,
        }
    }

    /// The known tier at a level, if the level is in 1..=10.
    pub fn from_ordinal(level: u8) -> Option<TierCode> {
        if level == 0 {
            return None;
        }
        TierCode::ALL.get(level as usize - 1).cloned()
    }

    pub fn is_high(&self) -> bool {
        matches!(
            self,
            TierCode::Ht1 | TierCode::Ht2 | TierCode::Ht3 | TierCode::Ht4 | TierCode::Ht5
        )
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, TierCode::Unrecognized(_))
    }

    /// Canonical code text, e.g. "HT1".
    pub fn as_str(&self) -> &str {
        match self {
            TierCode::Ht1 => "HT1",
            TierCode::Ht2 => "HT2",
            TierCode::Ht3 => "HT3",
            TierCode::Ht4 => "HT4",
            TierCode::Ht5 => "HT5",
            TierCode::Lt1 => "LT1",
            TierCode::Lt2 => "LT2",
            TierCode::Lt3 => "LT3",
            TierCode::Lt4 => "LT4",
            TierCode::Lt5 => "LT5",
            TierCode::Unrecognized(raw) => raw,
        }
    }

    /// Parse a code leniently. Never fails: anything outside the table
    /// becomes `Unrecognized`.
    pub fn parse(s: &str) -> TierCode {
        match s.trim().to_ascii_uppercase().as_str() {
            "HT1" => TierCode::Ht1,
            "HT2" => TierCode::Ht2,
            "HT3" => TierCode::Ht3,
            "HT4" => TierCode::Ht4,
            "HT5" => TierCode::Ht5,
            "LT1" => TierCode::Lt1,
            "LT2" => TierCode::Lt2,
            "LT3" => TierCode::Lt3,
            "LT4" => TierCode::Lt4,
            "LT5" => TierCode::Lt5,
            _ => TierCode::Unrecognized(s.to_string()),
        }
    }
}

impl FromStr for TierCode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(TierCode::parse(s))
    }
}

impl fmt::Display for TierCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl Serialize for TierCode {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for TierCode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(TierCode::parse(&raw))
    }
}
