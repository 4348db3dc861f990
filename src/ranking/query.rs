//! Leaderboard queries: which gamemode, which name, which region.
//!
//! The selection the viewer makes is carried in a `LeaderboardQuery` value
//! and applied to a fresh snapshot on every recomputation.

use crate::models::{ModeFilter, Player};

use super::{group_by_tier, rank_overall, RankedPlayer, TierBuckets};

/// How players inside a tier bucket are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BucketOrder {
    /// Snapshot order
    #[default]
    Input,
    /// Points, highest first
    Points,
}

impl std::str::FromStr for BucketOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "input" => Ok(BucketOrder::Input),
            "points" => Ok(BucketOrder::Points),
            other => Err(format!("unknown bucket order: {}", other)),
        }
    }
}

/// The viewer's current selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeaderboardQuery {
    pub mode: ModeFilter,
    pub search: Option<String>,
    pub region: Option<String>,
    pub bucket_order: BucketOrder,
}

/// The computed leaderboard for a query.
#[derive(Debug, Clone, PartialEq)]
pub enum LeaderboardView<'a> {
    Overall(Vec<RankedPlayer<'a>>),
    Tiers {
        gamemode: String,
        buckets: TierBuckets<'a>,
    },
}

impl LeaderboardQuery {
    pub fn new(mode: ModeFilter) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    pub fn with_bucket_order(mut self, order: BucketOrder) -> Self {
        self.bucket_order = order;
        self
    }

    /// Whether a player passes the search and region filters.
    pub fn matches(&self, player: &Player) -> bool {
        let search_ok = match self.search.as_deref().map(str::trim) {
            Some(s) if !s.is_empty() => player
                .username
                .to_lowercase()
                .contains(&s.to_lowercase()),
            _ => true,
        };

        let region_ok = match self.region.as_deref().map(str::trim) {
            Some(r) if !r.is_empty() => player.region.trim().eq_ignore_ascii_case(r),
            _ => true,
        };

        search_ok && region_ok
    }

    /// Filter the snapshot and rank what is left.
    ///
    /// Ranks in the overall view are positions within the filtered set.
    pub fn apply<'a>(&self, players: &'a [Player]) -> LeaderboardView<'a> {
        let selected = players.iter().filter(|p| self.matches(p));

        match &self.mode {
            ModeFilter::Overall => LeaderboardView::Overall(rank_overall(selected)),
            ModeFilter::Gamemode(code) => {
                let buckets = group_by_tier(selected, code);
                let buckets = match self.bucket_order {
                    BucketOrder::Input => buckets,
                    BucketOrder::Points => buckets.sorted_by_points(),
                };
                LeaderboardView::Tiers {
                    gamemode: code.clone(),
                    buckets,
                }
            }
        }
    }
}

impl LeaderboardView<'_> {
    /// Number of players shown.
    pub fn len(&self) -> usize {
        match self {
            LeaderboardView::Overall(rows) => rows.len(),
            LeaderboardView::Tiers { buckets, .. } => buckets.total(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
