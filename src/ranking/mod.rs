//! Leaderboard ranking.
//!
//! - Overall ranking of players by cumulative points
//! - Best tier per player for a gamemode
//! - Partition of a gamemode's players into the ten tier buckets
//!
//! Everything here is pure: the same snapshot in gives the same view out.

mod query;

pub use query::*;

use serde::Serialize;

use crate::models::{Player, PlayerTierAssignment, TierCode, TIER_LEVELS};

/// A player with their 1-based position in the overall ranking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedPlayer<'a> {
    pub rank: u32,
    pub player: &'a Player,
}

/// Sort players by points, highest first, and number them 1..=n.
///
/// The sort is stable, so equal-points players keep their input order and
/// still receive distinct consecutive ranks.
pub fn rank_overall<'a, I>(players: I) -> Vec<RankedPlayer<'a>>
where
    I: IntoIterator<Item = &'a Player>,
{
    let mut sorted: Vec<&Player> = players.into_iter().collect();
    sorted.sort_by(|a, b| b.points.cmp(&a.points));

    sorted
        .into_iter()
        .enumerate()
        .map(|(i, player)| RankedPlayer {
            rank: i as u32 + 1,
            player,
        })
        .collect()
}

/// The best tier a player holds in a gamemode, or `None` when they hold none.
///
/// If the player has several assignments for the gamemode, the lowest
/// ordinal wins and the first of equal ordinals is kept.
pub fn best_tier_for<'a>(player: &'a Player, gamemode: &str) -> Option<&'a TierCode> {
    best_assignment_for(player, gamemode).map(|a| &a.tier)
}

/// The assignment behind `best_tier_for`.
pub fn best_assignment_for<'a>(
    player: &'a Player,
    gamemode: &str,
) -> Option<&'a PlayerTierAssignment> {
    player
        .tiers
        .iter()
        .filter(|a| a.is_for(gamemode))
        .min_by_key(|a| a.tier.ordinal())
}

/// Players of one gamemode split into tier levels 1..=10.
#[derive(Debug, Clone, PartialEq)]
pub struct TierBuckets<'a> {
    buckets: [Vec<&'a Player>; TIER_LEVELS],
}

impl<'a> TierBuckets<'a> {
    fn empty() -> Self {
        Self {
            buckets: Default::default(),
        }
    }

    /// Players at a level (1 = HT1 .. 10 = LT5). Out-of-range levels are empty.
    pub fn level(&self, level: u8) -> &[&'a Player] {
        match level {
            1..=10 => &self.buckets[level as usize - 1],
            _ => &[],
        }
    }

    /// All ten buckets in level order, empty ones included.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &[&'a Player])> + '_ {
        self.buckets
            .iter()
            .enumerate()
            .map(|(i, players)| (i as u8 + 1, players.as_slice()))
    }

    /// Number of players across all buckets.
    pub fn total(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// A copy with each bucket ordered by points, highest first. Equal
    /// points keep their bucket order.
    pub fn sorted_by_points(&self) -> Self {
        let mut sorted = self.clone();
        for bucket in sorted.buckets.iter_mut() {
            bucket.sort_by(|a, b| b.points.cmp(&a.points));
        }
        sorted
    }
}

/// Partition players into tier buckets for a gamemode.
///
/// Players with no assignment for the gamemode are left out entirely.
/// Within a bucket players keep their input order. All ten buckets are
/// always present.
pub fn group_by_tier<'a, I>(players: I, gamemode: &str) -> TierBuckets<'a>
where
    I: IntoIterator<Item = &'a Player>,
{
    let mut grouped = TierBuckets::empty();

    for player in players {
        if let Some(tier) = best_tier_for(player, gamemode) {
            grouped.buckets[tier.ordinal() as usize - 1].push(player);
        }
    }

    grouped
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn player(name: &str, points: u32) -> Player {
        Player::new(name, points, "NA")
    }

    fn names<'a>(players: &[&'a Player]) -> Vec<&'a str> {
        players.iter().map(|p| p.username.as_str()).collect()
    }

    #[test]
    fn test_rank_overall_empty() {
        assert!(rank_overall(&Vec::<Player>::new()).is_empty());
    }

    #[test]
    fn test_rank_overall_ties_keep_input_order() {
        let players = vec![player("a", 100), player("b", 250), player("c", 250)];

        let ranked: Vec<(u32, &str, u32)> = rank_overall(&players)
            .into_iter()
            .map(|r| (r.rank, r.player.username.as_str(), r.player.points))
            .collect();

        assert_eq!(
            ranked,
            vec![(1, "b", 250), (2, "c", 250), (3, "a", 100)]
        );
    }

    #[test]
    fn test_rank_overall_covers_every_player_once() {
        let players = vec![
            player("a", 5),
            player("b", 50),
            player("c", 0),
            player("d", 50),
            player("e", 7),
        ];
        let ranked = rank_overall(&players);

        assert_eq!(ranked.len(), players.len());
        let ranks: Vec<u32> = ranked.iter().map(|r| r.rank).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
        assert!(ranked
            .windows(2)
            .all(|w| w[0].player.points >= w[1].player.points));

        let mut seen = names(&ranked.iter().map(|r| r.player).collect::<Vec<_>>());
        seen.sort();
        assert_eq!(seen, vec!["a", "b", "c", "d", "e"]);
    }

    #[test]
    fn test_rank_overall_sorted_input_unchanged() {
        let players = vec![player("a", 30), player("b", 20), player("c", 20), player("d", 1)];
        let ranked = rank_overall(&players);

        for (i, r) in ranked.iter().enumerate() {
            assert_eq!(r.player, &players[i]);
            assert_eq!(r.rank as usize, i + 1);
        }
    }

    #[test]
    fn test_best_tier_for() {
        let a = player("A", 10)
            .with_tier("sword", TierCode::Ht1)
            .with_tier("axe", TierCode::Lt3);

        assert_eq!(best_tier_for(&a, "sword"), Some(&TierCode::Ht1));
        assert_eq!(best_tier_for(&a, "axe"), Some(&TierCode::Lt3));
        assert_eq!(best_tier_for(&a, "pot"), None);
    }

    #[test]
    fn test_best_tier_for_duplicate_assignments_picks_best() {
        let a = player("A", 10)
            .with_tier("sword", TierCode::Lt2)
            .with_tier("sword", TierCode::Ht4);
        assert_eq!(best_tier_for(&a, "sword"), Some(&TierCode::Ht4));
    }

    #[test]
    fn test_best_tier_for_equal_ordinals_keeps_first() {
        let a = player("A", 10)
            .with_tier("sword", TierCode::parse("??"))
            .with_tier("sword", TierCode::Lt5);
        assert_eq!(
            best_tier_for(&a, "sword"),
            Some(&TierCode::Unrecognized("??".to_string()))
        );
    }

    #[test]
    fn test_group_by_tier_scenario() {
        let players = vec![
            player("A", 10).with_tier("sword", TierCode::Ht1),
            player("B", 20).with_tier("sword", TierCode::Ht2),
            player("C", 30).with_tier("axe", TierCode::Ht1),
        ];
        let grouped = group_by_tier(&players, "sword");

        assert_eq!(names(grouped.level(1)), vec!["A"]);
        assert_eq!(names(grouped.level(2)), vec!["B"]);
        for level in 3..=10 {
            assert!(grouped.level(level).is_empty());
        }
        assert_eq!(grouped.total(), 2);
    }

    #[test]
    fn test_group_by_tier_always_ten_buckets() {
        let nobody: Vec<Player> = Vec::new();
        let grouped = group_by_tier(&nobody, "sword");
        let levels: Vec<u8> = grouped.iter().map(|(level, _)| level).collect();

        assert_eq!(levels, (1..=10).collect::<Vec<u8>>());
        assert!(grouped.is_empty());
    }

    #[test]
    fn test_group_by_tier_unknown_gamemode_is_empty() {
        let players = vec![player("A", 10).with_tier("sword", TierCode::Ht1)];
        let grouped = group_by_tier(&players, "bedwars");

        assert_eq!(grouped.iter().count(), 10);
        assert!(grouped.is_empty());
    }

    #[test]
    fn test_group_by_tier_single_assignment_lands_in_its_ordinal() {
        for tier in TierCode::ALL {
            let players = vec![player("A", 1).with_tier("mace", tier.clone())];
            let grouped = group_by_tier(&players, "mace");

            for (level, bucket) in grouped.iter() {
                let expected = if level == tier.ordinal() { 1 } else { 0 };
                assert_eq!(bucket.len(), expected, "{} at level {}", tier, level);
            }
        }
    }

    #[test]
    fn test_group_by_tier_unrecognized_code_goes_to_last_bucket() {
        let players = vec![player("A", 1).with_tier("uhc", TierCode::parse("RLT2"))];
        let grouped = group_by_tier(&players, "uhc");
        assert_eq!(names(grouped.level(10)), vec!["A"]);
    }

    #[test]
    fn test_group_by_tier_keeps_input_order_within_bucket() {
        let players = vec![
            player("low", 10).with_tier("pot", TierCode::Ht3),
            player("high", 90).with_tier("pot", TierCode::Ht3),
            player("mid", 50).with_tier("pot", TierCode::Ht3),
        ];
        let grouped = group_by_tier(&players, "pot");
        assert_eq!(names(grouped.level(3)), vec!["low", "high", "mid"]);
    }

    #[test]
    fn test_sorted_by_points_orders_within_bucket() {
        let players = vec![
            player("low", 10).with_tier("pot", TierCode::Ht3),
            player("high", 90).with_tier("pot", TierCode::Ht3),
            player("mid", 50).with_tier("pot", TierCode::Ht3),
            player("tie", 50).with_tier("pot", TierCode::Lt1),
        ];
        let grouped = group_by_tier(&players, "pot").sorted_by_points();

        assert_eq!(names(grouped.level(3)), vec!["high", "mid", "low"]);
        assert_eq!(names(grouped.level(6)), vec!["tie"]);
    }

    #[test]
    fn test_level_out_of_range() {
        let nobody: Vec<Player> = Vec::new();
        let grouped = group_by_tier(&nobody, "sword");
        assert!(grouped.level(0).is_empty());
        assert!(grouped.level(11).is_empty());
    }

    #[test]
    fn test_ranking_is_idempotent() {
        let players = crate::models::mock_players();
        assert_eq!(rank_overall(&players), rank_overall(&players));
        assert_eq!(group_by_tier(&players, "sword"), group_by_tier(&players, "sword"));
    }
}
