//! Static roster served when no data source is configured.

use super::{Player, TierCode};

/// The demo leaderboard.
pub fn mock_players() -> Vec<Player> {
    use TierCode::*;

    vec![
        Player::new("Marlowww", 435, "NA")
            .with_tier("vanilla", Ht1)
            .with_tier("sword", Ht1)
            .with_tier("axe", Ht2)
            .with_tier("uhc", Lt1),
        Player::new("ItzRealMe", 390, "NA")
            .with_tier("vanilla", Ht2)
            .with_tier("pot", Ht1)
            .with_tier("nethop", Ht1),
        Player::new("Swight", 355, "EU")
            .with_tier("sword", Ht2)
            .with_tier("axe", Ht1)
            .with_tier("mace", Lt2),
        Player::new("coldified", 300, "EU")
            .with_tier("uhc", Ht1)
            .with_tier("smp", Ht2)
            .with_tier("pot", Lt2),
        Player::new("Kylaz", 262, "NA")
            .with_tier("mace", Ht1)
            .with_tier("smp", Lt1)
            .with_tier("sword", Lt3),
        Player::new("BlvckWlf", 218, "EU")
            .with_tier("nethop", Ht2)
            .with_tier("vanilla", Lt2),
        Player::new("ninorc", 190, "AS")
            .with_tier("pot", Ht3)
            .with_tier("uhc", Lt3)
            .with_tier("axe", Ht4),
        Player::new("Lurrn", 144, "SA")
            .with_tier("smp", Ht3)
            .with_tier("mace", Lt3),
        Player::new("yMiau", 96, "SA")
            .with_tier("sword", Lt4)
            .with_tier("axe", Ht5),
        Player::new("Hubbs", 61, "AU").with_tier("vanilla", Lt5),
        Player::new("oreZ", 40, "AS").with_tier("uhc", Lt4),
        Player::new("Fumbled", 12, "NA"),
    ]
}
