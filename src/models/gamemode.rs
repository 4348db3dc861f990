//! Gamemode reference data.

use serde::Serialize;
use std::fmt;

/// A competitive ruleset that is ranked independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Gamemode {
    /// Short code, e.g. "sword"
    pub code: &'static str,

    /// Display name
    pub name: &'static str,

    /// Icon identifier used by the front end
    pub icon: &'static str,

    /// Badge color (hex)
    pub color: &'static str,
}

/// Every ranked gamemode, in display order.
pub static GAMEMODES: &[Gamemode] = &[
    Gamemode {
        code: "vanilla",
        name: "Vanilla",
        icon: "end_crystal",
        color: "#b37fe0",
    },
    Gamemode {
        code: "uhc",
        name: "UHC",
        icon: "golden_apple",
        color: "#e0b84a",
    },
    Gamemode {
        code: "pot",
        name: "Pot",
        icon: "splash_potion",
        color: "#e04a6a",
    },
    Gamemode {
        code: "nethop",
        name: "NethOP",
        icon: "netherite_chestplate",
        color: "#6b4a3a",
    },
    Gamemode {
        code: "smp",
        name: "SMP",
        icon: "ender_pearl",
        color: "#3aa88f",
    },
    Gamemode {
        code: "sword",
        name: "Sword",
        icon: "diamond_sword",
        color: "#4ac3e0",
    },
    Gamemode {
        code: "axe",
        name: "Axe",
        icon: "diamond_axe",
        color: "#8fa3b8",
    },
    Gamemode {
        code: "mace",
        name: "Mace",
        icon: "mace",
        color: "#7a7a8c",
    },
];

/// Look up a gamemode by code, ignoring case.
pub fn find_gamemode(code: &str) -> Option<&'static Gamemode> {
    let code = code.trim();
    GAMEMODES.iter().find(|g| g.code.eq_ignore_ascii_case(code))
}

/// Which leaderboard is being viewed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModeFilter {
    /// All players ordered by points
    #[default]
    Overall,

    /// Tier buckets for one gamemode code. The code need not be in the
    /// catalog; unknown codes simply match no assignments.
    Gamemode(String),
}

impl ModeFilter {
    /// Parse a selector: "overall" (or empty) versus a gamemode code.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("overall") {
            ModeFilter::Overall
        } else {
            ModeFilter::Gamemode(s.to_ascii_lowercase())
        }
    }
}

impl fmt::Display for ModeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModeFilter::Overall => write!(f, "overall"),
            ModeFilter::Gamemode(code) => write!(f, "{}", code),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_order() {
        let codes: Vec<&str> = GAMEMODES.iter().map(|g| g.code).collect();
        assert_eq!(
            codes,
            vec!["vanilla", "uhc", "pot", "nethop", "smp", "sword", "axe", "mace"]
        );
    }

    #[test]
    fn test_find_gamemode_ignores_case() {
        assert_eq!(find_gamemode("SWORD").map(|g| g.name), Some("Sword"));
        assert_eq!(find_gamemode(" uhc ").map(|g| g.code), Some("uhc"));
        assert!(find_gamemode("bedwars").is_none());
    }

    #[test]
    fn test_mode_filter_parse() {
        assert_eq!(ModeFilter::parse("overall"), ModeFilter::Overall);
        assert_eq!(ModeFilter::parse("Overall"), ModeFilter::Overall);
        assert_eq!(ModeFilter::parse(""), ModeFilter::Overall);
        assert_eq!(
            ModeFilter::parse("Sword"),
            ModeFilter::Gamemode("sword".to_string())
        );
    }

    #[test]
    fn test_mode_filter_display() {
        assert_eq!(ModeFilter::Overall.to_string(), "overall");
        assert_eq!(ModeFilter::Gamemode("axe".into()).to_string(), "axe");
    }
}
