//! Badge catalog and level-to-badge resolution.

use serde::Serialize;

/// A named tier unlocked at a level threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Badge {
    pub name: &'static str,
    pub level: i64,
    /// Symbolic icon name, resolved by the display layer.
    pub icon: &'static str,
    /// Symbolic gradient name, resolved by the display layer.
    pub color: &'static str,
}

/// Badge catalog, strictly increasing by `level`. The first entry starts at
/// level 1 so every level resolves to a badge.
pub const BADGES: [Badge; 9] = [
    Badge {
        name: "Peasant",
        level: 1,
        icon: "sprout",
        color: "gradient-stone",
    },
    Badge {
        name: "Soldier",
        level: 10,
        icon: "sword",
        color: "gradient-slate",
    },
    Badge {
        name: "Knight",
        level: 20,
        icon: "shield",
        color: "gradient-bronze",
    },
    Badge {
        name: "Baron",
        level: 35,
        icon: "castle",
        color: "gradient-emerald",
    },
    Badge {
        name: "Viscount",
        level: 50,
        icon: "scroll",
        color: "gradient-sky",
    },
    Badge {
        name: "Earl",
        level: 75,
        icon: "gem",
        color: "gradient-violet",
    },
    Badge {
        name: "Duke",
        level: 100,
        icon: "star",
        color: "gradient-rose",
    },
    Badge {
        name: "King",
        level: 150,
        icon: "crown",
        color: "gradient-gold",
    },
    Badge {
        name: "Emperor",
        level: 200,
        icon: "trophy",
        color: "gradient-royal",
    },
];

/// Highest badge whose threshold `level` meets. Levels below the first
/// threshold fall back to the first badge.
pub fn get_current_badge(level: i64) -> &'static Badge {
    BADGES
        .iter()
        .rev()
        .find(|badge| badge.level <= level)
        .unwrap_or(&BADGES[0])
}

/// Lowest badge whose threshold `level` has not reached yet, or `None` once
/// the last badge is unlocked.
pub fn get_next_badge(level: i64) -> Option<&'static Badge> {
    BADGES.iter().find(|badge| level < badge.level)
}

/// Badges whose threshold lies in `(old_level, new_level]`.
pub fn badges_unlocked_between(old_level: i64, new_level: i64) -> Vec<&'static Badge> {
    BADGES
        .iter()
        .filter(|badge| old_level < badge.level && badge.level <= new_level)
        .collect()
}
