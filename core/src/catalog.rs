//! Immutable enemy and tower descriptors shared by every live instance.

use serde::{Deserialize, Serialize};

use crate::Color;

/// Kinds of enemies that waves can send down the path.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnemyKind {
    /// Baseline enemy used by the opening waves.
    Regular,
    /// Slow enemy with twice the regular health.
    Tough,
    /// Quick, lightly armoured enemy.
    Fast,
    /// Heavily armoured enemy that deals double damage on arrival.
    Tougher,
    /// Faster and sturdier variant of the regular enemy.
    RegularPlus,
    /// Final enemy whose arrival ends most runs.
    Boss,
}

impl EnemyKind {
    /// Every enemy kind in catalog order.
    pub const ALL: [EnemyKind; 6] = [
        Self::Regular,
        Self::Tough,
        Self::Fast,
        Self::Tougher,
        Self::RegularPlus,
        Self::Boss,
    ];

    /// Returns the immutable descriptor for the enemy kind.
    #[must_use]
    pub fn descriptor(self) -> &'static EnemyType {
        match self {
            Self::Regular => &REGULAR,
            Self::Tough => &TOUGH,
            Self::Fast => &FAST,
            Self::Tougher => &TOUGHER,
            Self::RegularPlus => &REGULAR_PLUS,
            Self::Boss => &BOSS,
        }
    }
}

/// Static statistics describing one kind of enemy.
#[derive(Clone, Debug, PartialEq)]
pub struct EnemyType {
    name: &'static str,
    speed: f32,
    damage: u32,
    health: u32,
    reward: u32,
    pixels: u32,
    color: Color,
}

impl EnemyType {
    /// Display name of the enemy kind.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Distance travelled per tick, measured in tiles.
    #[must_use]
    pub const fn speed(&self) -> f32 {
        self.speed
    }

    /// Base health removed when the enemy reaches the end of the path.
    #[must_use]
    pub const fn damage(&self) -> u32 {
        self.damage
    }

    /// Health every new instance starts with.
    #[must_use]
    pub const fn health(&self) -> u32 {
        self.health
    }

    /// Gold credited when the enemy is killed.
    #[must_use]
    pub const fn reward(&self) -> u32 {
        self.reward
    }

    /// Edge length of the enemy's on-screen square in pixels.
    #[must_use]
    pub const fn pixels(&self) -> u32 {
        self.pixels
    }

    /// Colour used when presenting the enemy at full health.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }
}

static REGULAR: EnemyType = EnemyType {
    name: "Regular",
    speed: 0.1,
    damage: 1,
    health: 25,
    reward: 4,
    pixels: 10,
    color: Color::from_rgb(220, 0, 220),
};

static TOUGH: EnemyType = EnemyType {
    name: "Tough",
    speed: 0.1,
    damage: 1,
    health: 50,
    reward: 6,
    pixels: 10,
    color: Color::from_rgb(220, 40, 40),
};

static FAST: EnemyType = EnemyType {
    name: "Fast",
    speed: 0.15,
    damage: 1,
    health: 30,
    reward: 6,
    pixels: 8,
    color: Color::from_rgb(80, 220, 80),
};

static TOUGHER: EnemyType = EnemyType {
    name: "Tougher",
    speed: 0.07,
    damage: 2,
    health: 200,
    reward: 12,
    pixels: 15,
    color: Color::from_rgb(220, 40, 40),
};

static REGULAR_PLUS: EnemyType = EnemyType {
    name: "Regular+",
    speed: 0.12,
    damage: 1,
    health: 45,
    reward: 10,
    pixels: 11,
    color: Color::from_rgb(220, 120, 20),
};

static BOSS: EnemyType = EnemyType {
    name: "Boss",
    speed: 0.04,
    damage: 20,
    health: 4500,
    reward: 20,
    pixels: 20,
    color: Color::from_rgb(40, 40, 220),
};

/// Policy a tower uses to choose among enemies within range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TargetingPriority {
    /// Earliest spawned enemy in range.
    First,
    /// Enemy in range with the most remaining health.
    Strongest,
}

/// Types of towers that can be purchased.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TowerKind {
    /// Cheap all-round tower.
    Normal,
    /// Slow tower with a heavy hit.
    Heavy,
    /// Short-ranged tower with a rapid fire rate.
    MachineGun,
    /// Long-ranged tower that prefers the healthiest enemy.
    Sniper,
}

impl TowerKind {
    /// Every tower kind in menu order.
    pub const ALL: [TowerKind; 4] = [Self::Normal, Self::Heavy, Self::MachineGun, Self::Sniper];

    /// Returns the immutable descriptor for the tower kind.
    #[must_use]
    pub fn descriptor(self) -> &'static TowerType {
        match self {
            Self::Normal => &NORMAL,
            Self::Heavy => &HEAVY,
            Self::MachineGun => &MACHINE_GUN,
            Self::Sniper => &SNIPER,
        }
    }
}

/// Static statistics describing one kind of tower.
#[derive(Clone, Debug, PartialEq)]
pub struct TowerType {
    name: &'static str,
    price: u32,
    max_range: f32,
    firing_time: u32,
    damage: u32,
    color: Color,
    base_color_id: i8,
    targeting_priority: TargetingPriority,
}

impl TowerType {
    /// Display name of the tower kind.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Gold required to purchase the tower.
    #[must_use]
    pub const fn price(&self) -> u32 {
        self.price
    }

    /// Targeting radius measured in tiles.
    #[must_use]
    pub const fn max_range(&self) -> f32 {
        self.max_range
    }

    /// Ticks the tower needs to reload after a shot.
    #[must_use]
    pub const fn firing_time(&self) -> u32 {
        self.firing_time
    }

    /// Health removed from the target by each shot.
    #[must_use]
    pub const fn damage(&self) -> u32 {
        self.damage
    }

    /// Colour of the tower turret.
    #[must_use]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Board cell value written beneath a placed tower of this kind.
    ///
    /// Always positive so it never collides with path or empty cells.
    #[must_use]
    pub const fn base_color_id(&self) -> i8 {
        self.base_color_id
    }

    /// Policy used to choose among enemies within range.
    #[must_use]
    pub const fn targeting_priority(&self) -> TargetingPriority {
        self.targeting_priority
    }
}

static NORMAL: TowerType = TowerType {
    name: "Normal Tower",
    price: 50,
    max_range: 2.5,
    firing_time: 60,
    damage: 25,
    color: Color::from_rgb(100, 100, 100),
    base_color_id: 1,
    targeting_priority: TargetingPriority::First,
};

static HEAVY: TowerType = TowerType {
    name: "Heavy Tower",
    price: 100,
    max_range: 3.0,
    firing_time: 60,
    damage: 50,
    color: Color::from_rgb(200, 50, 50),
    base_color_id: 2,
    targeting_priority: TargetingPriority::First,
};

static MACHINE_GUN: TowerType = TowerType {
    name: "Machine Gun Tower",
    price: 125,
    max_range: 1.5,
    firing_time: 5,
    damage: 5,
    color: Color::from_rgb(50, 200, 50),
    base_color_id: 3,
    targeting_priority: TargetingPriority::First,
};

static SNIPER: TowerType = TowerType {
    name: "Sniper Tower",
    price: 175,
    max_range: 4.5,
    firing_time: 125,
    damage: 200,
    color: Color::from_rgb(50, 50, 200),
    base_color_id: 4,
    targeting_priority: TargetingPriority::Strongest,
};

#[cfg(test)]
mod tests {
    use super::{EnemyKind, TargetingPriority, TowerKind};

    #[test]
    fn tower_base_color_ids_are_positive_and_distinct() {
        let mut ids: Vec<i8> = TowerKind::ALL
            .iter()
            .map(|kind| kind.descriptor().base_color_id())
            .collect();
        assert!(ids.iter().all(|id| *id > 0));
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), TowerKind::ALL.len());
    }

    #[test]
    fn only_the_sniper_prefers_the_strongest_enemy() {
        for kind in TowerKind::ALL {
            let expected = if kind == TowerKind::Sniper {
                TargetingPriority::Strongest
            } else {
                TargetingPriority::First
            };
            assert_eq!(kind.descriptor().targeting_priority(), expected);
        }
    }

    #[test]
    fn enemy_kinds_deserialize_from_snake_case_names() {
        let kind: EnemyKind = serde_json::from_str("\"regular_plus\"").expect("valid kind");
        assert_eq!(kind, EnemyKind::RegularPlus);
        assert_eq!(kind.descriptor().name(), "Regular+");
    }
}
