#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Tower Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative game state, and pure systems. Adapters submit [`Command`]
//! values describing player input or the passage of time, the world executes
//! those commands via its `apply` entry point, and then reports [`Event`]
//! values describing every domain outcome. Presentation code reads the
//! immutable snapshot types declared here and never mutates the simulation.

mod catalog;
mod timer;

pub use catalog::{EnemyKind, EnemyType, TargetingPriority, TowerKind, TowerType};
pub use glam::Vec2;
pub use timer::Timer;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Tower Defence.";

/// Fixed rate at which the driver advances the simulation.
pub const TICK_RATE_HZ: u32 = 30;

/// Commands that express all permissible game state mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Moves the build cursor one tile, wrapping around the board edges.
    MoveCursor {
        /// Direction the cursor should travel.
        direction: Direction,
    },
    /// Selects the tower type that the next purchase will build.
    SelectTowerType {
        /// Tower type to select.
        kind: TowerKind,
    },
    /// Clears the current tower selection.
    ClearSelection,
    /// Attempts to purchase the selected tower at the cursor.
    BuyTower,
    /// Pauses or resumes the simulation.
    TogglePause,
    /// Advances the simulation by one fixed-rate tick.
    Tick,
}

/// Events reported by the game state after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Number of ticks simulated so far, including this one.
        tick: u64,
    },
    /// Confirms that the cursor moved.
    CursorMoved {
        /// Cell the cursor occupies after moving.
        cursor: CellCoord,
    },
    /// Announces a change of the selected tower type.
    TowerTypeSelected {
        /// Newly selected tower type, if any.
        kind: Option<TowerKind>,
    },
    /// Confirms that a tower was purchased and placed.
    TowerPlaced {
        /// Identifier assigned to the tower.
        tower: TowerId,
        /// Type of tower that was placed.
        kind: TowerKind,
        /// Cell occupied by the tower.
        cell: CellCoord,
    },
    /// Reports that a purchase attempt changed nothing.
    TowerPurchaseRejected {
        /// Specific reason the purchase failed.
        reason: PurchaseError,
    },
    /// Confirms that a wave released an enemy at the start of the path.
    EnemySpawned {
        /// Identifier assigned to the enemy.
        enemy: EnemyId,
        /// Kind of enemy that spawned.
        kind: EnemyKind,
    },
    /// Reports that a tower shot at an enemy.
    ProjectileFired {
        /// Tower that fired.
        tower: TowerId,
        /// Enemy that was hit.
        enemy: EnemyId,
    },
    /// Reports that an enemy died and its reward was credited.
    EnemyKilled {
        /// Identifier of the enemy that died.
        enemy: EnemyId,
        /// Gold credited for the kill.
        reward: u32,
    },
    /// Reports that an enemy reached the end of the path.
    EnemyPassed {
        /// Identifier of the enemy that left the board.
        enemy: EnemyId,
        /// Base health removed by the enemy.
        damage: u32,
    },
    /// Announces that the next wave became current.
    WaveAdvanced {
        /// Zero-based index of the new current wave.
        wave: usize,
    },
    /// Confirms a change of the pause flag.
    PauseToggled {
        /// Whether the simulation is paused after the toggle.
        paused: bool,
    },
    /// The final wave was cleared.
    GameWon,
    /// Base health ran out.
    GameLost,
}

/// Visual appearance of an entity expressed as byte RGB components.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    red: u8,
    green: u8,
    blue: u8,
}

impl Color {
    /// Creates a new color from byte RGB components.
    #[must_use]
    pub const fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Red component of the color.
    #[must_use]
    pub const fn red(&self) -> u8 {
        self.red
    }

    /// Green component of the color.
    #[must_use]
    pub const fn green(&self) -> u8 {
        self.green
    }

    /// Blue component of the color.
    #[must_use]
    pub const fn blue(&self) -> u8 {
        self.blue
    }

    /// Darkens the color proportionally to `fraction`, clamped to `0.0..=1.0`.
    #[must_use]
    pub fn scaled(self, fraction: f32) -> Self {
        let fraction = fraction.clamp(0.0, 1.0);
        let scale = |channel: u8| (f32::from(channel) * fraction).round() as u8;
        Self::from_rgb(scale(self.red), scale(self.green), scale(self.blue))
    }
}

/// Cardinal directions the cursor can move in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// Column and row delta of a single step in this direction.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }
}

/// Unique identifier assigned to an enemy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnemyId(u32);

impl EnemyId {
    /// Creates a new enemy identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a tower.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TowerId(u32);

impl TowerId {
    /// Creates a new tower identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the tower identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single board cell expressed as column and row coordinates.
///
/// Coordinates are signed because the path enters and leaves the board
/// through cells just outside its bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: i32,
    row: i32,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }

    /// Column index of the cell.
    #[must_use]
    pub const fn column(&self) -> i32 {
        self.column
    }

    /// Row index of the cell.
    #[must_use]
    pub const fn row(&self) -> i32 {
        self.row
    }

    /// Continuous position of the cell in tile units.
    #[must_use]
    pub fn to_point(self) -> Vec2 {
        Vec2::new(self.column as f32, self.row as f32)
    }
}

/// Classification of a single board cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Part of the enemy path; never buildable.
    Path,
    /// Free cell available for construction.
    Empty,
    /// Cell occupied by a tower of the given kind.
    Tower(TowerKind),
}

impl Tile {
    /// Numeric cell value: `-1` for path, `0` for empty, the tower's base
    /// colour id otherwise.
    #[must_use]
    pub fn value(self) -> i8 {
        match self {
            Self::Path => -1,
            Self::Empty => 0,
            Self::Tower(kind) => kind.descriptor().base_color_id(),
        }
    }
}

/// Reasons a tower purchase may be rejected.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PurchaseError {
    /// No tower type is selected.
    NoSelection,
    /// The cursor rests on the enemy path.
    Unbuildable,
    /// The cursor rests on an existing tower.
    Occupied,
    /// The player cannot afford the selected tower.
    InsufficientGold {
        /// Price of the selected tower.
        price: u32,
        /// Gold available when the purchase was attempted.
        gold: u32,
    },
}

/// Terminal result of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Every wave was cleared.
    Won,
    /// Base health dropped to zero or below.
    Lost,
}

/// Immutable representation of a single enemy used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct EnemySnapshot {
    /// Identifier assigned to the enemy.
    pub id: EnemyId,
    /// Kind of the enemy.
    pub kind: EnemyKind,
    /// Position in tile units.
    pub position: Vec2,
    /// Remaining health.
    pub health: u32,
    /// Health the enemy spawned with.
    pub max_health: u32,
    /// Index of the path node the enemy is walking toward.
    pub node_at: usize,
}

/// Immutable representation of a single tower used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TowerSnapshot {
    /// Identifier assigned to the tower.
    pub id: TowerId,
    /// Kind of the tower.
    pub kind: TowerKind,
    /// Cell occupied by the tower.
    pub cell: CellCoord,
    /// Whether the tower may shoot this tick.
    pub ready_to_shoot: bool,
    /// Enemy chosen during the most recent tick, if any.
    pub target: Option<EnemyId>,
}

/// Transient shot segment recorded for the current tick's presentation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Projectile {
    /// Position of the firing tower.
    pub from: Vec2,
    /// Position of the target when it was hit.
    pub to: Vec2,
}

/// Immutable representation of a scheduled wave used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct WaveSnapshot {
    /// Zero-based position of the wave in the sequence.
    pub index: usize,
    /// Kind of enemy the wave releases.
    pub kind: EnemyKind,
    /// Ticks between spawns or batches.
    pub spawn_time: u32,
    /// Enemies released over the whole wave.
    pub total_amount: u32,
    /// Enemies released so far.
    pub current_amount: u32,
    /// Enemies per batch, zero for single spawns.
    pub batch_amount: u32,
}

/// Counter summarising how far the current wave has progressed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct WaveProgress {
    /// One-based number of the current wave.
    pub wave_number: usize,
    /// Number of waves in the sequence.
    pub wave_count: usize,
    /// Enemies still to spawn plus enemies alive on the board.
    pub remaining_enemies: u32,
    /// Enemies released over the whole current wave.
    pub total_enemies: u32,
}

/// Complete read-only state handed to presentation code between ticks.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct GameSnapshot {
    /// Ticks simulated so far.
    pub tick: u64,
    /// Board width in cells.
    pub columns: u32,
    /// Board height in cells.
    pub rows: u32,
    /// Row-major cell classification.
    pub tiles: Vec<Tile>,
    /// Cell highlighted by the build cursor.
    pub cursor: CellCoord,
    /// Remaining base health.
    pub health: i32,
    /// Gold available for purchases.
    pub gold: u32,
    /// Tower type the next purchase will build.
    pub selected: Option<TowerKind>,
    /// Live enemies in spawn order.
    pub enemies: Vec<EnemySnapshot>,
    /// Towers in placement order.
    pub towers: Vec<TowerSnapshot>,
    /// Shots fired during the last tick.
    pub projectiles: Vec<Projectile>,
    /// Current wave followed by the next scheduled waves.
    pub waves: Vec<WaveSnapshot>,
    /// Progress through the current wave.
    pub progress: WaveProgress,
    /// Whether ticks are suspended.
    pub paused: bool,
    /// Whether the run is still in progress.
    pub running: bool,
    /// Whether the run ended in victory.
    pub game_won: bool,
}

#[cfg(test)]
mod tests {
    use super::{CellCoord, Color, Direction, Tile, TowerKind};

    #[test]
    fn direction_offsets_are_unit_steps() {
        for direction in [
            Direction::North,
            Direction::East,
            Direction::South,
            Direction::West,
        ] {
            let (column, row) = direction.offset();
            assert_eq!(column.abs() + row.abs(), 1);
        }
    }

    #[test]
    fn tile_values_follow_board_classification() {
        assert_eq!(Tile::Path.value(), -1);
        assert_eq!(Tile::Empty.value(), 0);
        assert_eq!(Tile::Tower(TowerKind::Sniper).value(), 4);
    }

    #[test]
    fn scaled_color_darkens_proportionally() {
        let color = Color::from_rgb(200, 100, 0);
        assert_eq!(color.scaled(0.5), Color::from_rgb(100, 50, 0));
        assert_eq!(color.scaled(2.0), color);
        assert_eq!(color.scaled(-1.0), Color::from_rgb(0, 0, 0));
    }

    #[test]
    fn cell_points_use_column_then_row() {
        let point = CellCoord::new(3, -1).to_point();
        assert_eq!(point.x, 3.0);
        assert_eq!(point.y, -1.0);
    }
}
