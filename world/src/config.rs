//! Construction parameters for a game and their validation.

use thiserror::Error;
use tower_defence_core::CellCoord;
use tower_defence_system_waves::{default_waves, Wave};

/// Largest accepted board side, in cells.
pub const MAX_BOARD_SIDE: u32 = 1024;

/// Largest accepted jitter amplitude, in tiles. Keeps enemies inside the
/// path cell they are walking through.
pub const MAX_JITTER: f32 = 0.5;

/// Path enemies follow on the default board, entering above it and leaving below.
pub const DEFAULT_PATH: [(i32, i32); 21] = [
    (3, -1),
    (3, 0),
    (3, 1),
    (3, 2),
    (3, 3),
    (4, 3),
    (5, 3),
    (6, 3),
    (7, 3),
    (8, 3),
    (8, 4),
    (8, 5),
    (8, 6),
    (8, 7),
    (8, 8),
    (7, 8),
    (6, 8),
    (6, 9),
    (6, 10),
    (6, 11),
    (6, 12),
];

const DEFAULT_SEED: u64 = 0x7d3f_a1c9_52e4_0b86;

/// Everything needed to start a run.
#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Board width in cells.
    pub columns: u32,
    /// Board height in cells.
    pub rows: u32,
    /// Polyline of cells enemies walk, from entry to exit.
    pub path: Vec<CellCoord>,
    /// Waves released in order.
    pub waves: Vec<Wave>,
    /// Starting base health.
    pub health: i32,
    /// Starting gold.
    pub gold: u32,
    /// Seed for the enemy jitter generator.
    pub seed: u64,
    /// Largest per-axis offset an enemy may steer away from the path.
    pub jitter: f32,
    /// Whether the run starts paused.
    pub start_paused: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: 12,
            rows: 12,
            path: DEFAULT_PATH
                .iter()
                .map(|&(column, row)| CellCoord::new(column, row))
                .collect(),
            waves: default_waves(),
            health: 20,
            gold: 150,
            seed: DEFAULT_SEED,
            jitter: 0.2,
            start_paused: true,
        }
    }
}

impl GameConfig {
    /// Checks the configuration for values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.columns == 0 || self.rows == 0 {
            return Err(ConfigError::EmptyBoard {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if self.columns > MAX_BOARD_SIDE || self.rows > MAX_BOARD_SIDE {
            return Err(ConfigError::OversizedBoard {
                columns: self.columns,
                rows: self.rows,
            });
        }
        if self.path.len() < 2 {
            return Err(ConfigError::PathTooShort {
                length: self.path.len(),
            });
        }
        if self.waves.is_empty() {
            return Err(ConfigError::NoWaves);
        }
        if !(0.0..=MAX_JITTER).contains(&self.jitter) {
            return Err(ConfigError::InvalidJitter {
                jitter: self.jitter,
            });
        }
        Ok(())
    }
}

/// Reasons a [`GameConfig`] is rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// The board has no cells.
    #[error("board must have at least one cell, got {columns}x{rows}")]
    EmptyBoard {
        /// Requested width.
        columns: u32,
        /// Requested height.
        rows: u32,
    },
    /// The board exceeds [`MAX_BOARD_SIDE`] on some axis.
    #[error("board {columns}x{rows} exceeds the {max} cell limit per side", max = MAX_BOARD_SIDE)]
    OversizedBoard {
        /// Requested width.
        columns: u32,
        /// Requested height.
        rows: u32,
    },
    /// The path cannot lead anywhere.
    #[error("path needs at least two nodes, got {length}")]
    PathTooShort {
        /// Number of nodes supplied.
        length: usize,
    },
    /// No waves were scheduled.
    #[error("at least one wave is required")]
    NoWaves,
    /// The jitter amplitude is negative, not a number or wider than half a tile.
    #[error("jitter must lie between 0 and {max} tiles, got {jitter}", max = MAX_JITTER)]
    InvalidJitter {
        /// Rejected amplitude.
        jitter: f32,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.path.len(), 21);
        assert!(config.start_paused);
    }

    #[test]
    fn rejects_degenerate_configs() {
        let mut config = GameConfig::default();
        config.rows = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::EmptyBoard { rows: 0, .. })
        ));

        let mut config = GameConfig::default();
        config.columns = MAX_BOARD_SIDE + 1;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::OversizedBoard { .. })
        ));

        let mut config = GameConfig::default();
        config.path.truncate(1);
        assert_eq!(
            config.validate(),
            Err(ConfigError::PathTooShort { length: 1 })
        );

        let mut config = GameConfig::default();
        config.waves.clear();
        assert_eq!(config.validate(), Err(ConfigError::NoWaves));

        let mut config = GameConfig::default();
        config.jitter = f32::NAN;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidJitter { .. })
        ));
    }

    #[test]
    fn jitter_is_bounded_to_half_a_tile() {
        for jitter in [-0.1, MAX_JITTER + 0.01, 1e6, f32::MAX, f32::INFINITY] {
            let config = GameConfig {
                jitter,
                ..GameConfig::default()
            };
            assert!(
                matches!(config.validate(), Err(ConfigError::InvalidJitter { .. })),
                "jitter {jitter} was accepted"
            );
        }

        for jitter in [0.0, 0.2, MAX_JITTER] {
            let config = GameConfig {
                jitter,
                ..GameConfig::default()
            };
            assert_eq!(config.validate(), Ok(()));
        }
    }

    #[test]
    fn errors_render_human_readable_messages() {
        let message = ConfigError::PathTooShort { length: 0 }.to_string();
        assert_eq!(message, "path needs at least two nodes, got 0");
    }
}
