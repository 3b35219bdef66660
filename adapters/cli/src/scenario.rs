//! TOML scenario files layered over the built-in game configuration.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use serde::Deserialize;
use tower_defence_core::{CellCoord, EnemyKind};
use tower_defence_system_waves::Wave;
use tower_defence_world::GameConfig;

/// Scenario overrides; every field falls back to the base configuration.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct Scenario {
    columns: Option<u32>,
    rows: Option<u32>,
    health: Option<i32>,
    gold: Option<u32>,
    seed: Option<u64>,
    jitter: Option<f32>,
    path: Option<Vec<[i32; 2]>>,
    waves: Option<Vec<WaveSpec>>,
}

/// One `[[waves]]` table.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct WaveSpec {
    kind: EnemyKind,
    spawn_time: u32,
    total_amount: u32,
    #[serde(default)]
    spawn_subtime: u32,
    #[serde(default)]
    batch_amount: u32,
}

impl Scenario {
    /// Reads and parses the scenario stored at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("invalid scenario {}", path.display()))
    }

    pub(crate) fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Applies the overrides on top of `base`.
    pub(crate) fn apply_to(self, mut base: GameConfig) -> GameConfig {
        if let Some(columns) = self.columns {
            base.columns = columns;
        }
        if let Some(rows) = self.rows {
            base.rows = rows;
        }
        if let Some(health) = self.health {
            base.health = health;
        }
        if let Some(gold) = self.gold {
            base.gold = gold;
        }
        if let Some(seed) = self.seed {
            base.seed = seed;
        }
        if let Some(jitter) = self.jitter {
            base.jitter = jitter;
        }
        if let Some(path) = self.path {
            base.path = path
                .into_iter()
                .map(|[column, row]| CellCoord::new(column, row))
                .collect();
        }
        if let Some(waves) = self.waves {
            base.waves = waves.into_iter().map(WaveSpec::into_wave).collect();
        }
        base
    }
}

impl WaveSpec {
    fn into_wave(self) -> Wave {
        Wave::batched(
            self.kind,
            self.spawn_time,
            self.total_amount,
            self.spawn_subtime,
            self.batch_amount,
        )
    }
}
