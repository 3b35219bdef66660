#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Tower Defence adapters.
//!
//! Backends never touch the simulation. They receive a [`Scene`] built from a
//! [`GameSnapshot`] and redraw it whenever the driver asks them to.

mod text;

pub use text::TextBackend;

use anyhow::Result as AnyResult;
use glam::Vec2;
use std::time::Duration;
use tower_defence_core::{
    CellCoord, EnemyKind, GameSnapshot, Tile, TowerId, TowerKind, TICK_RATE_HZ,
};

/// Simulated time covered by a single frame.
pub const FRAME_DELTA: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE_HZ as u64);

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Converts the color back to byte RGB values, dropping alpha.
    #[must_use]
    pub fn to_rgb_u8(self) -> (u8, u8, u8) {
        let channel = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
        (channel(self.red), channel(self.green), channel(self.blue))
    }
}

impl From<tower_defence_core::Color> for Color {
    fn from(color: tower_defence_core::Color) -> Self {
        Self::from_rgb_u8(color.red(), color.green(), color.blue())
    }
}

/// Cell classification of the board together with the build cursor.
#[derive(Clone, Debug, PartialEq)]
pub struct BoardPresentation {
    /// Board width in cells.
    pub columns: u32,
    /// Board height in cells.
    pub rows: u32,
    /// Row-major cell classification.
    pub tiles: Vec<Tile>,
    /// Cell highlighted by the build cursor.
    pub cursor: CellCoord,
}

impl BoardPresentation {
    /// Classification of the cell at `column`, `row`, if it lies on the board.
    #[must_use]
    pub fn tile(&self, column: u32, row: u32) -> Option<Tile> {
        if column >= self.columns || row >= self.rows {
            return None;
        }
        self.tiles
            .get(row as usize * self.columns as usize + column as usize)
            .copied()
    }
}

/// Enemy drawn at its continuous position, darkened as it loses health.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EnemyPresentation {
    /// Kind of the enemy.
    pub kind: EnemyKind,
    /// Position in tile units.
    pub position: Vec2,
    /// Body color scaled by remaining health.
    pub color: Color,
    /// Body size in pixels.
    pub pixels: u32,
}

/// Tower drawn on its cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TowerPresentation {
    /// Identifier allocated to the tower by the simulation.
    pub id: TowerId,
    /// Kind of the tower.
    pub kind: TowerKind,
    /// Cell occupied by the tower.
    pub cell: CellCoord,
    /// Body color.
    pub color: Color,
}

/// Line segment describing a shot fired during the latest tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProjectileLine {
    /// Start of the shot in tile units.
    pub from: Vec2,
    /// End of the shot in tile units.
    pub to: Vec2,
}

/// Range circle of the selected tower type, centred on the cursor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangePreview {
    /// Centre of the circle in tile units.
    pub centre: Vec2,
    /// Radius in tiles.
    pub radius: f32,
}

/// Shop entry describing a purchasable tower type.
#[derive(Clone, Debug, PartialEq)]
pub struct TowerPanel {
    /// Number key associated with the tower type.
    pub key: u8,
    /// Tower type offered.
    pub kind: TowerKind,
    /// Whether the player can currently pay for it.
    pub affordable: bool,
    /// Whether it is the current selection.
    pub selected: bool,
}

/// Lookahead entry describing a scheduled wave.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WavePanel {
    /// One-based wave number.
    pub number: usize,
    /// Kind of enemy the wave releases.
    pub kind: EnemyKind,
    /// Enemies released over the whole wave.
    pub total_amount: u32,
    /// Enemies per batch, zero for single spawns.
    pub batch_amount: u32,
    /// Whether this is the wave being played.
    pub current: bool,
}

/// Lifecycle state shown in the status line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RunStatus {
    /// The simulation is advancing.
    Running,
    /// Ticks are suspended.
    Paused,
    /// Every wave was cleared.
    Won,
    /// Base health ran out.
    Lost,
}

/// Counters displayed around the board.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hud {
    /// Ticks simulated so far.
    pub tick: u64,
    /// Remaining base health.
    pub health: i32,
    /// Gold available for purchases.
    pub gold: u32,
    /// One-based number of the current wave.
    pub wave_number: usize,
    /// Number of waves in the run.
    pub wave_count: usize,
    /// Enemies of the current wave not yet dealt with.
    pub remaining_enemies: u32,
    /// Enemies in the current wave.
    pub total_enemies: u32,
    /// Lifecycle state of the run.
    pub status: RunStatus,
}

/// Scene description combining the board, its inhabitants and the HUD.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Board cells and cursor.
    pub board: BoardPresentation,
    /// Enemies in spawn order.
    pub enemies: Vec<EnemyPresentation>,
    /// Towers in placement order.
    pub towers: Vec<TowerPresentation>,
    /// Shots fired during the latest tick.
    pub projectiles: Vec<ProjectileLine>,
    /// Range of the selected tower type at the cursor, if one is selected.
    pub range_preview: Option<RangePreview>,
    /// Tower shop, one entry per tower type.
    pub tower_panels: Vec<TowerPanel>,
    /// Current wave followed by the next scheduled waves.
    pub wave_panels: Vec<WavePanel>,
    /// Counters and status.
    pub hud: Hud,
}

impl Scene {
    /// Builds the scene describing `snapshot`.
    #[must_use]
    pub fn from_snapshot(snapshot: &GameSnapshot) -> Self {
        let enemies = snapshot
            .enemies
            .iter()
            .map(|enemy| {
                let descriptor = enemy.kind.descriptor();
                let fraction = if enemy.max_health == 0 {
                    0.0
                } else {
                    enemy.health as f32 / enemy.max_health as f32
                };
                EnemyPresentation {
                    kind: enemy.kind,
                    position: enemy.position,
                    color: descriptor.color().scaled(fraction).into(),
                    pixels: descriptor.pixels(),
                }
            })
            .collect();

        let towers = snapshot
            .towers
            .iter()
            .map(|tower| TowerPresentation {
                id: tower.id,
                kind: tower.kind,
                cell: tower.cell,
                color: tower.kind.descriptor().color().into(),
            })
            .collect();

        let projectiles = snapshot
            .projectiles
            .iter()
            .map(|projectile| ProjectileLine {
                from: projectile.from,
                to: projectile.to,
            })
            .collect();

        let range_preview = snapshot.selected.map(|kind| RangePreview {
            centre: Vec2::new(
                snapshot.cursor.column() as f32,
                snapshot.cursor.row() as f32,
            ),
            radius: kind.descriptor().max_range(),
        });

        let tower_panels = TowerKind::ALL
            .iter()
            .zip(1u8..)
            .map(|(&kind, key)| TowerPanel {
                key,
                kind,
                affordable: snapshot.gold >= kind.descriptor().price(),
                selected: snapshot.selected == Some(kind),
            })
            .collect();

        let current_wave = snapshot.progress.wave_number.saturating_sub(1);
        let wave_panels = snapshot
            .waves
            .iter()
            .map(|wave| WavePanel {
                number: wave.index + 1,
                kind: wave.kind,
                total_amount: wave.total_amount,
                batch_amount: wave.batch_amount,
                current: wave.index == current_wave,
            })
            .collect();

        let status = if snapshot.game_won {
            RunStatus::Won
        } else if !snapshot.running {
            RunStatus::Lost
        } else if snapshot.paused {
            RunStatus::Paused
        } else {
            RunStatus::Running
        };

        Self {
            board: BoardPresentation {
                columns: snapshot.columns,
                rows: snapshot.rows,
                tiles: snapshot.tiles.clone(),
                cursor: snapshot.cursor,
            },
            enemies,
            towers,
            projectiles,
            range_preview,
            tower_panels,
            wave_panels,
            hud: Hud {
                tick: snapshot.tick,
                health: snapshot.health,
                gold: snapshot.gold,
                wave_number: snapshot.progress.wave_number,
                wave_count: snapshot.progress.wave_count,
                remaining_enemies: snapshot.progress.remaining_enemies,
                total_enemies: snapshot.progress.total_enemies,
                status,
            },
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title shown above the first frame.
    pub window_title: String,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            scene,
        }
    }
}

/// Decision returned by the driver after updating a frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FrameControl {
    /// Keep presenting frames.
    Continue,
    /// Present the current frame one last time and stop.
    Exit,
}

/// Rendering backend capable of presenting Tower Defence scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until the driver requests an exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame delta
    /// and refreshes the scene before it is rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, &mut Scene) -> FrameControl;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_defence_core::{
        EnemyId, EnemySnapshot, Projectile, TowerSnapshot, WaveProgress, WaveSnapshot,
    };

    pub(crate) fn snapshot() -> GameSnapshot {
        let mut tiles = vec![Tile::Empty; 9];
        tiles[1] = Tile::Path;
        tiles[4] = Tile::Path;
        tiles[5] = Tile::Tower(TowerKind::Heavy);

        GameSnapshot {
            tick: 42,
            columns: 3,
            rows: 3,
            tiles,
            cursor: CellCoord::new(0, 2),
            health: 17,
            gold: 60,
            selected: Some(TowerKind::Normal),
            enemies: vec![EnemySnapshot {
                id: EnemyId::new(0),
                kind: EnemyKind::Tough,
                position: Vec2::new(1.0, 0.9),
                health: 25,
                max_health: 50,
                node_at: 1,
            }],
            towers: vec![TowerSnapshot {
                id: TowerId::new(0),
                kind: TowerKind::Heavy,
                cell: CellCoord::new(2, 1),
                ready_to_shoot: false,
                target: Some(EnemyId::new(0)),
            }],
            projectiles: vec![Projectile {
                from: Vec2::new(2.0, 1.0),
                to: Vec2::new(1.0, 0.9),
            }],
            waves: vec![
                WaveSnapshot {
                    index: 1,
                    kind: EnemyKind::Tough,
                    spawn_time: 25,
                    total_amount: 25,
                    current_amount: 10,
                    batch_amount: 0,
                },
                WaveSnapshot {
                    index: 2,
                    kind: EnemyKind::Fast,
                    spawn_time: 45,
                    total_amount: 30,
                    current_amount: 0,
                    batch_amount: 5,
                },
            ],
            progress: WaveProgress {
                wave_number: 2,
                wave_count: 3,
                remaining_enemies: 16,
                total_enemies: 25,
            },
            paused: false,
            running: true,
            game_won: false,
        }
    }

    #[test]
    fn enemy_color_darkens_with_lost_health() {
        let scene = Scene::from_snapshot(&snapshot());
        let enemy = scene.enemies[0];

        assert_eq!(enemy.color.to_rgb_u8(), (110, 20, 20));
        assert_eq!(enemy.pixels, 10);
    }

    #[test]
    fn shop_marks_selection_and_affordability() {
        let scene = Scene::from_snapshot(&snapshot());
        let keys: Vec<u8> = scene.tower_panels.iter().map(|panel| panel.key).collect();

        assert_eq!(keys, vec![1, 2, 3, 4]);
        assert!(scene.tower_panels[0].selected);
        assert!(scene.tower_panels[0].affordable);
        assert!(!scene.tower_panels[1].affordable);
        assert_eq!(
            scene.range_preview,
            Some(RangePreview {
                centre: Vec2::new(0.0, 2.0),
                radius: 2.5,
            })
        );
    }

    #[test]
    fn lookahead_highlights_the_current_wave() {
        let scene = Scene::from_snapshot(&snapshot());

        assert_eq!(scene.wave_panels.len(), 2);
        assert_eq!(scene.wave_panels[0].number, 2);
        assert!(scene.wave_panels[0].current);
        assert!(!scene.wave_panels[1].current);
        assert_eq!(scene.hud.status, RunStatus::Running);
    }

    #[test]
    fn finished_runs_report_their_outcome() {
        let mut finished = snapshot();
        finished.running = false;
        assert_eq!(Scene::from_snapshot(&finished).hud.status, RunStatus::Lost);

        finished.game_won = true;
        assert_eq!(Scene::from_snapshot(&finished).hud.status, RunStatus::Won);
    }

    #[test]
    fn board_lookup_rejects_cells_off_the_board() {
        let scene = Scene::from_snapshot(&snapshot());

        assert_eq!(scene.board.tile(1, 1), Some(Tile::Path));
        assert_eq!(scene.board.tile(2, 1), Some(Tile::Tower(TowerKind::Heavy)));
        assert_eq!(scene.board.tile(3, 0), None);
    }

    #[test]
    fn frame_delta_matches_the_tick_rate() {
        assert_eq!(FRAME_DELTA.as_nanos(), 33_333_333);
    }
}
