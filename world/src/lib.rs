#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state for Tower Defence.
//!
//! [`GameState`] owns the board, resources, enemies, towers and the wave
//! sequence. Adapters drive it exclusively through [`apply`] and observe it
//! through the [`query`] module and the [`Event`] values every mutation
//! reports.

mod config;
mod enemies;
mod towers;

pub use config::{ConfigError, GameConfig, DEFAULT_PATH, MAX_BOARD_SIDE, MAX_JITTER};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tower_defence_core::{
    CellCoord, Command, Direction, EnemyId, EnemyKind, Event, Projectile, PurchaseError, Tile,
    TowerId, TowerKind, Vec2,
};
use tower_defence_system_tower_targeting::TowerTargeting;
use tower_defence_system_waves::{Wave, WavePhase};
use tracing::{debug, info, trace};

use crate::{enemies::Enemy, towers::Tower};

/// Number of waves, starting with the current one, shown by the lookahead panel.
pub const LOOKAHEAD_WAVES: usize = 5;

/// Represents the authoritative Tower Defence game state.
#[derive(Debug)]
pub struct GameState {
    columns: u32,
    rows: u32,
    tiles: Vec<Tile>,
    path: Vec<CellCoord>,
    cursor: CellCoord,
    health: i32,
    gold: u32,
    selected: Option<TowerKind>,
    enemies: Vec<Enemy>,
    towers: Vec<Tower>,
    projectiles: Vec<Projectile>,
    waves: Vec<Wave>,
    current_wave: usize,
    running: bool,
    paused: bool,
    game_won: bool,
    tick_index: u64,
    next_enemy_id: u32,
    next_tower_id: u32,
    jitter: f32,
    rng: ChaCha8Rng,
    targeting: TowerTargeting,
}

impl GameState {
    /// Creates a running game from `config`.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let GameConfig {
            columns,
            rows,
            path,
            waves,
            health,
            gold,
            seed,
            jitter,
            start_paused,
        } = config;

        let mut state = Self {
            columns,
            rows,
            tiles: vec![Tile::Empty; columns as usize * rows as usize],
            path,
            cursor: CellCoord::new((columns / 2) as i32, (rows / 2) as i32),
            health,
            gold,
            selected: None,
            enemies: Vec::new(),
            towers: Vec::new(),
            projectiles: Vec::new(),
            waves,
            current_wave: 0,
            running: true,
            paused: start_paused,
            game_won: false,
            tick_index: 0,
            next_enemy_id: 0,
            next_tower_id: 0,
            jitter,
            rng: ChaCha8Rng::seed_from_u64(seed),
            targeting: TowerTargeting::new(),
        };
        for index in 0..state.path.len() {
            if let Some(tile) = state.cell_index(state.path[index]) {
                state.tiles[tile] = Tile::Path;
            }
        }

        info!(
            columns,
            rows,
            waves = state.waves.len(),
            health,
            gold,
            "game created"
        );
        Ok(state)
    }

    fn cell_index(&self, cell: CellCoord) -> Option<usize> {
        let column = u32::try_from(cell.column()).ok()?;
        let row = u32::try_from(cell.row()).ok()?;
        if column >= self.columns || row >= self.rows {
            return None;
        }
        Some(row as usize * self.columns as usize + column as usize)
    }

    fn enemy_index(&self, enemy: EnemyId) -> Option<usize> {
        self.enemies.iter().position(|candidate| candidate.id == enemy)
    }

    fn draw_jitter(&mut self) -> Vec2 {
        if self.jitter == 0.0 {
            return Vec2::ZERO;
        }
        let amplitude = self.jitter;
        Vec2::new(
            self.rng.gen_range(-amplitude..amplitude),
            self.rng.gen_range(-amplitude..amplitude),
        )
    }

    /// Runs one simulation step: enemies move, towers fire, then the current
    /// wave is polled. Does nothing while paused or after the run ended.
    pub fn tick(&mut self, out_events: &mut Vec<Event>) {
        if !self.running || self.paused {
            return;
        }

        self.tick_index = self.tick_index.saturating_add(1);
        out_events.push(Event::TimeAdvanced {
            tick: self.tick_index,
        });

        self.advance_enemies(out_events);
        self.tick_towers(out_events);
        self.tick_wave(out_events);
    }

    /// Moves every enemy one stride along the path. Enemies already standing
    /// on the final node leave the board and damage the base instead.
    pub fn advance_enemies(&mut self, out_events: &mut Vec<Event>) {
        let last_node = self.path.len() - 1;
        let mut passed = Vec::new();

        for enemy in self.enemies.iter_mut() {
            if enemy.node_at >= last_node {
                passed.push(enemy.id);
            } else {
                enemy.advance_toward(self.path[enemy.node_at + 1]);
            }
        }

        for enemy in passed {
            if let Some(index) = self.enemy_index(enemy) {
                self.pass_enemy(index, out_events);
            }
        }
    }

    /// Lets every tower pick a target, shoot when loaded and reload, in
    /// placement order. Projectiles from the previous tick are discarded.
    pub fn tick_towers(&mut self, out_events: &mut Vec<Event>) {
        self.projectiles.clear();

        for index in 0..self.towers.len() {
            let targeting = self.towers[index].targeting();
            let target = self
                .targeting
                .acquire(&targeting, self.enemies.iter().map(Enemy::snapshot));
            self.towers[index].target = target;

            let live_target = target
                .and_then(|enemy| self.enemy_index(enemy))
                .filter(|&enemy_index| !self.enemies[enemy_index].is_gone);

            if self.towers[index].cycle.try_fire(live_target.is_some()) {
                if let Some(enemy_index) = live_target {
                    self.shoot(index, enemy_index, out_events);
                }
            }
            self.towers[index].cycle.cool_down();
        }
    }

    fn shoot(&mut self, tower_index: usize, enemy_index: usize, out_events: &mut Vec<Event>) {
        let tower = &self.towers[tower_index];
        let enemy = &mut self.enemies[enemy_index];

        self.projectiles.push(Projectile {
            from: tower.cell.to_point(),
            to: enemy.position,
        });
        out_events.push(Event::ProjectileFired {
            tower: tower.id,
            enemy: enemy.id,
        });

        if enemy.damage_check(tower.damage) {
            self.towers[tower_index].target = None;
            self.kill_enemy(enemy_index, out_events);
        }
    }

    /// Polls the current wave, spawning whatever it releases. Once the wave
    /// is exhausted and the board is clear the next wave becomes current, or
    /// the run is won after the final wave.
    pub fn tick_wave(&mut self, out_events: &mut Vec<Event>) {
        let Some(wave) = self.waves.get_mut(self.current_wave) else {
            return;
        };
        let was_in_batch = wave.phase() == WavePhase::InBatch;
        let spawned = wave.tick();
        let phase = wave.phase();
        if phase == WavePhase::InBatch && !was_in_batch {
            debug!(wave = self.current_wave + 1, "wave batch opened");
        }
        let exhausted = phase == WavePhase::Exhausted;

        if let Some(kind) = spawned {
            let _ = self.spawn_enemy(kind, out_events);
        }

        if !exhausted || !self.enemies.is_empty() {
            return;
        }

        if self.current_wave + 1 >= self.waves.len() {
            if self.running {
                self.game_won = true;
                self.running = false;
                info!(tick = self.tick_index, "final wave cleared");
                out_events.push(Event::GameWon);
            }
            return;
        }

        self.current_wave += 1;
        info!(wave = self.current_wave + 1, "wave advanced");
        out_events.push(Event::WaveAdvanced {
            wave: self.current_wave,
        });
    }

    /// Places a new enemy of `kind` on the first path node.
    pub fn spawn_enemy(&mut self, kind: EnemyKind, out_events: &mut Vec<Event>) -> EnemyId {
        let id = EnemyId::new(self.next_enemy_id);
        self.next_enemy_id = self.next_enemy_id.wrapping_add(1);

        let jitter = self.draw_jitter();
        self.enemies.push(Enemy::spawn(id, kind, self.path[0], jitter));

        debug!(enemy = id.get(), ?kind, "enemy spawned");
        out_events.push(Event::EnemySpawned { enemy: id, kind });
        id
    }

    fn kill_enemy(&mut self, index: usize, out_events: &mut Vec<Event>) {
        let mut enemy = self.enemies.remove(index);
        enemy.is_gone = true;
        self.gold = self.gold.saturating_add(enemy.reward);

        debug!(enemy = enemy.id.get(), reward = enemy.reward, "enemy killed");
        out_events.push(Event::EnemyKilled {
            enemy: enemy.id,
            reward: enemy.reward,
        });
    }

    fn pass_enemy(&mut self, index: usize, out_events: &mut Vec<Event>) {
        let mut enemy = self.enemies.remove(index);
        enemy.is_gone = true;

        debug!(enemy = enemy.id.get(), damage = enemy.damage, "enemy passed");
        out_events.push(Event::EnemyPassed {
            enemy: enemy.id,
            damage: enemy.damage,
        });
        self.take_damage(enemy.damage, out_events);
    }

    /// Removes `amount` base health, ending the run once health drops to zero.
    pub fn take_damage(&mut self, amount: u32, out_events: &mut Vec<Event>) {
        let amount = i32::try_from(amount).unwrap_or(i32::MAX);
        self.health = self.health.saturating_sub(amount);

        if self.health <= 0 && self.running {
            self.running = false;
            info!(health = self.health, tick = self.tick_index, "base destroyed");
            out_events.push(Event::GameLost);
        }
    }

    /// Builds the selected tower on the cursor cell.
    ///
    /// A rejected purchase leaves the game untouched.
    pub fn buy_tower(&mut self, out_events: &mut Vec<Event>) -> Result<TowerId, PurchaseError> {
        match self.place_selected_tower() {
            Ok((tower, kind)) => {
                out_events.push(Event::TowerPlaced {
                    tower,
                    kind,
                    cell: self.cursor,
                });
                Ok(tower)
            }
            Err(reason) => {
                trace!(?reason, "tower purchase rejected");
                out_events.push(Event::TowerPurchaseRejected { reason });
                Err(reason)
            }
        }
    }

    fn place_selected_tower(&mut self) -> Result<(TowerId, TowerKind), PurchaseError> {
        let kind = self.selected.ok_or(PurchaseError::NoSelection)?;
        let tile_index = self
            .cell_index(self.cursor)
            .ok_or(PurchaseError::Unbuildable)?;
        match self.tiles[tile_index] {
            Tile::Path => return Err(PurchaseError::Unbuildable),
            Tile::Tower(_) => return Err(PurchaseError::Occupied),
            Tile::Empty => {}
        }

        let price = kind.descriptor().price();
        if self.gold < price {
            return Err(PurchaseError::InsufficientGold {
                price,
                gold: self.gold,
            });
        }

        let id = TowerId::new(self.next_tower_id);
        self.next_tower_id = self.next_tower_id.wrapping_add(1);
        self.gold -= price;
        self.tiles[tile_index] = Tile::Tower(kind);
        self.towers.push(Tower::new(id, kind, self.cursor));
        self.selected = None;

        info!(
            tower = id.get(),
            ?kind,
            column = self.cursor.column(),
            row = self.cursor.row(),
            gold = self.gold,
            "tower placed"
        );
        Ok((id, kind))
    }

    /// Moves the cursor one cell, wrapping around the board edges.
    pub fn move_cursor(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        let (delta_column, delta_row) = direction.offset();
        self.cursor = CellCoord::new(
            (self.cursor.column() + delta_column).rem_euclid(self.columns as i32),
            (self.cursor.row() + delta_row).rem_euclid(self.rows as i32),
        );
        out_events.push(Event::CursorMoved {
            cursor: self.cursor,
        });
    }

    /// Chooses the tower type the next purchase builds.
    pub fn select_tower_type(&mut self, kind: TowerKind, out_events: &mut Vec<Event>) {
        self.selected = Some(kind);
        out_events.push(Event::TowerTypeSelected { kind: Some(kind) });
    }

    /// Forgets the selected tower type.
    pub fn clear_selection(&mut self, out_events: &mut Vec<Event>) {
        self.selected = None;
        out_events.push(Event::TowerTypeSelected { kind: None });
    }

    /// Suspends or resumes ticking.
    pub fn toggle_pause(&mut self, out_events: &mut Vec<Event>) {
        self.paused = !self.paused;
        debug!(paused = self.paused, "pause toggled");
        out_events.push(Event::PauseToggled {
            paused: self.paused,
        });
    }
}

/// Applies the provided command to the game state, mutating it deterministically.
pub fn apply(state: &mut GameState, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::MoveCursor { direction } => state.move_cursor(direction, out_events),
        Command::SelectTowerType { kind } => state.select_tower_type(kind, out_events),
        Command::ClearSelection => state.clear_selection(out_events),
        Command::BuyTower => {
            let _ = state.buy_tower(out_events);
        }
        Command::TogglePause => state.toggle_pause(out_events),
        Command::Tick => state.tick(out_events),
    }
}

/// Query functions that provide read-only access to the game state.
pub mod query {
    use super::{GameState, LOOKAHEAD_WAVES};
    use tower_defence_core::{
        CellCoord, EnemySnapshot, GameOutcome, GameSnapshot, Projectile, Tile, TowerKind,
        TowerSnapshot, WaveProgress, WaveSnapshot, WELCOME_BANNER,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(_state: &GameState) -> &'static str {
        WELCOME_BANNER
    }

    /// Board width and height in cells.
    #[must_use]
    pub fn dimensions(state: &GameState) -> (u32, u32) {
        (state.columns, state.rows)
    }

    /// Row-major classification of every board cell.
    #[must_use]
    pub fn tiles(state: &GameState) -> &[Tile] {
        &state.tiles
    }

    /// Classification of a single cell, `None` outside the board.
    #[must_use]
    pub fn tile(state: &GameState, cell: CellCoord) -> Option<Tile> {
        state.cell_index(cell).map(|index| state.tiles[index])
    }

    /// Polyline the enemies walk.
    #[must_use]
    pub fn path(state: &GameState) -> &[CellCoord] {
        &state.path
    }

    /// Cell highlighted by the build cursor.
    #[must_use]
    pub fn cursor(state: &GameState) -> CellCoord {
        state.cursor
    }

    /// Captures the live enemies in spawn order.
    #[must_use]
    pub fn enemy_view(state: &GameState) -> Vec<EnemySnapshot> {
        state.enemies.iter().map(|enemy| enemy.snapshot()).collect()
    }

    /// Captures the towers in placement order.
    #[must_use]
    pub fn tower_view(state: &GameState) -> Vec<TowerSnapshot> {
        state.towers.iter().map(|tower| tower.snapshot()).collect()
    }

    /// Shots fired during the latest tick.
    #[must_use]
    pub fn projectiles(state: &GameState) -> &[Projectile] {
        &state.projectiles
    }

    /// Zero-based index of the current wave.
    #[must_use]
    pub fn current_wave_index(state: &GameState) -> usize {
        state.current_wave
    }

    /// Describes the current wave.
    #[must_use]
    pub fn current_wave(state: &GameState) -> Option<WaveSnapshot> {
        state
            .waves
            .get(state.current_wave)
            .map(|wave| wave.snapshot(state.current_wave))
    }

    /// Describes up to `count` waves starting with the current one.
    #[must_use]
    pub fn upcoming_waves(state: &GameState, count: usize) -> Vec<WaveSnapshot> {
        state
            .waves
            .iter()
            .enumerate()
            .skip(state.current_wave)
            .take(count)
            .map(|(index, wave)| wave.snapshot(index))
            .collect()
    }

    /// Counts how much of the current wave is still to be dealt with.
    #[must_use]
    pub fn wave_progress(state: &GameState) -> WaveProgress {
        let (remaining_spawns, total_enemies) = state
            .waves
            .get(state.current_wave)
            .map_or((0, 0), |wave| (wave.remaining(), wave.total_amount()));
        let live = u32::try_from(state.enemies.len()).unwrap_or(u32::MAX);

        WaveProgress {
            wave_number: state.current_wave + 1,
            wave_count: state.waves.len(),
            remaining_enemies: remaining_spawns.saturating_add(live),
            total_enemies,
        }
    }

    /// Tower type the next purchase builds.
    #[must_use]
    pub fn selected(state: &GameState) -> Option<TowerKind> {
        state.selected
    }

    /// Whether the current gold covers a tower of `kind`.
    #[must_use]
    pub fn can_afford(state: &GameState, kind: TowerKind) -> bool {
        state.gold >= kind.descriptor().price()
    }

    /// Remaining base health.
    #[must_use]
    pub fn health(state: &GameState) -> i32 {
        state.health
    }

    /// Gold available for purchases.
    #[must_use]
    pub fn gold(state: &GameState) -> u32 {
        state.gold
    }

    /// Ticks simulated so far.
    #[must_use]
    pub fn tick_index(state: &GameState) -> u64 {
        state.tick_index
    }

    /// Whether ticking is suspended.
    #[must_use]
    pub fn is_paused(state: &GameState) -> bool {
        state.paused
    }

    /// Whether the run is still in progress.
    #[must_use]
    pub fn is_running(state: &GameState) -> bool {
        state.running
    }

    /// Whether the run ended in victory.
    #[must_use]
    pub fn is_won(state: &GameState) -> bool {
        state.game_won
    }

    /// Terminal result of the run, once it ended.
    #[must_use]
    pub fn outcome(state: &GameState) -> Option<GameOutcome> {
        if state.running {
            None
        } else if state.game_won {
            Some(GameOutcome::Won)
        } else {
            Some(GameOutcome::Lost)
        }
    }

    /// Captures everything presentation code needs to draw a frame.
    #[must_use]
    pub fn snapshot(state: &GameState) -> GameSnapshot {
        GameSnapshot {
            tick: state.tick_index,
            columns: state.columns,
            rows: state.rows,
            tiles: state.tiles.clone(),
            cursor: state.cursor,
            health: state.health,
            gold: state.gold,
            selected: state.selected,
            enemies: enemy_view(state),
            towers: tower_view(state),
            projectiles: state.projectiles.clone(),
            waves: upcoming_waves(state, LOOKAHEAD_WAVES),
            progress: wave_progress(state),
            paused: state.paused,
            running: state.running,
            game_won: state.game_won,
        }
    }
}
