//! Live enemies walking the path.

use tower_defence_core::{CellCoord, EnemyId, EnemyKind, EnemySnapshot, Vec2};
use tower_defence_system_movement::{steering_target, step_toward};

/// Enemy stored inside the game state.
#[derive(Clone, Debug)]
pub(crate) struct Enemy {
    pub(crate) id: EnemyId,
    pub(crate) kind: EnemyKind,
    pub(crate) position: Vec2,
    pub(crate) jitter: Vec2,
    speed: f32,
    pub(crate) damage: u32,
    pub(crate) health: u32,
    pub(crate) max_health: u32,
    pub(crate) reward: u32,
    /// Index of the path node most recently reached.
    pub(crate) node_at: usize,
    pub(crate) is_gone: bool,
}

impl Enemy {
    /// Creates an enemy standing on `entry` with full health.
    pub(crate) fn spawn(id: EnemyId, kind: EnemyKind, entry: CellCoord, jitter: Vec2) -> Self {
        let descriptor = kind.descriptor();
        Self {
            id,
            kind,
            position: entry.to_point(),
            jitter,
            speed: descriptor.speed(),
            damage: descriptor.damage(),
            health: descriptor.health(),
            max_health: descriptor.health(),
            reward: descriptor.reward(),
            node_at: 0,
            is_gone: false,
        }
    }

    /// Takes one stride toward `node`, counting it as reached when the stride
    /// covers the remaining distance.
    pub(crate) fn advance_toward(&mut self, node: CellCoord) {
        let step = step_toward(
            self.position,
            steering_target(node, self.jitter),
            self.speed,
        );
        self.position = step.position;
        if step.arrived {
            self.node_at += 1;
        }
    }

    /// Applies `amount` damage and reports whether the enemy died.
    pub(crate) fn damage_check(&mut self, amount: u32) -> bool {
        self.health = self.health.saturating_sub(amount);
        self.health == 0
    }

    pub(crate) fn snapshot(&self) -> EnemySnapshot {
        EnemySnapshot {
            id: self.id,
            kind: self.kind,
            position: self.position,
            health: self.health,
            max_health: self.max_health,
            node_at: self.node_at,
        }
    }
}
