//! Authoritative tower state management utilities.

use tower_defence_core::{CellCoord, EnemyId, TowerId, TowerKind, TowerSnapshot};
use tower_defence_system_tower_combat::FiringCycle;
use tower_defence_system_tower_targeting::TargetingTower;

/// Tower stored inside the game state.
#[derive(Clone, Debug)]
pub(crate) struct Tower {
    /// Identifier allocated by the game state for the tower.
    pub(crate) id: TowerId,
    /// Kind of tower that was constructed.
    pub(crate) kind: TowerKind,
    /// Cell occupied by the tower.
    pub(crate) cell: CellCoord,
    pub(crate) damage: u32,
    pub(crate) cycle: FiringCycle,
    /// Enemy chosen during the latest tick; may refer to an enemy that has
    /// since left the board.
    pub(crate) target: Option<EnemyId>,
}

impl Tower {
    /// Builds a ready tower of `kind` standing on `cell`.
    pub(crate) fn new(id: TowerId, kind: TowerKind, cell: CellCoord) -> Self {
        let descriptor = kind.descriptor();
        Self {
            id,
            kind,
            cell,
            damage: descriptor.damage(),
            cycle: FiringCycle::new(descriptor.firing_time()),
            target: None,
        }
    }

    /// Targeting parameters derived from the tower's kind and cell.
    pub(crate) fn targeting(&self) -> TargetingTower {
        let descriptor = self.kind.descriptor();
        TargetingTower {
            position: self.cell.to_point(),
            max_range: descriptor.max_range(),
            priority: descriptor.targeting_priority(),
        }
    }

    pub(crate) fn snapshot(&self) -> TowerSnapshot {
        TowerSnapshot {
            id: self.id,
            kind: self.kind,
            cell: self.cell,
            ready_to_shoot: self.cycle.ready_to_shoot(),
            target: self.target,
        }
    }
}
