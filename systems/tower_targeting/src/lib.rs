#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure system that picks a tower's target from the live enemy set.

use tower_defence_core::{EnemyId, EnemySnapshot, TargetingPriority, Vec2};

/// Parameters of the tower that is choosing a target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TargetingTower {
    /// Position of the tower in tile units.
    pub position: Vec2,
    /// Targeting radius in tiles; enemies exactly on the edge are out of range.
    pub max_range: f32,
    /// Policy used to order the candidates.
    pub priority: TargetingPriority,
}

/// Tower targeting system that reuses a scratch buffer to avoid repeated allocations.
#[derive(Debug, Default)]
pub struct TowerTargeting {
    candidates: Vec<Candidate>,
}

impl TowerTargeting {
    /// Creates a new tower targeting system with an empty scratch buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects the target for `tower` among `enemies`, which must be supplied
    /// in spawn order.
    ///
    /// `First` keeps spawn order; `Strongest` orders candidates by descending
    /// health and keeps spawn order between equally healthy enemies. The
    /// first candidate strictly within range wins.
    pub fn acquire<I>(&mut self, tower: &TargetingTower, enemies: I) -> Option<EnemyId>
    where
        I: IntoIterator<Item = EnemySnapshot>,
    {
        self.candidates.clear();
        self.candidates
            .extend(enemies.into_iter().map(|snapshot| Candidate {
                id: snapshot.id,
                position: snapshot.position,
                health: snapshot.health,
            }));

        if tower.priority == TargetingPriority::Strongest {
            self.candidates
                .sort_by(|left, right| right.health.cmp(&left.health));
        }

        let range_sq = tower.max_range * tower.max_range;
        self.candidates
            .iter()
            .find(|candidate| candidate.position.distance_squared(tower.position) < range_sq)
            .map(|candidate| candidate.id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Candidate {
    id: EnemyId,
    position: Vec2,
    health: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tower_defence_core::EnemyKind;

    fn enemy(id: u32, position: (f32, f32), health: u32) -> EnemySnapshot {
        EnemySnapshot {
            id: EnemyId::new(id),
            kind: EnemyKind::Regular,
            position: Vec2::new(position.0, position.1),
            health,
            max_health: 100,
            node_at: 0,
        }
    }

    fn tower(priority: TargetingPriority) -> TargetingTower {
        TargetingTower {
            position: Vec2::new(5.0, 5.0),
            max_range: 2.0,
            priority,
        }
    }

    #[test]
    fn first_priority_keeps_spawn_order() {
        let mut system = TowerTargeting::new();
        let enemies = vec![
            enemy(1, (20.0, 20.0), 50),
            enemy(2, (5.0, 6.0), 10),
            enemy(3, (6.0, 5.0), 90),
        ];

        let target = system.acquire(&tower(TargetingPriority::First), enemies);

        assert_eq!(target, Some(EnemyId::new(2)));
    }

    #[test]
    fn strongest_priority_prefers_the_healthiest_enemy_in_range() {
        let mut system = TowerTargeting::new();
        let enemies = vec![
            enemy(1, (20.0, 20.0), 500),
            enemy(2, (5.0, 6.0), 10),
            enemy(3, (6.0, 5.0), 90),
        ];

        let target = system.acquire(&tower(TargetingPriority::Strongest), enemies);

        assert_eq!(target, Some(EnemyId::new(3)));
    }

    #[test]
    fn equally_healthy_enemies_keep_spawn_order() {
        let mut system = TowerTargeting::new();
        let enemies = vec![
            enemy(7, (5.5, 5.0), 40),
            enemy(4, (4.5, 5.0), 40),
        ];

        let target = system.acquire(&tower(TargetingPriority::Strongest), enemies);

        assert_eq!(target, Some(EnemyId::new(7)));
    }

    #[test]
    fn enemy_on_the_range_boundary_is_out_of_range() {
        let mut system = TowerTargeting::new();
        let enemies = vec![enemy(1, (7.0, 5.0), 10)];

        let target = system.acquire(&tower(TargetingPriority::First), enemies);

        assert_eq!(target, None);
    }

    #[test]
    fn empty_enemy_set_produces_no_target() {
        let mut system = TowerTargeting::new();
        let target = system.acquire(&tower(TargetingPriority::Strongest), Vec::new());
        assert_eq!(target, None);
    }
}
