//! Built-in wave sequences.

use tower_defence_core::EnemyKind;

use crate::Wave;

/// Ten-wave campaign ending with a single boss.
#[must_use]
pub fn default_waves() -> Vec<Wave> {
    vec![
        Wave::new(EnemyKind::Regular, 50, 20),
        Wave::new(EnemyKind::Regular, 25, 20),
        Wave::new(EnemyKind::Tough, 25, 25),
        Wave::new(EnemyKind::Fast, 20, 30),
        Wave::batched(EnemyKind::Regular, 40, 60, 1, 3),
        Wave::new(EnemyKind::Tougher, 30, 20),
        Wave::batched(EnemyKind::Fast, 45, 30, 1, 5),
        Wave::new(EnemyKind::RegularPlus, 10, 30),
        Wave::batched(EnemyKind::Tougher, 45, 30, 1, 3),
        Wave::new(EnemyKind::Boss, 1, 1),
    ]
}

/// Short sequence used to exercise batching and the final wave quickly.
#[must_use]
pub fn test_waves() -> Vec<Wave> {
    vec![
        Wave::batched(EnemyKind::Fast, 20, 18, 1, 20),
        Wave::new(EnemyKind::Boss, 1, 1),
    ]
}
