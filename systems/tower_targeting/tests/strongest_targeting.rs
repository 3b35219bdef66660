use tower_defence_core::{EnemyId, EnemyKind, EnemySnapshot, TargetingPriority, Vec2};
use tower_defence_system_tower_targeting::{TargetingTower, TowerTargeting};

const RNG_MULTIPLIER: u64 = 6_364_136_223_846_793_005;

struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(RNG_MULTIPLIER).wrapping_add(1);
        self.0 >> 33
    }

    fn unit(&mut self) -> f32 {
        (self.next() % 10_000) as f32 / 10_000.0
    }
}

fn random_enemies(rng: &mut Lcg, count: u32) -> Vec<EnemySnapshot> {
    (0..count)
        .map(|id| EnemySnapshot {
            id: EnemyId::new(id),
            kind: EnemyKind::Tough,
            position: Vec2::new(rng.unit() * 12.0, rng.unit() * 12.0),
            health: (rng.next() % 60) as u32,
            max_health: 60,
            node_at: 0,
        })
        .collect()
}

#[test]
fn strongest_target_is_never_weaker_than_any_enemy_in_range() {
    let mut rng = Lcg(0x5eed_1234_abcd_0001);
    let mut system = TowerTargeting::new();
    let tower = TargetingTower {
        position: Vec2::new(6.0, 6.0),
        max_range: 4.5,
        priority: TargetingPriority::Strongest,
    };
    let range_sq = tower.max_range * tower.max_range;

    for round in 0..200 {
        let enemies = random_enemies(&mut rng, 1 + (round % 12));
        let in_range: Vec<&EnemySnapshot> = enemies
            .iter()
            .filter(|enemy| enemy.position.distance_squared(tower.position) < range_sq)
            .collect();

        let target = system.acquire(&tower, enemies.iter().copied());

        match target {
            None => assert!(in_range.is_empty(), "round {round}: missed an enemy"),
            Some(id) => {
                let chosen = in_range
                    .iter()
                    .find(|enemy| enemy.id == id)
                    .expect("target must be within range");
                assert!(
                    in_range.iter().all(|enemy| chosen.health >= enemy.health),
                    "round {round}: weaker target chosen"
                );
            }
        }
    }
}

#[test]
fn first_target_is_the_earliest_spawned_enemy_in_range() {
    let mut rng = Lcg(0x0dd_ba11);
    let mut system = TowerTargeting::new();
    let tower = TargetingTower {
        position: Vec2::new(6.0, 6.0),
        max_range: 2.5,
        priority: TargetingPriority::First,
    };

    for _ in 0..100 {
        let enemies = random_enemies(&mut rng, 8);
        let expected = enemies
            .iter()
            .find(|enemy| enemy.position.distance_squared(tower.position) < 6.25)
            .map(|enemy| enemy.id);

        assert_eq!(system.acquire(&tower, enemies), expected);
    }
}
