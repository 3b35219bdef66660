use tower_defence_core::EnemyKind;
use tower_defence_system_waves::{test_waves, Wave, WavePhase};

fn release_ticks(wave: &mut Wave, ticks: u32) -> Vec<u32> {
    (1..=ticks).filter(|_| wave.tick().is_some()).collect()
}

#[test]
fn single_spawn_wave_releases_on_every_period() {
    let mut wave = Wave::new(EnemyKind::Regular, 5, 4);

    let released = release_ticks(&mut wave, 40);

    assert_eq!(released, vec![5, 10, 15, 20]);
    assert_eq!(wave.current_amount(), 4);
    assert_eq!(wave.phase(), WavePhase::Exhausted);
    assert!((0..50).all(|_| wave.tick().is_none()));
}

#[test]
fn batched_wave_releases_groups_gated_by_the_base_timer() {
    let mut wave = Wave::batched(EnemyKind::Fast, 4, 6, 2, 3);

    let released = release_ticks(&mut wave, 40);

    assert_eq!(released, vec![6, 8, 10, 16, 18, 20]);
    assert_eq!(wave.current_amount(), 6);
    assert_eq!(wave.phase(), WavePhase::Exhausted);
}

#[test]
fn at_most_one_enemy_is_released_per_tick() {
    let mut wave = Wave::batched(EnemyKind::Regular, 1, 30, 0, 10);
    let mut total = 0;

    for _ in 0..100 {
        if let Some(kind) = wave.tick() {
            assert_eq!(kind, EnemyKind::Regular);
            total += 1;
        }
        assert!(wave.current_amount() <= wave.total_amount());
        assert!(wave.current_batch_amount() <= wave.batch_amount());
    }

    assert_eq!(total, 30);
}

#[test]
fn test_sequence_batches_fast_enemies_before_the_boss() {
    let mut waves = test_waves();
    let first = &mut waves[0];

    let released = release_ticks(first, 60);

    assert_eq!(released.len(), 18);
    assert_eq!(released.first(), Some(&21));
    assert_eq!(released.last(), Some(&38));
    assert_eq!(waves[1].kind(), EnemyKind::Boss);
}
