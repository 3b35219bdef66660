use tower_defence_core::TowerKind;
use tower_defence_system_tower_combat::FiringCycle;

fn shots_with_constant_target(kind: TowerKind, ticks: u32) -> Vec<u32> {
    let mut cycle = FiringCycle::new(kind.descriptor().firing_time());
    let mut shots = Vec::new();
    for tick in 1..=ticks {
        if cycle.try_fire(true) {
            shots.push(tick);
        }
        cycle.cool_down();
    }
    shots
}

#[test]
fn every_tower_fires_once_per_firing_time() {
    for kind in TowerKind::ALL {
        let firing_time = kind.descriptor().firing_time();
        let shots = shots_with_constant_target(kind, firing_time * 4);

        assert_eq!(shots.len(), 4, "{kind:?}");
        assert_eq!(shots[0], 1, "{kind:?} starts loaded");
        assert!(
            shots.windows(2).all(|pair| pair[1] - pair[0] == firing_time),
            "{kind:?} fired at {shots:?}"
        );
    }
}

#[test]
fn reload_continues_while_the_target_is_lost() {
    let mut cycle = FiringCycle::new(TowerKind::Heavy.descriptor().firing_time());
    assert!(cycle.try_fire(true));
    cycle.cool_down();

    for _ in 1..60 {
        assert!(!cycle.try_fire(false));
        cycle.cool_down();
    }

    assert!(cycle.ready_to_shoot());
    assert!(cycle.try_fire(true));
}
