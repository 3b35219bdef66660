use tower_defence_core::{CellCoord, Vec2};
use tower_defence_system_movement::{step_toward, steering_target, Step};

fn approx(a: Vec2, b: Vec2) -> bool {
    (a - b).length() < 1e-5
}

#[test]
fn step_travels_exactly_one_stride() {
    let Step { position, arrived } = step_toward(Vec2::ZERO, Vec2::new(3.0, 4.0), 0.5);

    assert!(approx(position, Vec2::new(0.3, 0.4)));
    assert!(!arrived);
}

#[test]
fn final_step_overshoots_and_reports_arrival() {
    let Step { position, arrived } = step_toward(Vec2::ZERO, Vec2::new(0.05, 0.0), 0.1);

    assert!(arrived);
    assert!(approx(position, Vec2::new(0.1, 0.0)));
}

#[test]
fn walking_a_straight_segment_takes_distance_over_speed_steps() {
    let destination = steering_target(CellCoord::new(3, 3), Vec2::ZERO);
    let mut position = CellCoord::new(3, 0).to_point();
    let mut steps = 0;

    loop {
        let step = step_toward(position, destination, 0.1);
        position = step.position;
        steps += 1;
        if step.arrived {
            break;
        }
        assert!(steps < 100, "enemy never arrived");
    }

    assert!((30..=31).contains(&steps), "took {steps} steps");
    assert!((position - destination).length() < 0.1 + 1e-4);
}
