#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic steering that walks enemies along the fixed path polyline.
//!
//! Enemies never search for a route: they steer straight toward the next
//! path node, offset by a small per-enemy jitter, travelling a constant
//! distance every tick. The step that brings an enemy within one stride of
//! its node counts as arriving there; the small overshoot is left in place.

use tower_defence_core::{CellCoord, Vec2};

/// Result of advancing an enemy by a single tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    /// Position after the step.
    pub position: Vec2,
    /// Whether this step reached the destination.
    pub arrived: bool,
}

/// Point an enemy steers toward when walking to `node`.
#[must_use]
pub fn steering_target(node: CellCoord, jitter: Vec2) -> Vec2 {
    node.to_point() + jitter
}

/// Moves `position` by `speed` units toward `destination`.
///
/// The full stride is taken even when the destination is closer than
/// `speed`; the step is then reported as arrived. A position already on the
/// destination stays put and counts as arrived.
#[must_use]
pub fn step_toward(position: Vec2, destination: Vec2, speed: f32) -> Step {
    let difference = destination - position;
    let distance = difference.length();
    if distance <= f32::EPSILON {
        return Step {
            position,
            arrived: true,
        };
    }

    Step {
        position: position + difference / distance * speed,
        arrived: distance < speed,
    }
}
