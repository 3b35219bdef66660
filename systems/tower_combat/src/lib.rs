#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Firing cycle shared by every tower: shoot when loaded, then reload.

use tower_defence_core::Timer;

/// Reload state machine owned by a single tower.
///
/// A new cycle starts loaded. Each tick the tower first calls
/// [`FiringCycle::try_fire`] with whether it holds a valid target and then
/// [`FiringCycle::cool_down`], so the reload starts on the tick of the shot.
#[derive(Clone, Debug)]
pub struct FiringCycle {
    reload: Timer,
    ready_to_shoot: bool,
}

impl FiringCycle {
    /// Creates a loaded cycle that needs `firing_time` ticks to reload.
    #[must_use]
    pub const fn new(firing_time: u32) -> Self {
        Self {
            reload: Timer::new(firing_time),
            ready_to_shoot: true,
        }
    }

    /// Spends the loaded shot if a target is available, returning whether the
    /// tower fired.
    pub fn try_fire(&mut self, has_target: bool) -> bool {
        if !self.ready_to_shoot || !has_target {
            return false;
        }
        self.ready_to_shoot = false;
        true
    }

    /// Advances the reload while the tower is empty.
    pub fn cool_down(&mut self) {
        if !self.ready_to_shoot && self.reload.advance() {
            self.ready_to_shoot = true;
        }
    }

    /// Whether the tower may shoot this tick.
    #[must_use]
    pub const fn ready_to_shoot(&self) -> bool {
        self.ready_to_shoot
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_cycle_is_loaded() {
        let cycle = FiringCycle::new(60);
        assert!(cycle.ready_to_shoot());
    }

    #[test]
    fn loaded_cycle_without_target_holds_its_shot() {
        let mut cycle = FiringCycle::new(3);
        for _ in 0..10 {
            assert!(!cycle.try_fire(false));
            cycle.cool_down();
        }
        assert!(cycle.try_fire(true));
    }

    #[test]
    fn reload_counts_the_firing_tick() {
        let mut cycle = FiringCycle::new(3);
        let mut shots = Vec::new();

        for tick in 1..=10 {
            if cycle.try_fire(true) {
                shots.push(tick);
            }
            cycle.cool_down();
        }

        assert_eq!(shots, vec![1, 4, 7, 10]);
    }

    #[test]
    fn empty_cycle_is_not_ready() {
        let mut cycle = FiringCycle::new(5);
        assert!(cycle.try_fire(true));
        assert!(!cycle.ready_to_shoot());
        assert!(!cycle.try_fire(true));
    }
}
