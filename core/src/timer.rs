//! Tick-driven countdown used for every repeating cadence in the simulation.

/// Repeating countdown that signals once every `period` advances.
///
/// The timer never needs to be re-armed: after it fires the elapsed count
/// keeps the remainder beyond the period, so the cadence repeats identically
/// for as long as the owner keeps advancing it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timer {
    period: u32,
    elapsed: u32,
}

impl Timer {
    /// Creates a timer that fires on every `period`-th advance.
    ///
    /// A zero period fires on every advance.
    #[must_use]
    pub const fn new(period: u32) -> Self {
        Self { period, elapsed: 0 }
    }

    /// Advances the timer by one tick and reports whether it fired.
    pub fn advance(&mut self) -> bool {
        if self.period == 0 {
            return true;
        }
        self.elapsed = self.elapsed.saturating_add(1);
        if self.elapsed >= self.period {
            self.elapsed -= self.period;
            return true;
        }
        false
    }

    /// Number of advances between successive fires.
    #[must_use]
    pub const fn period(&self) -> u32 {
        self.period
    }

    /// Ticks accumulated toward the next fire.
    #[must_use]
    pub const fn elapsed(&self) -> u32 {
        self.elapsed
    }
}
