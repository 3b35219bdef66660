#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic wave scheduler that decides when enemies enter the path.
//!
//! A [`Wave`] is polled once per simulation tick while it is the current
//! wave and releases at most one enemy per poll. Single-spawn waves release
//! an enemy every time the base timer fires. Batched waves use the base timer
//! to open a batch and a faster sub-timer to release the batch members.

mod tables;

pub use tables::{default_waves, test_waves};

use tower_defence_core::{EnemyKind, Timer, WaveSnapshot};

/// Observable state of a wave's scheduling state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WavePhase {
    /// Waiting for the base timer to fire.
    Idle,
    /// Releasing the members of an open batch.
    InBatch,
    /// Every enemy of the wave has been released.
    Exhausted,
}

/// Scheduler that releases a fixed number of enemies of one kind.
#[derive(Clone, Debug)]
pub struct Wave {
    kind: EnemyKind,
    spawn_timer: Timer,
    total_amount: u32,
    current_amount: u32,
    batch: Option<Batch>,
}

impl Wave {
    /// Creates a wave that releases one enemy every `spawn_time` ticks.
    #[must_use]
    pub const fn new(kind: EnemyKind, spawn_time: u32, total_amount: u32) -> Self {
        Self {
            kind,
            spawn_timer: Timer::new(spawn_time),
            total_amount,
            current_amount: 0,
            batch: None,
        }
    }

    /// Creates a wave that releases `batch_amount` enemies, `spawn_subtime`
    /// ticks apart, every time the `spawn_time` timer fires.
    ///
    /// A zero `batch_amount` degrades to a single-spawn wave.
    #[must_use]
    pub const fn batched(
        kind: EnemyKind,
        spawn_time: u32,
        total_amount: u32,
        spawn_subtime: u32,
        batch_amount: u32,
    ) -> Self {
        let batch = if batch_amount == 0 {
            None
        } else {
            Some(Batch {
                subtimer: Timer::new(spawn_subtime),
                amount: batch_amount,
                current: 0,
                inside: false,
            })
        };

        Self {
            kind,
            spawn_timer: Timer::new(spawn_time),
            total_amount,
            current_amount: 0,
            batch,
        }
    }

    /// Advances the scheduler by one tick, returning the enemy to spawn, if any.
    pub fn tick(&mut self) -> Option<EnemyKind> {
        if self.current_amount >= self.total_amount {
            return None;
        }

        let Some(batch) = self.batch.as_mut() else {
            if self.spawn_timer.advance() {
                self.current_amount += 1;
                return Some(self.kind);
            }
            return None;
        };

        if !batch.inside {
            if self.spawn_timer.advance() {
                batch.inside = true;
            }
            return None;
        }

        if !batch.subtimer.advance() {
            return None;
        }

        batch.current += 1;
        self.current_amount += 1;
        if batch.current >= batch.amount || self.current_amount >= self.total_amount {
            batch.inside = false;
            batch.current = 0;
        }
        Some(self.kind)
    }

    /// Reports the current state of the scheduling state machine.
    #[must_use]
    pub fn phase(&self) -> WavePhase {
        if self.is_exhausted() {
            WavePhase::Exhausted
        } else if self.batch.as_ref().is_some_and(|batch| batch.inside) {
            WavePhase::InBatch
        } else {
            WavePhase::Idle
        }
    }

    /// Reports whether every enemy of the wave has been released.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.current_amount >= self.total_amount
    }

    /// Kind of enemy the wave releases.
    #[must_use]
    pub const fn kind(&self) -> EnemyKind {
        self.kind
    }

    /// Ticks between single spawns or between batches.
    #[must_use]
    pub const fn spawn_time(&self) -> u32 {
        self.spawn_timer.period()
    }

    /// Ticks between members of a batch, if the wave is batched.
    #[must_use]
    pub fn spawn_subtime(&self) -> Option<u32> {
        self.batch.as_ref().map(|batch| batch.subtimer.period())
    }

    /// Enemies released over the whole wave.
    #[must_use]
    pub const fn total_amount(&self) -> u32 {
        self.total_amount
    }

    /// Enemies released so far.
    #[must_use]
    pub const fn current_amount(&self) -> u32 {
        self.current_amount
    }

    /// Enemies per batch, zero for single-spawn waves.
    #[must_use]
    pub fn batch_amount(&self) -> u32 {
        self.batch.as_ref().map_or(0, |batch| batch.amount)
    }

    /// Members of the open batch released so far.
    #[must_use]
    pub fn current_batch_amount(&self) -> u32 {
        self.batch.as_ref().map_or(0, |batch| batch.current)
    }

    /// Enemies still waiting to be released.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.total_amount.saturating_sub(self.current_amount)
    }

    /// Captures a read-only description of the wave at `index` in its sequence.
    #[must_use]
    pub fn snapshot(&self, index: usize) -> WaveSnapshot {
        WaveSnapshot {
            index,
            kind: self.kind,
            spawn_time: self.spawn_time(),
            total_amount: self.total_amount,
            current_amount: self.current_amount,
            batch_amount: self.batch_amount(),
        }
    }
}

#[derive(Clone, Debug)]
struct Batch {
    subtimer: Timer,
    amount: u32,
    current: u32,
    inside: bool,
}
