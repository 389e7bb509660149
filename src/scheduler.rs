//! Fixed-rate tick scheduling, decoupled from the render frame rate.
//!
//! The scheduler is a plain accumulator the host advances with each frame's
//! delta; it only reports how many generations are due and never touches the
//! grid itself, so cadence is testable without an engine loop.

use std::time::Duration;

use bevy::prelude::Resource;
use log::warn;

/// Tick rate bounds in generations per second.
pub const MIN_TICK_RATE: f32 = 1.0;
pub const MAX_TICK_RATE: f32 = 200.0;

#[derive(Clone, Debug, Resource)]
pub struct TickScheduler {
    rate: f32,
    period: Duration,
    accumulator: Duration,
    running: bool,
}

impl Default for TickScheduler {
    fn default() -> Self {
        Self::new(10.0)
    }
}

impl TickScheduler {
    /// Create a stopped scheduler at the given rate.
    pub fn new(rate: f32) -> Self {
        let rate = clamp_rate(rate);
        Self {
            rate,
            period: Duration::from_secs_f32(1.0 / rate),
            accumulator: Duration::ZERO,
            running: false,
        }
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Begin ticking at the configured rate. Idempotent.
    pub fn start(&mut self) {
        self.running = true;
    }

    /// Stop ticking. Idempotent. Drains the accumulator so a tick that was
    /// already due cannot fire on a later `advance`.
    pub fn stop(&mut self) {
        self.running = false;
        self.accumulator = Duration::ZERO;
    }

    /// Change the rate. Takes effect on the very next `advance`, running or
    /// not; the accumulated partial period is kept.
    pub fn set_rate(&mut self, rate: f32) {
        self.rate = clamp_rate(rate);
        self.period = Duration::from_secs_f32(1.0 / self.rate);
    }

    /// Advance by one frame delta and return how many generations are due.
    /// Always 0 while stopped.
    pub fn advance(&mut self, dt: Duration) -> u32 {
        if !self.running {
            return 0;
        }
        self.accumulator += dt;
        let mut due = 0;
        while self.accumulator >= self.period {
            self.accumulator -= self.period;
            due += 1;
        }
        due
    }
}

fn clamp_rate(rate: f32) -> f32 {
    let clamped = rate.clamp(MIN_TICK_RATE, MAX_TICK_RATE);
    if clamped != rate {
        warn!("tick rate {rate} out of range, clamped to {clamped}");
    }
    clamped
}

/// Counters the host displays alongside the simulation.
#[derive(Clone, Copy, Debug, Default, Resource)]
pub struct SimStats {
    pub generation: u64,
}
