//! Time sources and simulation time
//!
//! Fixed 60Hz simulation step by default, with a 250ms clamp on any single
//! frame so a stall (breakpoint, suspend) cannot trigger an unbounded
//! catch-up burst.

use std::collections::VecDeque;
use std::time::Instant;

/// Default simulation tick rate (60 Hz = 16.666ms per tick)
pub const DEFAULT_TICK_RATE_HZ: u32 = 60;
pub const DEFAULT_FIXED_DELTA: f64 = 1.0 / DEFAULT_TICK_RATE_HZ as f64;

/// Largest frame time the run loop will accumulate in one iteration
pub const DEFAULT_MAX_FRAME_TIME: f64 = 0.25;

/// Clock reading in seconds.
///
/// Readings should never decrease. The run loop treats a backwards step as a
/// zero-length frame rather than defending against it further.
pub trait TimeSource {
    fn now(&mut self) -> f64;
}

/// Wall clock backed by [`Instant`], zeroed at construction
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for SystemClock {
    fn now(&mut self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

/// Clock that only moves when told to
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    now: f64,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&mut self, seconds: f64) {
        self.now += seconds;
    }

    pub fn set(&mut self, seconds: f64) {
        self.now = seconds;
    }
}

impl TimeSource for ManualClock {
    fn now(&mut self) -> f64 {
        self.now
    }
}

/// Replays a fixed sequence of frame times.
///
/// The first reading is the loop's baseline and returns the start time;
/// every later reading advances by the next scripted frame time. Once the
/// script runs out the clock stands still.
#[derive(Debug, Clone, Default)]
pub struct ScriptedClock {
    now: f64,
    started: bool,
    frames: VecDeque<f64>,
}

impl ScriptedClock {
    pub fn new(frame_times: impl IntoIterator<Item = f64>) -> Self {
        Self {
            now: 0.0,
            started: false,
            frames: frame_times.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.frames.len()
    }
}

impl TimeSource for ScriptedClock {
    fn now(&mut self) -> f64 {
        if !self.started {
            self.started = true;
            return self.now;
        }
        if let Some(dt) = self.frames.pop_front() {
            self.now += dt;
        }
        self.now
    }
}

/// Simulation time tracker
///
/// Advanced by exactly one fixed step per update, so it is independent of
/// how fast frames are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SimulationTime {
    tick_count: u64,
    elapsed: f64,
}

impl SimulationTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn advance_tick(&mut self, fixed_delta: f64) {
        self.tick_count += 1;
        self.elapsed += fixed_delta;
    }

    /// Total simulated seconds
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_step_is_sixtieth() {
        assert!((DEFAULT_FIXED_DELTA - 1.0 / 60.0).abs() < 1e-15);
    }

    #[test]
    fn scripted_clock_replays_frames() {
        let mut clock = ScriptedClock::new([0.5, 0.25]);
        assert_eq!(clock.now(), 0.0);
        assert_eq!(clock.now(), 0.5);
        assert_eq!(clock.now(), 0.75);
        assert_eq!(clock.remaining(), 0);
        assert_eq!(clock.now(), 0.75);
    }

    #[test]
    fn manual_clock_advances() {
        let mut clock = ManualClock::new();
        clock.advance(0.1);
        clock.advance(0.2);
        assert!((clock.now() - 0.3).abs() < 1e-12);
        clock.set(5.0);
        assert_eq!(clock.now(), 5.0);
    }

    #[test]
    fn system_clock_is_monotonic() {
        let mut clock = SystemClock::new();
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
        assert!(a >= 0.0);
    }

    #[test]
    fn simulation_time_counts_ticks() {
        let mut time = SimulationTime::new();
        for _ in 0..120 {
            time.advance_tick(DEFAULT_FIXED_DELTA);
        }
        assert_eq!(time.tick_count(), 120);
        assert!((time.elapsed() - 2.0).abs() < 1e-9);
        time.reset();
        assert_eq!(time.tick_count(), 0);
    }
}
