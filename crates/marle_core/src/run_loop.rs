//! Fixed-timestep run loop
//!
//! Each iteration measures the real time since the previous one, adds it to
//! an accumulator and drains the accumulator in whole fixed steps, calling
//! `update` once per step. Whatever is left over (always less than one step)
//! becomes the interpolation alpha handed to `render`. Platform events are
//! pumped last, and a handler that stops the loop takes effect at the top of
//! the next iteration.
//!
//! Simulation therefore always advances in identical increments no matter
//! how fast or slow frames are rendered.

use crate::config::validate_timing;
use crate::error::EngineError;
use crate::time::{SimulationTime, TimeSource, DEFAULT_FIXED_DELTA, DEFAULT_MAX_FRAME_TIME};
use marle_metrics::FrameTimer;

/// Frames averaged for the periodic frame-rate log line
const STATS_WINDOW: usize = 120;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Running,
    /// Terminal: a stopped loop never runs again
    Stopped,
}

/// Cooperative cancellation flag shared with update, render and event code
#[derive(Debug, Clone)]
pub struct LoopControl {
    running: bool,
}

impl LoopControl {
    pub fn new() -> Self {
        Self { running: true }
    }

    /// Ask the loop to stop. The current iteration still finishes.
    pub fn stop(&mut self) {
        if self.running {
            tracing::debug!("run loop stop requested");
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }
}

impl Default for LoopControl {
    fn default() -> Self {
        Self::new()
    }
}

/// What update and render calls can see of the loop
pub struct LoopContext<'a> {
    pub control: &'a mut LoopControl,
    pub time: &'a SimulationTime,
}

/// The extension points the loop drives.
pub trait LoopHost {
    /// Advance the simulation by exactly `fixed_delta` seconds.
    fn update(&mut self, ctx: LoopContext<'_>, fixed_delta: f64) -> Result<(), EngineError>;

    /// Draw one frame, `alpha` in `[0, 1)` of the way to the next state.
    fn render(&mut self, ctx: LoopContext<'_>, alpha: f64) -> Result<(), EngineError>;

    /// Deliver pending platform events. May stop the loop.
    fn pump_events(&mut self, control: &mut LoopControl);
}

/// Summary of one iteration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    /// Measured time since the previous frame, before clamping
    pub raw_frame_time: f64,
    /// Time actually added to the accumulator
    pub frame_time: f64,
    pub clamped: bool,
    pub updates: u32,
    pub alpha: f64,
}

pub struct RunLoop<C: TimeSource> {
    clock: C,
    last_frame_time: f64,
    fixed_delta: f64,
    max_frame_time: f64,
    accumulator: f64,
    state: LoopState,
    control: LoopControl,
    time: SimulationTime,
    stats: FrameTimer,
}

impl<C: TimeSource> RunLoop<C> {
    /// Loop at the default 60 Hz step with a 250ms stall clamp.
    pub fn new(clock: C) -> Self {
        Self::build(clock, DEFAULT_FIXED_DELTA, DEFAULT_MAX_FRAME_TIME)
    }

    pub fn with_timing(clock: C, fixed_delta: f64, max_frame_time: f64) -> Result<Self, EngineError> {
        validate_timing(fixed_delta, max_frame_time)?;
        Ok(Self::build(clock, fixed_delta, max_frame_time))
    }

    /// Replace the fixed step, keeping the current clamp.
    pub fn with_fixed_delta(mut self, fixed_delta: f64) -> Result<Self, EngineError> {
        validate_timing(fixed_delta, self.max_frame_time)?;
        self.fixed_delta = fixed_delta;
        Ok(self)
    }

    /// Replace the stall clamp. Must not drop below the fixed step.
    pub fn with_max_frame_time(mut self, max_frame_time: f64) -> Result<Self, EngineError> {
        validate_timing(self.fixed_delta, max_frame_time)?;
        self.max_frame_time = max_frame_time;
        Ok(self)
    }

    /// Samples the clock once to set the first frame boundary.
    fn build(mut clock: C, fixed_delta: f64, max_frame_time: f64) -> Self {
        let last_frame_time = clock.now();
        Self {
            clock,
            last_frame_time,
            fixed_delta,
            max_frame_time,
            accumulator: 0.0,
            state: LoopState::Running,
            control: LoopControl::new(),
            time: SimulationTime::new(),
            stats: FrameTimer::new(STATS_WINDOW),
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    pub fn fixed_delta(&self) -> f64 {
        self.fixed_delta
    }

    pub fn max_frame_time(&self) -> f64 {
        self.max_frame_time
    }

    /// Unconsumed simulated time, in `[0, fixed_delta)` between iterations
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    pub fn simulation_time(&self) -> &SimulationTime {
        &self.time
    }

    pub fn stats(&self) -> &FrameTimer {
        &self.stats
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn control_mut(&mut self) -> &mut LoopControl {
        &mut self.control
    }

    /// Control and simulation time borrowed together, for hooks that run
    /// outside an iteration.
    pub fn context(&mut self) -> LoopContext<'_> {
        LoopContext {
            control: &mut self.control,
            time: &self.time,
        }
    }

    /// Run iterations until the loop stops or a host call fails.
    pub fn run<H: LoopHost>(&mut self, host: &mut H) -> Result<(), EngineError> {
        if self.state == LoopState::Stopped {
            tracing::warn!("run loop already stopped");
            return Ok(());
        }
        tracing::info!(
            fixed_delta = self.fixed_delta,
            max_frame_time = self.max_frame_time,
            "run loop started"
        );
        while self.step(host)?.is_some() {}
        tracing::info!(
            ticks = self.time.tick_count(),
            simulated_secs = self.time.elapsed(),
            "run loop stopped"
        );
        Ok(())
    }

    /// Run a single iteration.
    ///
    /// Returns `Ok(None)` without touching the host once the loop has been
    /// stopped. A failing host call stops the loop for good and is returned.
    pub fn step<H: LoopHost>(&mut self, host: &mut H) -> Result<Option<FrameReport>, EngineError> {
        if self.state == LoopState::Stopped {
            return Ok(None);
        }
        if !self.control.is_running() {
            self.state = LoopState::Stopped;
            return Ok(None);
        }

        match self.iterate(host) {
            Ok(report) => Ok(Some(report)),
            Err(err) => {
                tracing::error!(error = %err, "run loop aborted");
                self.control.stop();
                self.state = LoopState::Stopped;
                Err(err)
            }
        }
    }

    fn iterate<H: LoopHost>(&mut self, host: &mut H) -> Result<FrameReport, EngineError> {
        let now = self.clock.now();
        let raw_frame_time = now - self.last_frame_time;
        if now.is_finite() {
            self.last_frame_time = now;
        }

        // Clock regressions and NaN readings count as an empty frame
        let mut frame_time = if raw_frame_time > 0.0 { raw_frame_time } else { 0.0 };
        let clamped = frame_time > self.max_frame_time;
        if clamped {
            tracing::warn!(
                frame_time = raw_frame_time,
                max_frame_time = self.max_frame_time,
                "frame stalled, clamping catch-up"
            );
            frame_time = self.max_frame_time;
        }

        self.accumulator += frame_time;

        let mut updates = 0u32;
        while self.accumulator >= self.fixed_delta {
            let ctx = LoopContext {
                control: &mut self.control,
                time: &self.time,
            };
            host.update(ctx, self.fixed_delta)?;
            self.accumulator -= self.fixed_delta;
            self.time.advance_tick(self.fixed_delta);
            updates = updates.saturating_add(1);
        }

        let alpha = self.accumulator / self.fixed_delta;
        let ctx = LoopContext {
            control: &mut self.control,
            time: &self.time,
        };
        host.render(ctx, alpha)?;

        host.pump_events(&mut self.control);

        self.stats.record(frame_time, updates);
        tracing::trace!(frame_time, updates, alpha, "frame");
        marle_metrics::metrics! {
            if self.stats.frames() % STATS_WINDOW as u64 == 0 {
                tracing::debug!(
                    fps = self.stats.fps(),
                    frame_time_ms = self.stats.frame_time_ms(),
                    updates_per_frame = self.stats.updates_per_frame(),
                    "frame stats"
                );
            }
        }

        Ok(FrameReport {
            raw_frame_time,
            frame_time,
            clamped,
            updates,
            alpha,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FramePhase;
    use crate::time::{ManualClock, ScriptedClock};
    use rand::{Rng, SeedableRng};

    const D: f64 = 1.0 / 60.0;

    /// Records every call the loop makes
    #[derive(Default)]
    struct Recorder {
        updates: Vec<f64>,
        alphas: Vec<f64>,
        pumps: u32,
        stop_after_frames: Option<u32>,
        fail_update_at: Option<usize>,
    }

    impl LoopHost for Recorder {
        fn update(&mut self, _ctx: LoopContext<'_>, fixed_delta: f64) -> Result<(), EngineError> {
            if self.fail_update_at == Some(self.updates.len()) {
                return Err(EngineError::Frame {
                    phase: FramePhase::Update,
                    source: "simulation diverged".into(),
                });
            }
            self.updates.push(fixed_delta);
            Ok(())
        }

        fn render(&mut self, _ctx: LoopContext<'_>, alpha: f64) -> Result<(), EngineError> {
            self.alphas.push(alpha);
            Ok(())
        }

        fn pump_events(&mut self, control: &mut LoopControl) {
            self.pumps += 1;
            if self.stop_after_frames == Some(self.pumps) {
                control.stop();
            }
        }
    }

    fn scripted(frames: Vec<f64>) -> RunLoop<ScriptedClock> {
        RunLoop::new(ScriptedClock::new(frames))
    }

    #[test]
    fn defaults() {
        let lp = RunLoop::new(ManualClock::new());
        assert!((lp.fixed_delta() - D).abs() < 1e-15);
        assert_eq!(lp.max_frame_time(), 0.25);
        assert_eq!(lp.accumulator(), 0.0);
        assert_eq!(lp.state(), LoopState::Running);
    }

    #[test]
    fn rejects_invalid_timing() {
        assert!(RunLoop::with_timing(ManualClock::new(), 0.0, 0.25).is_err());
        assert!(RunLoop::with_timing(ManualClock::new(), f64::NAN, 0.25).is_err());
        assert!(RunLoop::with_timing(ManualClock::new(), 0.1, 0.01).is_err());
        assert!(RunLoop::with_timing(ManualClock::new(), 0.1, 0.5).is_ok());
    }

    #[test]
    fn builder_timing_is_validated() {
        let lp = RunLoop::new(ManualClock::new())
            .with_max_frame_time(1.0)
            .and_then(|lp| lp.with_fixed_delta(0.5))
            .unwrap();
        assert_eq!(lp.fixed_delta(), 0.5);
        assert_eq!(lp.max_frame_time(), 1.0);

        // Default clamp is 0.25s, so a half-second step is rejected
        assert!(RunLoop::new(ManualClock::new()).with_fixed_delta(0.5).is_err());
        assert!(RunLoop::new(ManualClock::new()).with_fixed_delta(-1.0).is_err());
        assert!(RunLoop::new(ManualClock::new()).with_max_frame_time(0.001).is_err());
    }

    #[test]
    fn tiny_step_is_rejected_before_it_can_stall() {
        assert!(RunLoop::with_timing(ScriptedClock::new([0.25]), 1e-18, 0.25).is_err());
        assert!(RunLoop::new(ScriptedClock::new([0.25])).with_fixed_delta(1e-11).is_err());

        // A fine but accepted step drains a full clamped frame and still renders once
        let d = 0.25 / 8_000.0;
        let mut lp = RunLoop::with_timing(ScriptedClock::new([10.0]), d, 0.25).unwrap();
        let mut host = Recorder::default();
        let report = lp.step(&mut host).unwrap().unwrap();
        assert!(report.clamped);
        assert!((7_999..=8_000).contains(&report.updates), "{} updates", report.updates);
        assert_eq!(host.alphas.len(), 1);
        assert!(lp.accumulator() >= 0.0 && lp.accumulator() < d);
    }

    #[test]
    fn fast_frames_skip_updates_but_always_render() {
        let mut lp = RunLoop::with_timing(ScriptedClock::new(vec![0.004; 3]), 0.01, 0.25).unwrap();
        let mut host = Recorder::default();

        let first = lp.step(&mut host).unwrap().unwrap();
        assert_eq!(first.updates, 0);
        assert!((first.alpha - 0.4).abs() < 1e-9);

        lp.step(&mut host).unwrap();
        let third = lp.step(&mut host).unwrap().unwrap();
        assert_eq!(third.updates, 1);

        assert_eq!(host.updates.len(), 1);
        assert_eq!(host.alphas.len(), 3);
        assert_eq!(host.pumps, 3);
    }

    #[test]
    fn slow_frame_runs_several_updates() {
        let mut lp = RunLoop::with_timing(ScriptedClock::new([0.035]), 0.01, 0.25).unwrap();
        let mut host = Recorder::default();

        let report = lp.step(&mut host).unwrap().unwrap();
        assert_eq!(report.updates, 3);
        assert!(!report.clamped);
        assert!(host.updates.iter().all(|&dt| dt == 0.01));
        assert!((lp.accumulator() - 0.005).abs() < 1e-9);
        assert_eq!(lp.simulation_time().tick_count(), 3);
    }

    #[test]
    fn stall_is_clamped() {
        let mut lp = scripted(vec![10.0]);
        let mut host = Recorder::default();

        let report = lp.step(&mut host).unwrap().unwrap();
        assert!(report.clamped);
        assert_eq!(report.raw_frame_time, 10.0);
        assert_eq!(report.frame_time, 0.25);

        let bound = (0.25 / D).ceil() as u32;
        assert!(report.updates <= bound, "{} updates after stall", report.updates);
        // Float drain can stop one step short of 15
        assert!(report.updates >= 14);
        assert!(lp.accumulator() >= 0.0 && lp.accumulator() < D);
    }

    #[test]
    fn update_count_tracks_total_time() {
        let frames: Vec<f64> = (0..500).map(|i| 0.003 + (i % 7) as f64 * 0.004).collect();
        let total: f64 = frames.iter().sum();
        let mut lp = scripted(frames.clone());
        let mut host = Recorder {
            stop_after_frames: Some(frames.len() as u32),
            ..Default::default()
        };

        lp.run(&mut host).unwrap();

        let expected = (total / D).floor() as i64;
        let actual = host.updates.len() as i64;
        assert!((actual - expected).abs() <= 1, "expected ~{expected}, got {actual}");
        assert!(lp.accumulator() >= 0.0 && lp.accumulator() < D);
        assert_eq!(lp.state(), LoopState::Stopped);
    }

    #[test]
    fn randomized_frames_keep_invariants() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x6d61726c65);
        for _ in 0..20 {
            let frames: Vec<f64> = (0..200)
                .map(|_| {
                    if rng.random_bool(0.02) {
                        rng.random_range(0.3..5.0)
                    } else {
                        rng.random_range(0.0..0.05)
                    }
                })
                .collect();
            let clamped_total: f64 = frames.iter().map(|&f| f.min(0.25)).sum();

            let mut lp = scripted(frames.clone());
            let mut host = Recorder::default();
            for _ in 0..frames.len() {
                let report = lp.step(&mut host).unwrap().unwrap();
                assert!(report.alpha >= 0.0 && report.alpha < 1.0, "alpha {}", report.alpha);
                assert!(lp.accumulator() >= 0.0 && lp.accumulator() < D);
            }

            let expected = (clamped_total / D).floor() as i64;
            let actual = host.updates.len() as i64;
            assert!((actual - expected).abs() <= 1, "expected ~{expected}, got {actual}");
        }
    }

    #[test]
    fn randomized_faulty_clock_degrades_gracefully() {
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x636c6f636b);
        for _ in 0..20 {
            let mut lp = RunLoop::new(ManualClock::new());
            let mut host = Recorder::default();
            let mut t = 0.0;
            let mut regressions = 0;
            let mut nans = 0;

            for _ in 0..300 {
                let roll: f64 = rng.random();
                if roll < 0.05 {
                    t -= rng.random_range(0.001..1.0);
                    lp.clock_mut().set(t);
                    regressions += 1;
                } else if roll < 0.10 {
                    lp.clock_mut().set(f64::NAN);
                    nans += 1;
                } else {
                    t += rng.random_range(0.0..0.05);
                    lp.clock_mut().set(t);
                }

                let report = lp.step(&mut host).unwrap().unwrap();
                assert!(report.frame_time.is_finite());
                assert!(report.frame_time >= 0.0 && report.frame_time <= 0.25);
                assert!(report.alpha >= 0.0 && report.alpha < 1.0, "alpha {}", report.alpha);
                assert!(lp.accumulator() >= 0.0 && lp.accumulator() < D);
            }

            assert!(regressions > 0 && nans > 0);
            assert_eq!(host.alphas.len(), 300);
            assert_eq!(lp.state(), LoopState::Running);
        }
    }

    #[test]
    fn clock_regression_degrades_to_empty_frame() {
        let mut lp = RunLoop::new(ManualClock::new());
        let mut host = Recorder::default();

        lp.clock_mut().set(1.0);
        let jumped = lp.step(&mut host).unwrap().unwrap();
        assert!(jumped.clamped);

        lp.clock_mut().set(0.5);
        let report = lp.step(&mut host).unwrap().unwrap();
        assert_eq!(report.frame_time, 0.0);
        assert_eq!(report.updates, 0);
        assert!(report.alpha >= 0.0 && report.alpha < 1.0);

        // Recovers once the clock moves forward from its new reading
        lp.clock_mut().set(0.5 + 2.0 * D);
        let recovered = lp.step(&mut host).unwrap().unwrap();
        assert!(recovered.updates >= 1);
    }

    #[test]
    fn nan_reading_is_empty_frame() {
        let mut lp = RunLoop::new(ManualClock::new());
        let mut host = Recorder::default();
        lp.clock_mut().set(f64::NAN);
        let report = lp.step(&mut host).unwrap().unwrap();
        assert_eq!(report.frame_time, 0.0);
        assert!(lp.accumulator() == 0.0);
    }

    #[test]
    fn stop_is_observed_next_iteration() {
        let mut lp = scripted(vec![D; 10]);
        let mut host = Recorder {
            stop_after_frames: Some(3),
            ..Default::default()
        };

        lp.run(&mut host).unwrap();

        // The iteration that stopped still rendered
        assert_eq!(host.alphas.len(), 3);
        assert_eq!(host.pumps, 3);
        assert_eq!(lp.state(), LoopState::Stopped);
    }

    #[test]
    fn stopped_loop_does_not_restart() {
        let mut lp = scripted(vec![D; 10]);
        let mut host = Recorder {
            stop_after_frames: Some(1),
            ..Default::default()
        };
        lp.run(&mut host).unwrap();
        lp.run(&mut host).unwrap();
        assert_eq!(lp.step(&mut host).unwrap(), None);
        assert_eq!(host.pumps, 1);
    }

    #[test]
    fn stop_before_first_iteration() {
        let mut lp = scripted(vec![D; 4]);
        let mut host = Recorder::default();
        lp.control_mut().stop();
        lp.run(&mut host).unwrap();
        assert_eq!(host.pumps, 0);
        assert!(host.alphas.is_empty());
    }

    #[test]
    fn update_failure_stops_loop() {
        let mut lp = scripted(vec![D * 3.5; 5]);
        let mut host = Recorder {
            fail_update_at: Some(2),
            ..Default::default()
        };

        let err = lp.run(&mut host).unwrap_err();
        assert!(matches!(err, EngineError::Frame { phase: FramePhase::Update, .. }));
        assert_eq!(lp.state(), LoopState::Stopped);
        assert_eq!(host.updates.len(), 2);
        assert!(host.alphas.is_empty());
        assert_eq!(lp.step(&mut host).unwrap(), None);
    }
}
