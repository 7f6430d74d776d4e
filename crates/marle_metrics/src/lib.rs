//! Marle Metrics - frame statistics for the run loop
//!
//! Provides zero-cost abstractions for metrics collection that completely
//! vanish in production builds via feature flags.
//!
//! # Feature Flags
//!
//! - `metrics` - Enable metrics collection (default: disabled)
//!
//! # Usage
//!
//! ```ignore
//! use marle_metrics::FrameTimer;
//!
//! let mut timer = FrameTimer::new(60); // Track last 60 frames
//! timer.record(frame_time_secs, updates_this_frame);
//! println!("FPS: {:.1}", timer.fps());
//! ```
//!
//! In production builds (without `metrics` feature), all instrumentation
//! is compiled out to zero overhead.

#[cfg(feature = "metrics")]
mod frame_timer;
#[cfg(feature = "metrics")]
mod ring_buffer;

#[cfg(feature = "metrics")]
pub use frame_timer::FrameTimer;
#[cfg(feature = "metrics")]
pub use ring_buffer::RingBuffer;

// ============================================================================
// Macros for conditional compilation
// ============================================================================

/// Execute code only when metrics are enabled
#[macro_export]
macro_rules! metrics {
    ($($tt:tt)*) => {
        #[cfg(feature = "metrics")]
        {
            $($tt)*
        }
    };
}

// ============================================================================
// No-op stubs when metrics disabled
// ============================================================================

#[cfg(not(feature = "metrics"))]
pub struct FrameTimer;

#[cfg(not(feature = "metrics"))]
impl FrameTimer {
    pub fn new(_capacity: usize) -> Self { Self }
    pub fn record(&mut self, _frame_time_secs: f64, _updates: u32) {}
    pub fn frames(&self) -> u64 { 0 }
    pub fn fps(&self) -> f64 { 0.0 }
    pub fn frame_time_ms(&self) -> f64 { 0.0 }
    pub fn frame_time_range_ms(&self) -> (f64, f64) { (0.0, 0.0) }
    pub fn updates_per_frame(&self) -> f64 { 0.0 }
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_frame_timer_api_available() {
        // Same surface with or without the `metrics` feature
        let mut timer = super::FrameTimer::new(60);
        timer.record(1.0 / 60.0, 1);
        let _ = timer.fps();
        let _ = timer.updates_per_frame();
    }
}
