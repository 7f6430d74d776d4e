//! Frame timing utilities
//!
//! Samples are pushed by the run loop using the loop's own time source, so
//! statistics stay reproducible under scripted clocks.

use super::ring_buffer::RingBuffer;

pub struct FrameTimer {
    frame_times: RingBuffer<f64>,
    updates: RingBuffer<u32>,
    frames: u64,
}

impl FrameTimer {
    pub fn new(capacity: usize) -> Self {
        Self {
            frame_times: RingBuffer::new(capacity),
            updates: RingBuffer::new(capacity),
            frames: 0,
        }
    }

    /// Record one finished frame: its (possibly clamped) length in seconds
    /// and how many fixed updates it ran.
    pub fn record(&mut self, frame_time_secs: f64, updates: u32) {
        self.frame_times.push(frame_time_secs);
        self.updates.push(updates);
        self.frames += 1;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn fps(&self) -> f64 {
        let avg = self.frame_times.average();
        if avg > 0.0 {
            1.0 / avg
        } else {
            0.0
        }
    }

    pub fn frame_time_ms(&self) -> f64 {
        self.frame_times.average() * 1000.0
    }

    pub fn frame_time_range_ms(&self) -> (f64, f64) {
        let (min, max) = self.frame_times.min_max();
        (min * 1000.0, max * 1000.0)
    }

    pub fn updates_per_frame(&self) -> f64 {
        self.updates.average()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fps_from_recorded_frames() {
        let mut timer = FrameTimer::new(4);
        for _ in 0..4 {
            timer.record(0.020, 1);
        }
        assert!((timer.fps() - 50.0).abs() < 1e-9);
        assert!((timer.frame_time_ms() - 20.0).abs() < 1e-9);
        assert_eq!(timer.frames(), 4);
    }

    #[test]
    fn test_updates_per_frame_average() {
        let mut timer = FrameTimer::new(4);
        timer.record(0.008, 0);
        timer.record(0.008, 1);
        timer.record(0.050, 3);
        timer.record(0.008, 0);
        assert!((timer.updates_per_frame() - 1.0).abs() < 1e-9);
        let (min, max) = timer.frame_time_range_ms();
        assert!((min - 8.0).abs() < 1e-9);
        assert!((max - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_frames_no_fps() {
        let timer = FrameTimer::new(60);
        assert_eq!(timer.fps(), 0.0);
    }
}
