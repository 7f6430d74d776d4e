//! Fixed-capacity sample window for rolling frame statistics

pub struct RingBuffer<T> {
    samples: Vec<T>,
    capacity: usize,
    index: usize,
}

impl<T: Copy> RingBuffer<T> {
    /// A zero capacity is bumped to one so `push` never divides by zero.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: Vec::with_capacity(capacity),
            capacity,
            index: 0,
        }
    }

    pub fn push(&mut self, sample: T) {
        if self.samples.len() < self.capacity {
            self.samples.push(sample);
        } else {
            self.samples[self.index] = sample;
        }
        self.index = (self.index + 1) % self.capacity;
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.samples.clear();
        self.index = 0;
    }
}

impl RingBuffer<f64> {
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }

        let sum: f64 = self.samples.iter().sum();
        sum / self.samples.len() as f64
    }

    pub fn min_max(&self) -> (f64, f64) {
        if self.samples.is_empty() {
            return (0.0, 0.0);
        }

        self.samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| {
                (lo.min(s), hi.max(s))
            })
    }
}

impl RingBuffer<u32> {
    pub fn average(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }

        let sum: u64 = self.samples.iter().map(|&s| s as u64).sum();
        sum as f64 / self.samples.len() as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ring_buffer_wraps() {
        let mut buffer: RingBuffer<f64> = RingBuffer::new(3);

        buffer.push(0.010);
        assert!((buffer.average() - 0.010).abs() < 1e-12);

        buffer.push(0.020);
        assert!((buffer.average() - 0.015).abs() < 1e-12);

        buffer.push(0.030);
        assert!((buffer.average() - 0.020).abs() < 1e-12);

        // Oldest sample is overwritten
        buffer.push(0.040);
        assert_eq!(buffer.len(), 3);
        assert!((buffer.average() - 0.030).abs() < 1e-12);
        assert_eq!(buffer.min_max(), (0.020, 0.040));
    }

    #[test]
    fn test_zero_capacity_holds_one_sample() {
        let mut buffer: RingBuffer<u32> = RingBuffer::new(0);
        buffer.push(3);
        buffer.push(5);
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.average(), 5.0);
    }

    #[test]
    fn test_empty_buffer_reports_zero() {
        let buffer: RingBuffer<f64> = RingBuffer::new(8);
        assert!(buffer.is_empty());
        assert_eq!(buffer.average(), 0.0);
        assert_eq!(buffer.min_max(), (0.0, 0.0));
    }
}
