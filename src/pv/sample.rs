//! Bounded sample history for trending widgets.

use std::time::SystemTime;

use super::PvValue;

/// One timestamped observation of a data point.
#[derive(Clone, Debug, PartialEq)]
pub struct Sample {
    pub time: SystemTime,
    pub value: PvValue,
}

impl Sample {
    pub fn new(time: SystemTime, value: PvValue) -> Self {
        Self { time, value }
    }
}

/// A fixed-capacity ring of samples.
///
/// Pushing past capacity overwrites the oldest entry. [`snapshot`] returns
/// the retained samples in chronological order regardless of where the
/// write pointer sits, so out-of-order delivery from the source is also
/// straightened out at read time.
///
/// [`snapshot`]: SampleBuffer::snapshot
pub struct SampleBuffer {
    slots: Vec<Option<Sample>>,
    pointer: usize,
}

impl SampleBuffer {
    /// Create a buffer retaining at most `capacity` samples.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "sample buffer capacity must be positive");
        Self { slots: vec![None; capacity], pointer: 0 }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of samples currently retained.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(|s| s.is_none())
    }

    /// Record a sample, evicting the oldest if the buffer is full.
    pub fn push(&mut self, sample: Sample) {
        self.slots[self.pointer] = Some(sample);
        self.pointer = (self.pointer + 1) % self.slots.len();
    }

    /// The retained samples, oldest first.
    pub fn snapshot(&self) -> Vec<Sample> {
        let mut out: Vec<Sample> = self.slots.iter().flatten().cloned().collect();
        out.sort_by_key(|s| s.time);
        out
    }

    /// Drop all retained samples.
    pub fn clear(&mut self) {
        self.slots.fill(None);
        self.pointer = 0;
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn at(secs: u64) -> SystemTime {
        SystemTime::UNIX_EPOCH + Duration::from_secs(secs)
    }

    fn sample(secs: u64, v: f64) -> Sample {
        Sample::new(at(secs), PvValue::Num(v))
    }

    #[test]
    fn snapshot_is_chronological() {
        let mut buf = SampleBuffer::new(4);
        buf.push(sample(3, 3.0));
        buf.push(sample(1, 1.0));
        buf.push(sample(2, 2.0));

        let times: Vec<_> = buf.snapshot().iter().map(|s| s.time).collect();
        assert_eq!(times, vec![at(1), at(2), at(3)]);
    }

    #[test]
    fn overflow_evicts_oldest_slot() {
        let mut buf = SampleBuffer::new(3);
        for i in 1..=5 {
            buf.push(sample(i, i as f64));
        }
        assert_eq!(buf.len(), 3);
        let values: Vec<_> = buf.snapshot().iter().map(|s| s.value.clone()).collect();
        assert_eq!(
            values,
            vec![PvValue::Num(3.0), PvValue::Num(4.0), PvValue::Num(5.0)]
        );
    }

    #[test]
    fn clear_empties_the_buffer() {
        let mut buf = SampleBuffer::new(2);
        buf.push(sample(1, 1.0));
        buf.clear();
        assert!(buf.is_empty());
        assert!(buf.snapshot().is_empty());
    }

    #[test]
    #[should_panic(expected = "capacity")]
    fn zero_capacity_rejected() {
        SampleBuffer::new(0);
    }
}
