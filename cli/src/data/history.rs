use std::collections::VecDeque;

/// Fixed-capacity FIFO of recent total-power samples.
#[derive(Debug, Clone)]
pub struct PowerHistory {
    samples: VecDeque<f32>,
    capacity: usize,
}

impl PowerHistory {
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a sample, evicting the oldest when full.
    pub fn push(&mut self, watts: f32) {
        if self.samples.len() >= self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(watts);
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Oldest first.
    pub fn to_vec(&self) -> Vec<f32> {
        self.samples.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_tracks_ticks_until_full() {
        let mut history = PowerHistory::new(60);
        for tick in 1..=100 {
            history.push(tick as f32);
            assert_eq!(history.len(), tick.min(60));
        }
    }

    #[test]
    fn test_evicts_oldest_first() {
        let mut history = PowerHistory::new(3);
        for w in [1.0, 2.0, 3.0, 4.0, 5.0] {
            history.push(w);
        }
        assert_eq!(history.to_vec(), vec![3.0, 4.0, 5.0]);
    }

    #[test]
    fn test_zero_capacity_still_holds_one() {
        let mut history = PowerHistory::new(0);
        history.push(1.0);
        history.push(2.0);
        assert_eq!(history.capacity(), 1);
        assert_eq!(history.to_vec(), vec![2.0]);
    }
}
