use crate::Grid;

use std::collections::hash_map::DefaultHasher;
use std::collections::VecDeque;
use std::hash::{Hash, Hasher};

/// Remembers recent generations and spots when one repeats.
///
/// Generations are compared by their trimmed pattern, so a spaceship that returns to its own
/// shape somewhere else on the board counts as a repeat too.
#[derive(Clone, Debug)]
pub struct CycleDetector {
    capacity: usize,
    seen: VecDeque<(u64, Grid)>,
}

impl Default for CycleDetector {
    fn default() -> Self {
        CycleDetector::new(16)
    }
}

impl CycleDetector {
    /// Remember up to `capacity` generations, which is also the longest period detected.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        CycleDetector {
            capacity,
            seen: VecDeque::with_capacity(capacity),
        }
    }

    /// Record a generation. Returns the period if it matches a remembered one.
    pub fn observe(&mut self, grid: &Grid) -> Option<usize> {
        let pattern = grid.trimmed_copy(0);
        let mut hasher = DefaultHasher::new();
        pattern.hash(&mut hasher);
        let hash = hasher.finish();

        let period = self
            .seen
            .iter()
            .rev()
            .position(|(h, g)| *h == hash && *g == pattern)
            .map(|age| age + 1);

        if self.seen.len() == self.capacity {
            self.seen.pop_front();
        }
        self.seen.push_back((hash, pattern));
        period
    }

    /// Forget every remembered generation.
    pub fn clear(&mut self) {
        self.seen.clear();
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }
}
