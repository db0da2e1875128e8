use std::sync::{Mutex, MutexGuard};

#[derive(Debug)]
struct Counter {
    current: usize,
    max: usize,
}

/// Rotating server index shared by every request of one upstream manager.
#[derive(Debug)]
pub struct IndexRoundRobin {
    counter: Mutex<Counter>,
}

impl IndexRoundRobin {
    pub fn new(max: usize) -> Self {
        Self {
            counter: Mutex::new(Counter { current: 0, max }),
        }
    }

    /// Next index in `[0, max)`, cycling.
    pub fn get(&self) -> usize {
        let max = self.lock().max;
        self.limited_get(max)
    }

    /// Next index in `[0, bound)`. The counter wraps onto the bound first, so
    /// a smaller server set never sees an index past its end.
    pub fn limited_get(&self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }

        let mut counter = self.lock();
        if counter.current >= bound {
            counter.current %= bound;
        }
        let index = counter.current;
        counter.current = index + 1;
        index
    }

    fn lock(&self) -> MutexGuard<'_, Counter> {
        self.counter.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
