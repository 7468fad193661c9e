/*!
 * Counting Semaphore
 * Blocking wait/post built on parking_lot primitives
 */

use parking_lot::{Condvar, Mutex};

/// Counting semaphore.
///
/// The wait loop re-checks the count after every wakeup, so spurious or
/// interrupted wakeups are retried transparently and a successful `wait`
/// always observes writes made before the matching `post`.
pub struct Semaphore {
    count: Mutex<usize>,
    cond: Condvar,
}

impl Semaphore {
    /// Create a semaphore with an initial count.
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            count: Mutex::new(count),
            cond: Condvar::new(),
        }
    }

    /// Block until the count is positive, then decrement it.
    pub fn wait(&self) {
        let mut count = self.count.lock();
        while *count == 0 {
            self.cond.wait(&mut count);
        }
        *count -= 1;
    }

    /// Decrement the count without blocking. Returns false if it was zero.
    pub fn try_wait(&self) -> bool {
        let mut count = self.count.lock();
        if *count == 0 {
            return false;
        }
        *count -= 1;
        true
    }

    /// Increment the count and wake one waiter.
    pub fn post(&self) {
        let mut count = self.count.lock();
        *count += 1;
        self.cond.notify_one();
    }

    /// Current count. Racy by nature; only meaningful for diagnostics.
    #[must_use]
    pub fn count(&self) -> usize {
        *self.count.lock()
    }
}
