use std::sync::{Condvar, Mutex, PoisonError};

/**
Counts outstanding units of work so the scanner can detect quiescence.

Every enqueued directory is preceded by one [`acquire`](Self::acquire) and
followed by one [`release`](Self::release) when its expansion finishes, so
the count equals the number of live tasks: queued, or currently being walked
(a walked directory may still add children, each under its own credit).
When the count drops to zero there is provably nothing left to do.

A `release` without a matching `acquire` is a programming error and panics.
*/
pub struct PendingCounter {
    count: Mutex<usize>,
    idle: Condvar,
}

impl Default for PendingCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl PendingCounter {
    #[must_use]
    pub fn new() -> Self {
        Self {
            count: Mutex::new(0),
            idle: Condvar::new(),
        }
    }

    /// Register one more outstanding unit of work.
    pub fn acquire(&self) {
        let mut count = self.count.lock().unwrap_or_else(PoisonError::into_inner);
        *count += 1;
    }

    /// Retire one unit of work, waking waiters when the count reaches zero.
    pub fn release(&self) {
        let mut count = self.count.lock().unwrap_or_else(PoisonError::into_inner);
        assert!(*count > 0, "release without a matching acquire");
        *count -= 1;
        if *count == 0 {
            self.idle.notify_all();
        }
    }

    /// Block until every acquired credit has been released.
    pub fn wait_idle(&self) {
        let mut count = self.count.lock().unwrap_or_else(PoisonError::into_inner);
        while *count != 0 {
            count = self
                .idle
                .wait(count)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }
}
