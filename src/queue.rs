use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::sync::{Condvar, Mutex, PoisonError};

/// Scheduling priority of a queued task.
///
/// `Depth` carries the directory depth, so deeper directories are served
/// first and the backlog stays proportional to the deepest live path rather
/// than the size of the whole tree. The boundary variants sidestep depth
/// comparison entirely: `Head` beats every depth (used when seeding roots),
/// `Tail` loses to every depth (used only for shutdown sentinels).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Tail,
    Depth(usize),
    Head,
}

struct Slot<T> {
    priority: Priority,
    seq: u64,
    payload: Option<T>,
}

impl<T> PartialEq for Slot<T> {
    fn eq(&self, other: &Self) -> bool {
        self.priority == other.priority && self.seq == other.seq
    }
}

impl<T> Eq for Slot<T> {}

impl<T> PartialOrd for Slot<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Slot<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Higher priority wins; among equals the earlier insertion wins,
        // hence the reversed sequence comparison under a max-heap.
        self.priority
            .cmp(&other.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

struct QueueState<T> {
    heap: BinaryHeap<Slot<T>>,
    next_seq: u64,
}

/**
A thread-safe priority queue with a blocking dequeue.

Every payload is wrapped in `Option`: `Some` is real work, `None` is a
shutdown sentinel that a worker interprets as "exit now". Sentinels are only
ever inserted at [`Priority::Tail`], so they cannot be dequeued while real
work is still queued.

[`TaskQueue::get`] parks on a condvar while the queue is empty; the wait
releases the structure mutex, so producers are never blocked by an idle
consumer.
*/
pub struct TaskQueue<T> {
    state: Mutex<QueueState<T>>,
    gate: Condvar,
}

impl<T> Default for TaskQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TaskQueue<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: Mutex::new(QueueState {
                heap: BinaryHeap::new(),
                next_seq: 0,
            }),
            gate: Condvar::new(),
        }
    }

    fn insert(&self, priority: Priority, payload: Option<T>) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let seq = state.next_seq;
        state.next_seq += 1;
        state.heap.push(Slot {
            priority,
            seq,
            payload,
        });
        drop(state);
        self.gate.notify_one();
    }

    /// Enqueue `payload` at depth priority `depth`.
    #[inline]
    pub fn put(&self, payload: T, depth: usize) {
        self.insert(Priority::Depth(depth), Some(payload));
    }

    /// Enqueue `payload` ahead of everything currently queued.
    #[inline]
    pub fn put_head(&self, payload: T) {
        self.insert(Priority::Head, Some(payload));
    }

    /// Enqueue one shutdown sentinel behind everything currently queued.
    #[inline]
    pub fn put_terminator(&self) {
        self.insert(Priority::Tail, None);
    }

    /// Dequeue the highest-priority item, blocking while the queue is empty.
    /// Returns `None` when a shutdown sentinel is dequeued.
    pub fn get(&self) -> Option<T> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        loop {
            if let Some(slot) = state.heap.pop() {
                return slot.payload;
            }
            state = self
                .gate
                .wait(state)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }

    /// Number of queued items, sentinels included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .heap
            .len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::{Priority, TaskQueue};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    #[test]
    fn boundary_priorities_straddle_depths() {
        assert!(Priority::Head > Priority::Depth(usize::MAX));
        assert!(Priority::Tail < Priority::Depth(0));
        assert!(Priority::Depth(4) > Priority::Depth(3));
    }

    #[test]
    fn deeper_items_dequeue_first() {
        let queue = TaskQueue::new();
        queue.put("shallow", 1);
        queue.put("deep", 5);
        queue.put("mid", 3);

        assert_eq!(queue.get(), Some("deep"));
        assert_eq!(queue.get(), Some("mid"));
        assert_eq!(queue.get(), Some("shallow"));
    }

    #[test]
    fn equal_priorities_dequeue_fifo() {
        let queue = TaskQueue::new();
        queue.put('a', 2);
        queue.put('b', 2);
        queue.put('c', 2);

        assert_eq!(queue.get(), Some('a'));
        assert_eq!(queue.get(), Some('b'));
        assert_eq!(queue.get(), Some('c'));
    }

    #[test]
    fn head_beats_everything_and_sentinel_loses_to_everything() {
        let queue = TaskQueue::new();
        queue.put_terminator();
        queue.put(1, 9);
        queue.put_head(0);
        queue.put(2, 1);

        assert_eq!(queue.get(), Some(0));
        assert_eq!(queue.get(), Some(1));
        assert_eq!(queue.get(), Some(2));
        assert_eq!(queue.get(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn get_blocks_until_something_is_put() {
        let queue = Arc::new(TaskQueue::new());
        let consumer = thread::spawn({
            let queue = Arc::clone(&queue);
            move || queue.get()
        });

        // Give the consumer time to park on the gate.
        thread::sleep(Duration::from_millis(50));
        assert!(!consumer.is_finished());

        queue.put(42, 0);
        assert_eq!(consumer.join().expect("consumer panicked"), Some(42));
    }

    #[test]
    fn len_tracks_inserts_and_removals() {
        let queue = TaskQueue::new();
        assert_eq!(queue.len(), 0);
        queue.put((), 0);
        queue.put_terminator();
        assert_eq!(queue.len(), 2);
        let _ = queue.get();
        assert_eq!(queue.len(), 1);
    }
}
